//! Implementation of the `toncli sendboc` command.
//!
//! Runs a Fift script that saves a BOC, then submits the BOC with
//! `lite-client`, retrying while the connection is refused.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use toncli_lib::config::Config;
use toncli_lib::pipeline::{Action, Outcome, Pipeline};
use toncli_lib::stage::RunOptions;
use toncli_lib::stage::submit::SubmitOutcome;

use crate::output::{print_stat, print_success, print_warning};

pub fn cmd_sendboc(
  config: &Config,
  cwd: &Path,
  file: Option<PathBuf>,
  args: Vec<String>,
  options: RunOptions,
  quiet: bool,
) -> Result<()> {
  let network = options.network;
  let pipeline = Pipeline::new(config, cwd, options);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt
    .block_on(pipeline.execute(Action::Submit {
      target: file,
      args,
      quiet,
    }))
    .context("sendboc failed")?;

  let Outcome::Submitted(submitted) = outcome else {
    return Ok(());
  };

  match submitted {
    SubmitOutcome::Sent { output, attempts } => {
      if let Some(output) = output {
        print!("{}", output);
      }
      print_success(&format!("BOC sent to {}", network));
      print_stat("Attempts", &attempts.to_string());
    }
    SubmitOutcome::Unresolved { attempts } => {
      print_warning(&format!(
        "lite-client could not reach {} after {} attempt(s)",
        network, attempts
      ));
    }
  }

  Ok(())
}
