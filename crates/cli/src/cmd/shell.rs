use std::path::Path;

use anyhow::{Context, Result};

use toncli_lib::config::Config;
use toncli_lib::pipeline::{Action, Outcome, Pipeline};
use toncli_lib::process::SessionEnd;
use toncli_lib::stage::RunOptions;

use crate::output::{print_info, print_warning};

pub fn cmd_shell(config: &Config, cwd: &Path, options: RunOptions) -> Result<()> {
  let pipeline = Pipeline::new(config, cwd, options);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt
    .block_on(pipeline.execute(Action::Interactive))
    .context("Interactive session failed")?;

  match outcome {
    Outcome::Session(SessionEnd::Interrupted) => print_info("Bye! Have a good code!"),
    Outcome::Session(SessionEnd::Exited(status)) if !status.success() => {
      print_warning(&format!("fift exited with {}", status))
    }
    _ => {}
  }

  Ok(())
}
