//! Implementation of the `toncli build` command.
//!
//! Compiles the given FunC files into a single Fift script, or every contract
//! listed in `project.yaml` when no files are given. With `--run`, each
//! produced script is executed afterwards.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use toncli_lib::artifacts::BuildTarget;
use toncli_lib::config::Config;
use toncli_lib::pipeline::{Action, Outcome, Pipeline};
use toncli_lib::stage::RunOptions;

use crate::output::{display_path, format_duration, print_artifact, print_success};

pub fn cmd_build(config: &Config, cwd: &Path, files: Vec<PathBuf>, options: RunOptions, run: bool) -> Result<()> {
  let pipeline = Pipeline::new(config, cwd, options);
  let action = if run {
    Action::BuildAndRun { files }
  } else {
    Action::Build { files }
  };

  let started = Instant::now();
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt.block_on(pipeline.execute(action)).context("Build failed")?;

  let built = match outcome {
    Outcome::Built(built) | Outcome::Ran { built } => built,
    _ => Vec::new(),
  };
  print_summary(&built, pipeline.context().root(), started.elapsed());

  Ok(())
}

fn print_summary(built: &[BuildTarget], root: &Path, elapsed: std::time::Duration) {
  print_success(&format!(
    "Built {} script(s) in {}",
    built.len(),
    format_duration(elapsed)
  ));
  for target in built {
    print_artifact("script", &display_path(&target.script, root));
  }
}
