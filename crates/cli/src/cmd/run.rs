//! Implementation of the `toncli run` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use toncli_lib::config::Config;
use toncli_lib::pipeline::{Action, Pipeline};
use toncli_lib::stage::RunOptions;

/// Run a Fift script with `args`, building the project first when requested.
pub fn cmd_run(config: &Config, cwd: &Path, file: Option<PathBuf>, args: Vec<String>, options: RunOptions) -> Result<()> {
  let pipeline = Pipeline::new(config, cwd, options);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(pipeline.execute(Action::Run { script: file, args }))
    .context("Run failed")?;

  Ok(())
}
