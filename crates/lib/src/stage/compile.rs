//! Compile stage: FunC sources to a Fift script.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::StageError;
use crate::config::Config;
use crate::process::{self, ToolInvocation};

/// `func [extra_args...] [sources...]`, run from `working_dir`.
pub fn compile_invocation(config: &Config, sources: &[PathBuf], extra_args: &[String], working_dir: &Path) -> ToolInvocation {
  ToolInvocation::new(&config.executables.func)
    .args(extra_args)
    .args(sources)
    .current_dir(working_dir)
}

/// Compile `sources` in the given order and write the compiler's stdout to `output`.
///
/// A non-zero exit is returned as the compiler's own diagnostics; nothing is
/// written in that case.
pub async fn compile(
  config: &Config,
  sources: &[PathBuf],
  output: &Path,
  extra_args: &[String],
  working_dir: &Path,
) -> Result<(), StageError> {
  if sources.is_empty() {
    return Err(StageError::NoSourceFiles);
  }

  let invocation = compile_invocation(config, sources, extra_args, working_dir);
  let result = process::output(&invocation).await?.check(&invocation.program)?;

  if let Some(parent) = output.parent() {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(|source| StageError::WriteOutput {
        path: parent.to_path_buf(),
        source,
      })?;
  }
  tokio::fs::write(output, result.stdout.as_bytes())
    .await
    .map_err(|source| StageError::WriteOutput {
      path: output.to_path_buf(),
      source,
    })?;

  debug!(bytes = result.stdout.len(), "compiler output written");
  info!(output = %output.display(), sources = sources.len(), "compiled");
  Ok(())
}
