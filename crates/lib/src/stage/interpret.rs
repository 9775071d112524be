//! Interpret stage: running `fift`.
//!
//! Command lines, in order:
//!
//! ```text
//! interactive:  fift <base> -i
//! script:       fift <base> [-L <glue>] -s <script> [script args...]
//! ```
//!
//! `<base>` is the user's interpreter arguments, or `-I <fift-libs>` when none
//! were given.

use std::ffi::OsString;
use std::path::Path;

use tracing::info;

use super::{RunOptions, StageError};
use crate::config::Config;
use crate::process::{self, CapturedRun, SessionEnd, ToolInvocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
  /// Attached to the terminal, no script.
  Interactive,
  /// Run a script and wait for it.
  Script,
  /// Run a script and expose its merged output as a line stream.
  CaptureOutput,
}

/// A script to run and where to run it.
#[derive(Debug, Clone, Copy)]
pub struct ScriptRun<'a> {
  pub script: &'a Path,
  pub args: &'a [String],
  /// Library loaded with `-L` before the script.
  pub glue: Option<&'a Path>,
  pub cwd: &'a Path,
}

#[derive(Debug)]
pub enum RunOutput {
  Session(SessionEnd),
  Finished,
  Captured(CapturedRun),
}

fn base_args(config: &Config, options: &RunOptions) -> Vec<OsString> {
  if options.interpreter_args.is_empty() {
    vec![OsString::from("-I"), config.fift_libs_dir().into_os_string()]
  } else {
    options.interpreter_args.iter().map(OsString::from).collect()
  }
}

pub fn interactive_invocation(config: &Config, options: &RunOptions) -> ToolInvocation {
  ToolInvocation::new(&config.executables.fift)
    .args(base_args(config, options))
    .arg("-i")
}

pub fn script_invocation(config: &Config, run: &ScriptRun<'_>, options: &RunOptions) -> ToolInvocation {
  let mut invocation = ToolInvocation::new(&config.executables.fift).args(base_args(config, options));
  if let Some(glue) = run.glue {
    invocation = invocation.arg("-L").arg(glue);
  }
  invocation
    .arg("-s")
    .arg(run.script)
    .args(run.args)
    .current_dir(run.cwd)
}

/// Interactive session attached to the terminal; Ctrl-C ends it normally.
pub async fn interactive(config: &Config, options: &RunOptions) -> Result<SessionEnd, StageError> {
  let end = process::interactive(&interactive_invocation(config, options)).await?;
  if end == SessionEnd::Interrupted {
    info!("interactive session interrupted, bye");
  }
  Ok(end)
}

/// Run a script and wait; a non-zero exit is an error.
pub async fn run_script(config: &Config, run: &ScriptRun<'_>, options: &RunOptions) -> Result<(), StageError> {
  process::run_checked(&script_invocation(config, run, options)).await?;
  Ok(())
}

/// Spawn a script and return its merged output stream without waiting.
pub async fn capture(config: &Config, run: &ScriptRun<'_>, options: &RunOptions) -> Result<CapturedRun, StageError> {
  Ok(process::spawn_captured(&script_invocation(config, run, options)).await?)
}

/// Run the interpreter in `mode`. `Interactive` ignores `script`.
pub async fn run(
  config: &Config,
  script: Option<ScriptRun<'_>>,
  options: &RunOptions,
  mode: RunMode,
) -> Result<RunOutput, StageError> {
  match mode {
    RunMode::Interactive => Ok(RunOutput::Session(interactive(config, options).await?)),
    RunMode::Script => {
      let script = script.ok_or(StageError::MissingScript)?;
      run_script(config, &script, options).await?;
      Ok(RunOutput::Finished)
    }
    RunMode::CaptureOutput => {
      let script = script.ok_or(StageError::MissingScript)?;
      Ok(RunOutput::Captured(capture(config, &script, options).await?))
    }
  }
}
