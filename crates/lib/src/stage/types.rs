use std::path::PathBuf;

use thiserror::Error;

use crate::network::{Network, NetworkError};
use crate::process::ToolError;

/// Errors raised by a single stage.
#[derive(Debug, Error)]
pub enum StageError {
  #[error("no source files to build")]
  NoSourceFiles,

  #[error("no script to run")]
  MissingScript,

  #[error("can't split arguments `{0}`: unbalanced quotes")]
  InvalidArguments(String),

  #[error("you need to add saveboc to your fif file {}", path.display())]
  MissingSaveBoc { path: PathBuf },

  #[error("path {} can't be used in a Fift string literal: it contains '\"'", path.display())]
  UnquotablePath { path: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  ReadScript { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", path.display())]
  WriteOutput { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Tool(#[from] ToolError),

  #[error(transparent)]
  Network(#[from] NetworkError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Per-invocation options shared by all stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
  /// Extra arguments placed before the source files on the `func` command line.
  pub compiler_args: Vec<String>,
  /// Arguments for `fift`; when empty, `-I <fift-libs>` is used instead.
  pub interpreter_args: Vec<String>,
  /// Build the whole project before running a script (project mode only).
  pub build_before_run: bool,
  pub network: Network,
  /// Download the network config even when a cached copy exists.
  pub refresh_network_config: bool,
}

impl RunOptions {
  /// Split a command-line fragment such as `"-I '/my libs' -v 3"` into
  /// arguments with POSIX shell quoting rules.
  pub fn split_args(raw: &str) -> Result<Vec<String>, StageError> {
    shlex::split(raw).ok_or_else(|| StageError::InvalidArguments(raw.to_string()))
  }
}
