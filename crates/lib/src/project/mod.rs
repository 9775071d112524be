//! Project detection and `project.yaml` parsing.
//!
//! A directory is a project root when it carries `project.yaml` together with
//! the `func/` and `fift/` source directories. Inside a project, artifacts are
//! written to a persistent `build/` tree; outside of one they go to temporary
//! directories.

mod config;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::PROJECT_FILE;

pub use config::{Contract, ContractEntry, ProjectConfig};

/// Entries that must all exist at a project root.
pub const PROJECT_MARKERS: [&str; 3] = [PROJECT_FILE, "func", "fift"];

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("can't load {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },

  #[error("contract '{name}' in {} is invalid: {source}", path.display())]
  InvalidContract {
    name: String,
    path: PathBuf,
    source: serde_yaml::Error,
  },

  #[error("contract name in {} must be a string", path.display())]
  InvalidContractName { path: PathBuf },
}

/// Where an invocation runs: inside a project root or on standalone files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
  root: PathBuf,
  is_project: bool,
}

impl ProjectContext {
  /// Inspect `dir` for the project markers.
  pub fn detect(dir: &Path) -> Self {
    let root = dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    let is_project = PROJECT_MARKERS.iter().all(|marker| root.join(marker).exists());
    debug!(root = %root.display(), is_project, "detected project context");
    Self { root, is_project }
  }

  pub fn new(root: PathBuf, is_project: bool) -> Self {
    Self { root, is_project }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn is_project(&self) -> bool {
    self.is_project
  }

  /// Root reported to generated glue scripts: the project root, or the OS temp root.
  pub fn glue_root(&self) -> PathBuf {
    if self.is_project {
      self.root.clone()
    } else {
      std::env::temp_dir()
    }
  }
}
