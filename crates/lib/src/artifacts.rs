//! Build artifact path resolution.
//!
//! Derives where compiled scripts, BOC files and address records for a source
//! file are written:
//!
//! ```text
//! project mode                          standalone mode
//! {root}/build/{name}.fif               {tmp}/{name}.fif
//! {root}/build/boc/{name}.boc           {tmp}/{name}.boc
//! {root}/build/{name}_address           {tmp}/{name}_address
//! ```
//!
//! `{tmp}` is a fresh directory created per resolution.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::{BOC_DIR, BOC_EXT, BUILD_DIR, SCRIPT_EXT};
use crate::project::ProjectContext;

/// Source files of a build together with the absolute paths of its outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
  pub source_files: Vec<PathBuf>,
  pub script: PathBuf,
  pub boc: PathBuf,
  pub address: PathBuf,
}

/// Final path segment up to its first `.` (`contract.v2.fc` -> `contract`).
pub fn basename(file: &Path) -> String {
  let name = file
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  match name.split_once('.') {
    Some((stem, _)) => stem.to_string(),
    None => name,
  }
}

/// Output paths of a contract declared in `project.yaml`.
pub fn contract_target(root: &Path, name: &str, source_files: Vec<PathBuf>) -> BuildTarget {
  let build_dir = root.join(BUILD_DIR);
  BuildTarget {
    source_files,
    script: build_dir.join(format!("{}.{}", name, SCRIPT_EXT)),
    boc: build_dir.join(BOC_DIR).join(format!("{}.{}", name, BOC_EXT)),
    address: build_dir.join(format!("{}_address", name)),
  }
}

/// Resolve the build outputs of `requested` in `context`.
///
/// Relative paths are taken relative to the context root. The only side effect
/// is creating a temporary directory when outputs can't live under `build/`.
pub fn resolve(context: &ProjectContext, requested: &Path) -> io::Result<BuildTarget> {
  let source = absolute(context.root(), requested);
  let name = basename(&source);

  if !context.is_project() {
    let dir = fresh_temp_dir()?;
    return Ok(BuildTarget {
      source_files: vec![source],
      script: dir.join(format!("{}.{}", name, SCRIPT_EXT)),
      boc: dir.join(format!("{}.{}", name, BOC_EXT)),
      address: dir.join(format!("{}_address", name)),
    });
  }

  let mut target = contract_target(context.root(), &name, vec![source]);

  let boc_dir = context.root().join(BUILD_DIR).join(BOC_DIR);
  if !boc_dir.is_dir() {
    let dir = fresh_temp_dir()?;
    target.boc = dir.join(format!("{}.{}", name, BOC_EXT));
    info!(
      missing = %boc_dir.display(),
      path = %target.boc.display(),
      "boc directory not found, saving BOC to a temporary directory"
    );
  }

  Ok(target)
}

/// Join `path` onto `base` unless it is already absolute.
pub fn absolute(base: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    base.join(path)
  }
}

/// Create a new, persistent temporary directory.
pub fn fresh_temp_dir() -> io::Result<PathBuf> {
  let dir = tempfile::Builder::new().prefix("toncli-").tempdir()?;
  Ok(dir.keep())
}
