//! Glue script generation.
//!
//! Before a BOC is produced, a short Fift fragment is written and loaded with
//! `fift -L` ahead of the user's script. It defines the constants the script
//! uses to find the project and the BOC destination.
//!
//! The project copy lives at `build/cli.fif`; two concurrent runs in the same
//! project overwrite each other's file.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::StageError;
use crate::artifacts::fresh_temp_dir;
use crate::consts::{BUILD_DIR, GLUE_FILE};
use crate::project::ProjectContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueScript {
  pub is_project: bool,
  pub project_root: PathBuf,
  pub build_path: PathBuf,
}

impl GlueScript {
  pub fn for_context(context: &ProjectContext, build_path: &Path) -> Self {
    Self {
      is_project: context.is_project(),
      project_root: context.glue_root(),
      build_path: build_path.to_path_buf(),
    }
  }

  /// Fift string literals have no escapes, so paths containing `"` are rejected.
  pub fn render(&self) -> Result<String, StageError> {
    Ok(format!(
      "// Generated by toncli before every run, do not edit\n\
       \"{}\" constant is-project?\n\
       \"{}\" constant project-root\n\
       \"{}\" constant build-path\n",
      if self.is_project { '1' } else { '0' },
      fift_string(&self.project_root)?,
      fift_string(&self.build_path)?,
    ))
  }

  /// Write the script: `{root}/build/cli.fif` in a project, a fresh temp file otherwise.
  pub async fn write(&self, context: &ProjectContext) -> Result<PathBuf, StageError> {
    let content = self.render()?;
    let path = if context.is_project() {
      let build_dir = context.root().join(BUILD_DIR);
      tokio::fs::create_dir_all(&build_dir).await?;
      build_dir.join(GLUE_FILE)
    } else {
      fresh_temp_dir()?.join(GLUE_FILE)
    };

    tokio::fs::write(&path, content)
      .await
      .map_err(|source| StageError::WriteOutput {
        path: path.clone(),
        source,
      })?;
    debug!(path = %path.display(), "glue script written");
    Ok(path)
  }
}

fn fift_string(path: &Path) -> Result<String, StageError> {
  let text = path.display().to_string();
  if text.contains('"') {
    return Err(StageError::UnquotablePath {
      path: path.to_path_buf(),
    });
  }
  Ok(text)
}
