//! Test utilities for toncli-lib.
//!
//! Stages are exercised against small `/bin/sh` scripts that stand in for
//! `func`, `fift` and `lite-client`.

use std::path::{Path, PathBuf};

use crate::config::{Config, Executables};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Write an executable `/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Compiler stub: prints every argument that names an existing file.
pub const CAT_SOURCES: &str = r#"for f in "$@"; do [ -f "$f" ] && cat "$f"; done; exit 0"#;

/// Stub that appends its arguments, one call per line, to `{0}.calls`.
pub const RECORD_ARGS: &str = r#"echo "$*" >> "$0.calls""#;

/// Lines recorded by a stub built on [`RECORD_ARGS`].
pub fn recorded_calls(stub: &Path) -> Vec<String> {
  let mut calls = stub.as_os_str().to_owned();
  calls.push(".calls");
  std::fs::read_to_string(PathBuf::from(calls))
    .map(|content| content.lines().map(str::to_string).collect())
    .unwrap_or_default()
}

/// A config whose executables are stubs in `dir`, with an empty fift-libs directory.
#[cfg(unix)]
pub fn stub_config(dir: &Path, func: &str, fift: &str, lite_client: &str) -> Config {
  std::fs::create_dir_all(dir.join("fift-libs")).unwrap();
  Config {
    executables: Executables {
      func: write_stub(dir, "func", func),
      fift: write_stub(dir, "fift", fift),
      lite_client: write_stub(dir, "lite-client", lite_client),
    },
    config_dir: dir.to_path_buf(),
    ..Config::default()
  }
}

/// Lay out a project root in `dir` with the given `project.yaml`.
pub fn scaffold_project(dir: &Path, project_yaml: &str) {
  for sub in ["func", "fift", "build/boc"] {
    std::fs::create_dir_all(dir.join(sub)).unwrap();
  }
  std::fs::write(dir.join("project.yaml"), project_yaml).unwrap();
}
