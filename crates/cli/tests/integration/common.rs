//! Shared test helpers for CLI integration tests.
//!
//! `func`, `fift` and `lite-client` are replaced by small `/bin/sh` scripts
//! selected through the `TONCLI_*` environment overrides.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Compiler stub: prints every argument that names an existing file.
pub const CAT_SOURCES: &str = r#"for f in "$@"; do [ -f "$f" ] && cat "$f"; done; exit 0"#;

/// Stub that appends its arguments, one call per line, to `{0}.calls`.
pub const RECORD_ARGS: &str = r#"echo "$*" >> "$0.calls""#;

/// Interpreter stub for `sendboc`: records its arguments and writes the BOC
/// named by the glue library passed after `-L`.
pub const SAVEBOC_FIFT: &str = r#"echo "$*" >> "$0.calls"
boc=$(sed -n 's/^"\(.*\)" constant build-path$/\1/p' "$4")
printf 'boc' > "$boc""#;

/// Isolated test environment.
///
/// Each test gets its own config directory, stub tools and working directory.
pub struct TestEnv {
  _temp: TempDir,
  root: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let env = Self { _temp: temp, root };
    std::fs::create_dir_all(env.config_dir().join("fift-libs")).unwrap();
    std::fs::create_dir_all(env.tools_dir()).unwrap();
    std::fs::create_dir_all(env.work_dir()).unwrap();
    env.stub("func", CAT_SOURCES);
    env.stub("fift", RECORD_ARGS);
    env.stub("lite-client", RECORD_ARGS);
    env
  }

  /// A project layout in the working directory with the given `project.yaml`.
  pub fn project(yaml: &str) -> Self {
    let env = Self::new();
    for dir in ["func", "fift", "build/boc"] {
      std::fs::create_dir_all(env.work_dir().join(dir)).unwrap();
    }
    env.write_file("project.yaml", yaml);
    env
  }

  pub fn config_dir(&self) -> PathBuf {
    self.root.join("config")
  }

  pub fn tools_dir(&self) -> PathBuf {
    self.root.join("tools")
  }

  /// Directory the binary runs in.
  pub fn work_dir(&self) -> PathBuf {
    self.root.join("work")
  }

  /// Replace the stub for `tool` with `body`.
  pub fn stub(&self, tool: &str, body: &str) -> PathBuf {
    let path = self.tools_dir().join(tool);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Arguments of every call made to a stub built on [`RECORD_ARGS`].
  pub fn calls(&self, tool: &str) -> Vec<String> {
    std::fs::read_to_string(self.tools_dir().join(format!("{}.calls", tool)))
      .map(|content| content.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Write a file relative to the working directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.work_dir().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Pretend the testnet config was already downloaded.
  pub fn cache_network_config(&self) {
    std::fs::write(self.config_dir().join("testnet.config.json"), "{}").unwrap();
  }

  /// Get a pre-configured Command for the toncli binary.
  ///
  /// Sets `TONCLI_CONFIG_DIR` and the `TONCLI_FUNC`, `TONCLI_FIFT` and
  /// `TONCLI_LITE_CLIENT` overrides, and runs in [`TestEnv::work_dir`].
  pub fn toncli_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("toncli");
    cmd.current_dir(self.work_dir());
    cmd.env_remove("RUST_LOG");
    cmd.env("TONCLI_CONFIG_DIR", self.config_dir());
    cmd.env("TONCLI_FUNC", self.tools_dir().join("func"));
    cmd.env("TONCLI_FIFT", self.tools_dir().join("fift"));
    cmd.env("TONCLI_LITE_CLIENT", self.tools_dir().join("lite-client"));
    cmd
  }

  pub fn read(&self, relative_path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(self.work_dir().join(relative_path)).unwrap()
  }
}
