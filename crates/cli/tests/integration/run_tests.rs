//! Run and shell command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn run_passes_libs_and_script_args() {
  let env = TestEnv::new();
  let script = env.write_file("hello.fif", "\"hello\" type\n");

  env
    .toncli_cmd()
    .args(["run", "hello.fif", "alice", "42"])
    .assert()
    .success();

  assert_eq!(
    env.calls("fift"),
    vec![format!(
      "-I {} -s {} alice 42",
      env.config_dir().join("fift-libs").display(),
      script.display()
    )]
  );
}

#[test]
fn run_custom_fift_args_replace_libs() {
  let env = TestEnv::new();
  env.write_file("hello.fif", "\"hello\" type\n");

  env
    .toncli_cmd()
    .args(["run", "--fift-args", "-I /opt/libs", "hello.fif"])
    .assert()
    .success();

  let calls = env.calls("fift");
  assert_eq!(calls.len(), 1);
  assert!(calls[0].starts_with("-I /opt/libs -s "));
}

#[test]
fn run_fift_args_keep_quoted_paths_whole() {
  let env = TestEnv::new();
  let script = env.write_file("hello.fif", "\"hello\" type\n");
  env.stub("fift", r#"printf '%s|' "$@" >> "$0.calls"; echo >> "$0.calls""#);

  env
    .toncli_cmd()
    .args(["run", "--fift-args", "-I '/my libs'", "hello.fif"])
    .assert()
    .success();

  assert_eq!(env.calls("fift"), vec![format!("-I|/my libs|-s|{}|", script.display())]);
}

#[test]
fn run_rejects_unbalanced_quotes() {
  let env = TestEnv::new();
  env.write_file("hello.fif", "\"hello\" type\n");

  env
    .toncli_cmd()
    .args(["run", "--fift-args", "-I '/my libs", "hello.fif"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid --fift-args"));

  assert!(env.calls("fift").is_empty());
}

#[test]
fn run_with_build_compiles_project_first() {
  let env = TestEnv::project("wallet:\n  func:\n    - func/wallet.fc\n");
  env.write_file("func/wallet.fc", "wallet\n");
  env.write_file("fift/deploy.fif", "\"deploy\" type\n");

  env
    .toncli_cmd()
    .args(["run", "--build", "fift/deploy.fif"])
    .assert()
    .success();

  assert_eq!(env.read("build/wallet.fif"), "wallet\n");
  assert_eq!(env.calls("fift").len(), 1);
}

#[test]
fn run_failure_is_reported() {
  let env = TestEnv::new();
  env.write_file("broken.fif", "oops\n");
  env.stub("fift", "echo 'oops: undefined word' >&2; exit 1");

  env
    .toncli_cmd()
    .args(["run", "broken.fif"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Run failed"));
}

#[test]
fn shell_starts_interactive_fift() {
  let env = TestEnv::new();

  env.toncli_cmd().arg("shell").write_stdin("bye\n").assert().success();

  assert_eq!(
    env.calls("fift"),
    vec![format!("-I {} -i", env.config_dir().join("fift-libs").display())]
  );
}
