//! Build command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const TWO_CONTRACTS: &str = r#"
wallet:
  func:
    - func/stdlib.fc
    - func/wallet.fc
nft:
  func:
    - func/nft.fc
"#;

#[test]
fn build_project_compiles_every_contract() {
  let env = TestEnv::project(TWO_CONTRACTS);
  env.write_file("func/stdlib.fc", "stdlib\n");
  env.write_file("func/wallet.fc", "wallet\n");
  env.write_file("func/nft.fc", "nft\n");

  env
    .toncli_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 2 script(s)"))
    .stdout(predicate::str::contains("build/wallet.fif"))
    .stdout(predicate::str::contains("build/nft.fif"));

  assert_eq!(env.read("build/wallet.fif"), "stdlib\nwallet\n");
  assert_eq!(env.read("build/nft.fif"), "nft\n");
}

#[test]
fn build_forwards_compiler_args() {
  let env = TestEnv::project("wallet:\n  func:\n    - func/wallet.fc\n");
  env.write_file("func/wallet.fc", "wallet\n");
  env.stub(
    "func",
    r#"echo "$*" >> "$0.calls"
for f in "$@"; do [ -f "$f" ] && cat "$f"; done; exit 0"#,
  );

  env
    .toncli_cmd()
    .args(["build", "--func-args", "-A -P"])
    .assert()
    .success();

  let calls = env.calls("func");
  assert_eq!(calls.len(), 1);
  assert!(calls[0].starts_with("-A -P "));
  assert!(calls[0].ends_with("func/wallet.fc"));
}

#[test]
fn build_compiler_failure_reports_output() {
  let env = TestEnv::project("wallet:\n  func:\n    - func/wallet.fc\n");
  env.write_file("func/wallet.fc", "wallet\n");
  env.stub("func", "echo 'wallet.fc:3:1: error: undefined function'; exit 2");

  env
    .toncli_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("undefined function"));

  assert!(!env.work_dir().join("build/wallet.fif").exists());
}

#[test]
fn build_empty_contract_compiles_nothing() {
  let env = TestEnv::project("wallet:\n  func:\n    - func/wallet.fc\nempty:\n  func: []\n");
  env.write_file("func/wallet.fc", "wallet\n");

  env
    .toncli_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("contract 'empty' has no source files"));

  assert!(!env.work_dir().join("build/wallet.fif").exists());
}

#[test]
fn build_standalone_file_outside_project() {
  let env = TestEnv::new();
  env.write_file("counter.fc", "counter\n");

  env
    .toncli_cmd()
    .args(["build", "counter.fc"])
    .assert()
    .success()
    .stdout(predicate::str::contains("counter.fif"));

  assert!(!env.work_dir().join("build").exists());
}

#[test]
fn build_and_run_executes_each_script() {
  let env = TestEnv::project(TWO_CONTRACTS);
  env.write_file("func/stdlib.fc", "stdlib\n");
  env.write_file("func/wallet.fc", "wallet\n");
  env.write_file("func/nft.fc", "nft\n");

  env.toncli_cmd().args(["build", "--run"]).assert().success();

  let calls = env.calls("fift");
  assert_eq!(calls.len(), 2);
  assert!(calls[0].ends_with("build/wallet.fif"));
  assert!(calls[1].ends_with("build/nft.fif"));
}
