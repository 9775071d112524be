//! Sendboc command integration tests.

use predicates::prelude::*;

use super::common::{SAVEBOC_FIFT, TestEnv};

const DEPLOY_SCRIPT: &str = "<b b> 2 boc+>B build-path saveboc\n";

fn deploy_project() -> TestEnv {
  let env = TestEnv::project("");
  env.write_file("fift/deploy.fif", DEPLOY_SCRIPT);
  env.stub("fift", SAVEBOC_FIFT);
  env.cache_network_config();
  env
}

#[test]
fn sendboc_saves_and_sends_boc() {
  let env = deploy_project();
  env.stub("lite-client", r#"echo "$*" >> "$0.calls"; echo "external message status is 1""#);

  env
    .toncli_cmd()
    .args(["sendboc", "fift/deploy.fif"])
    .assert()
    .success()
    .stdout(predicate::str::contains("external message status is 1"))
    .stdout(predicate::str::contains("BOC sent to testnet"));

  assert_eq!(env.read("build/boc/deploy.boc"), "boc");
  assert!(env.read("build/cli.fif").contains("\"1\" constant is-project?"));

  let calls = env.calls("lite-client");
  assert_eq!(calls.len(), 1);
  assert!(calls[0].contains("-v 2 -c sendfile "));
  assert!(calls[0].ends_with("build/boc/deploy.boc"));
}

#[test]
fn sendboc_quiet_hides_lite_client_output() {
  let env = deploy_project();
  env.stub("lite-client", "echo 'external message status is 1'");

  env
    .toncli_cmd()
    .args(["sendboc", "--quiet", "fift/deploy.fif"])
    .assert()
    .success()
    .stdout(predicate::str::contains("external message status").not());
}

#[test]
fn sendboc_retries_refused_connection() {
  let env = deploy_project();
  env.stub(
    "lite-client",
    r#"echo "$*" >> "$0.calls"
if [ "$(wc -l < "$0.calls")" -lt 2 ]; then echo "Connection refused"; exit 1; fi
echo sent"#,
  );

  env
    .toncli_cmd()
    .args(["sendboc", "fift/deploy.fif"])
    .assert()
    .success()
    .stdout(predicate::str::contains("BOC sent"));

  assert_eq!(env.calls("lite-client").len(), 2);
}

#[test]
fn sendboc_gives_up_after_configured_tries() {
  let env = deploy_project();
  env.stub("lite-client", r#"echo "$*" >> "$0.calls"; echo "Connection refused""#);

  env
    .toncli_cmd()
    .args(["sendboc", "fift/deploy.fif"])
    .assert()
    .success()
    .stderr(predicate::str::contains("error in lite-client execution"))
    .stderr(predicate::str::contains("after 2 attempt(s)"));

  assert_eq!(env.calls("lite-client").len(), 2);
}

#[test]
fn sendboc_requires_saveboc() {
  let env = deploy_project();
  env.write_file("fift/noop.fif", "\"Asm.fif\" include\n");

  env
    .toncli_cmd()
    .args(["sendboc", "fift/noop.fif"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("you need to add saveboc"));

  assert!(env.calls("fift").is_empty());
  assert!(env.calls("lite-client").is_empty());
}

#[test]
fn sendboc_without_file_fails() {
  let env = deploy_project();

  env
    .toncli_cmd()
    .arg("sendboc")
    .assert()
    .failure()
    .stderr(predicate::str::contains("FIFT file path to sendboc"));
}
