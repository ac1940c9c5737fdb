use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the tokenguard binary.
#[allow(deprecated)]
fn tokenguard_cmd() -> Command {
    Command::cargo_bin("tokenguard").expect("tokenguard binary not found")
}

#[test]
fn help_works() {
    tokenguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("lint"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn subcommand_help_works() {
    tokenguard_cmd()
        .args(["audit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--reports-dir"));
}

#[test]
fn unknown_format_is_rejected() {
    tokenguard_cmd()
        .args(["lint", "--format", "xml"])
        .assert()
        .failure();
}
