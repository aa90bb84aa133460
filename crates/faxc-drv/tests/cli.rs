//! Exercises the `faxc` binary's `--fixture`/`--emit` surface end to end.

use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn summary_of_the_base_fixture_lists_both_types() {
    Command::cargo_bin("faxc")
        .unwrap()
        .args(["--fixture", "base", "--emit=summary"])
        .assert()
        .success()
        .stdout(contains("Base"))
        .stdout(contains("Main"));
}

#[test]
fn diagnostics_of_a_clean_fixture_reports_no_errors() {
    Command::cargo_bin("faxc")
        .unwrap()
        .args(["--fixture=base"])
        .assert()
        .success()
        .stdout(contains("no errors"));
}

#[test]
fn diagnostics_of_a_failing_fixture_reports_its_error() {
    Command::cargo_bin("faxc")
        .unwrap()
        .args(["--fixture=bad-assign"])
        .assert()
        .success()
        .stdout(contains("cannot assign"));
}

#[test]
fn missing_fixture_flag_is_an_error() {
    Command::cargo_bin("faxc")
        .unwrap()
        .assert()
        .failure()
        .stderr(contains("--fixture"));
}

#[test]
fn unknown_fixture_name_is_an_error() {
    Command::cargo_bin("faxc")
        .unwrap()
        .args(["--fixture", "nonexistent"])
        .assert()
        .failure();
}
