//! End-to-end tests for the `harness` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn harness() -> Command {
    Command::cargo_bin("harness").unwrap()
}

#[test]
fn check_passes_in_the_project_tree() {
    harness()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ linkage"))
        .stdout(predicate::str::contains("✓ layout"))
        .stdout(predicate::str::contains("✓ runtime"))
        .stdout(predicate::str::contains("✓ environment"));
}

#[test]
fn check_emits_json_when_asked() {
    harness()
        .args(["check", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcomes\""))
        .stdout(predicate::str::contains("\"started_at\""));
}

#[test]
fn check_fails_against_an_incomplete_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), "[workspace]\n").unwrap();

    harness()
        .arg("check")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ layout"))
        .stdout(predicate::str::contains("README.md"))
        .stderr(predicate::str::contains("sanity checks failed"));
}

#[test]
fn checks_lists_names_and_descriptions() {
    harness()
        .arg("checks")
        .assert()
        .success()
        .stdout(predicate::str::contains("linkage"))
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("runtime"))
        .stdout(predicate::str::contains("environment"))
        .stdout(predicate::str::contains("key-value mapping"));
}

#[test]
fn root_prints_the_workspace_root() {
    let output = harness().arg("root").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let root = std::path::PathBuf::from(stdout.trim());

    assert!(root.join("Cargo.toml").is_file());
    assert!(root.join("testkit").is_dir());
}

#[test]
fn root_fails_outside_any_workspace() {
    let dir = tempfile::tempdir().unwrap();

    harness()
        .arg("root")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No workspace manifest"));
}

#[test]
fn env_reports_variable_count_and_names() {
    harness()
        .arg("env")
        .env("HARNESS_CLI_PROBE", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("environment variables"))
        .stdout(predicate::str::contains("HARNESS_CLI_PROBE"));
}

#[test]
fn env_emits_json_when_asked() {
    harness()
        .args(["env", "--json"])
        .env("HARNESS_CLI_PROBE_JSON", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("HARNESS_CLI_PROBE_JSON"));
}
