//! Smoke tests for the ti83 binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ti83() -> Command {
    let mut cmd = Command::cargo_bin("ti83").expect("ti83 binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("TI83_CONFIG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    ti83()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    ti83()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("interactive"));
}

#[test]
fn test_no_args_fails() {
    ti83().assert().failure();
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_chained_addition() {
    ti83()
        .args(["--color", "never", "run", "5", "+", "3", "+", "2", "enter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10"))
        .stdout(predicate::str::contains("8 + 2"));
}

#[test]
fn test_run_accepts_quoted_script() {
    ti83()
        .args(["--color", "never", "run", "1 0 / 0 enter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error"))
        .stdout(predicate::str::contains("10 \u{f7} 0"));
}

#[test]
fn test_run_json_snapshot() {
    let output = ti83()
        .args(["run", "--json", "--wait", "1500", "4", "2", "mode"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["display"], "42");
    assert_eq!(value["state"]["degree_mode"], false);
    assert!(value["pending_restore_ms"].is_null());
}

#[test]
fn test_run_radians_flag() {
    let output = ti83()
        .args(["run", "--json", "--radians", "0", "cos"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["display"], "1");
    assert_eq!(value["state"]["degree_mode"], false);
}

#[test]
fn test_run_legacy_restore_flag() {
    let output = ti83()
        .args(["run", "--json", "--legacy-restore", "--wait", "1500", "1", "mode", "2"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["display"], "1");
    assert_eq!(value["state"]["current_input"], "12");
}

#[test]
fn test_run_requires_keys() {
    ti83().arg("run").assert().failure();
}

// ============================================================================
// eval / keys / config
// ============================================================================

#[test]
fn test_eval_prints_result() {
    ti83()
        .args(["eval", "(2+3)*4"])
        .assert()
        .success()
        .stdout(predicate::str::diff("20\n"));
}

#[test]
fn test_eval_error_exits_zero() {
    ti83()
        .args(["eval", "2+"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Error\n"));
}

#[test]
fn test_keys_lists_identifiers() {
    ti83()
        .args(["--color", "never", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enter"))
        .stdout(predicate::str::contains("(\u{2212})"))
        .stdout(predicate::str::contains("Ctrl-C"));
}

#[test]
fn test_config_defaults() {
    ti83()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("degree_mode: true"))
        .stdout(predicate::str::contains("message_duration_ms: 1500"));
}

#[test]
fn test_config_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ti83.yaml");
    fs::write(&path, "message_duration_ms: 200\nrestore_policy: legacy\n").unwrap();

    ti83()
        .args(["--config", path.to_str().unwrap(), "config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"message_duration_ms\": 200"))
        .stdout(predicate::str::contains("\"restore_policy\": \"legacy\""));
}

#[test]
fn test_config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ti83.yaml");
    fs::write(&path, "message_duration_ms: 200\n").unwrap();

    let output = ti83()
        .args(["--config", path.to_str().unwrap(), "run", "--json", "--wait", "200", "7", "mode"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["display"], "7");
}

#[test]
fn test_bad_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ti83.yaml");
    fs::write(&path, "degree_mode: [oops\n").unwrap();

    ti83()
        .args(["--config", path.to_str().unwrap(), "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML"));
}

#[test]
fn test_missing_config_file_fails() {
    ti83()
        .args(["--config", "/nonexistent/ti83.yaml", "keys"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
