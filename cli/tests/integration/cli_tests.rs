//! Integration tests for the CLI surface: help, version, flag handling.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn agentship() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentship"));
    cmd.env("NO_COLOR", "1").env_remove("AGENTSHIP_CONFIG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    agentship().assert().code(2).stderr(predicate::str::contains(
        "Push monitoring agents to remote hosts over SSH",
    ));
}

#[test]
fn test_cli_help_lists_every_command() {
    let assert = agentship().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for cmd in ["deploy", "check", "prep", "install", "cleanup", "config", "version"] {
        assert!(out.contains(cmd), "help should list `{cmd}`:\n{out}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    agentship()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agentship"));
}

#[test]
fn test_version_command_shows_version() {
    agentship()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "agentship ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = agentship().args(["version", "--json"]).assert().success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

// --- Usage errors ---

#[test]
fn test_unknown_command_exits_two() {
    agentship().arg("rollback").assert().code(2);
}

#[test]
fn test_config_and_env_conflict() {
    agentship()
        .args(["--config", "a.json", "--env", "prod", "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_parallel_must_be_a_number() {
    agentship()
        .args(["--parallel", "many", "check"])
        .assert()
        .code(2);
}

// --- Config resolution errors ---

#[test]
fn test_no_config_source_is_an_error() {
    agentship()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No config file given"));
}

#[test]
fn test_invalid_env_name_is_rejected() {
    agentship()
        .args(["--env", "../etc", "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid environment name"));
}

#[test]
fn test_error_in_json_mode_is_a_json_object() {
    let assert = agentship().args(["--json", "check"]).assert().code(1);
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "COMMAND_FAILED");
}
