//! Integration tests for `agentship config` and config loading.
//!
//! Every test writes its config into a temp dir and passes it explicitly, so
//! nothing outside the temp dir is read.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentship() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentship"));
    cmd.env("NO_COLOR", "1").env_remove("AGENTSHIP_CONFIG");
    cmd
}

/// Write `json` to `<dir>/<name>` and return the dir.
fn config_dir(name: &str, json: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join(name), json).expect("write config");
    dir
}

#[test]
fn test_config_shows_resolved_values() {
    let dir = config_dir(
        "c.json",
        r#"{"user": "ubuntu", "hosts": ["server1", "root@server2:2222"], "appd-home": "/srv/appd"}"#,
    );
    agentship()
        .current_dir(dir.path())
        .args(["--config", "c.json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ubuntu@server1"))
        .stdout(predicate::str::contains("root@server2:2222"))
        .stdout(predicate::str::contains("/srv/appd"))
        .stdout(predicate::str::contains("AGENTSHIP_CONFIG"));
}

#[test]
fn test_config_never_prints_password() {
    let dir = config_dir("c.json", r#"{"hosts": ["server1"], "password": "hunter2"}"#);
    agentship()
        .current_dir(dir.path())
        .args(["--config", "c.json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redacted"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_json_output() {
    let dir = config_dir("c.json", r#"{"hosts": ["server1"], "parallel": 3}"#);
    let assert = agentship()
        .current_dir(dir.path())
        .args(["--config", "c.json", "--json", "config"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["user"], "appd");
    assert_eq!(value["parallel"], 3);
    assert_eq!(value["hosts"][0], "appd@server1");
}

#[test]
fn test_parallel_flag_overrides_config() {
    let dir = config_dir("c.json", r#"{"hosts": ["server1"], "parallel": 3}"#);
    let assert = agentship()
        .current_dir(dir.path())
        .args(["--config", "c.json", "--parallel", "7", "--json", "config"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["parallel"], 7);
}

#[test]
fn test_env_name_reads_config_env_file() {
    let dir = config_dir("config-staging.json", r#"{"hosts": ["stage1"]}"#);
    agentship()
        .current_dir(dir.path())
        .args(["--env", "staging", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appd@stage1"));
}

#[test]
fn test_config_env_var_is_used_as_default() {
    let dir = config_dir("from-env.json", r#"{"hosts": ["envhost"]}"#);
    agentship()
        .current_dir(dir.path())
        .env("AGENTSHIP_CONFIG", dir.path().join("from-env.json"))
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("appd@envhost"));
}

#[test]
fn test_config_without_hosts_is_fatal() {
    let dir = config_dir("c.json", r#"{"user": "appd"}"#);
    agentship()
        .current_dir(dir.path())
        .args(["--config", "c.json", "config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("You must define hosts"));
}

#[test]
fn test_config_with_password_and_keys_is_rejected() {
    let dir = config_dir(
        "c.json",
        r#"{"hosts": ["a"], "password": "x", "key_filename": "k.pem"}"#,
    );
    let assert = agentship()
        .current_dir(dir.path())
        .args(["--config", "c.json", "--json", "config"])
        .assert()
        .code(1);
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["code"], "CONFIG_INVALID");
}

#[test]
fn test_missing_config_file_names_path() {
    let dir = TempDir::new().unwrap();
    agentship()
        .current_dir(dir.path())
        .args(["--config", "nope.json", "config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.json"));
}
