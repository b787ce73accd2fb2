//! Integration tests for `fleetprobe validate`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::fleetprobe;

fn config_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("write");
    (dir, path)
}

const VALID: &str = r#"
targets:
  main:
    docker_daemon_url: "unix:///var/run/docker.sock"
    workloads:
      - container_name: ubuntu-lg-example
        network_services:
          - { port: 22, username: root, password: root }
          - { port: 80, name: http }
"#;

#[test]
fn test_validate_accepts_valid_config() {
    let (_dir, path) = config_file(VALID);
    fleetprobe()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"))
        .stdout(predicate::str::contains("2 endpoint(s)"));
}

#[test]
fn test_validate_json_summary() {
    let (_dir, path) = config_file(VALID);
    let output = fleetprobe()
        .args(["validate", "--json", "--config"])
        .arg(&path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(value["valid"], true);
    assert_eq!(value["targets"][0]["endpoints"], 2);
}

#[test]
fn test_validate_reads_config_from_env() {
    let (_dir, path) = config_file(VALID);
    fleetprobe()
        .arg("validate")
        .env("FLEETPROBE_CONFIG", &path)
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_bad_scheme() {
    let (_dir, path) = config_file(
        r#"
targets:
  main:
    docker_daemon_url: "ftp://docker"
"#,
    );
    fleetprobe()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid docker_daemon_url"));
}

#[test]
fn test_validate_rejects_empty_targets() {
    let (_dir, path) = config_file("targets: {}\n");
    fleetprobe()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No targets configured"));
}

#[test]
fn test_validate_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fleetprobe()
        .arg("validate")
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_watch_with_invalid_config_fails_before_connecting() {
    let (_dir, path) = config_file("targets: {}\n");
    fleetprobe()
        .args(["watch", "--once", "--config"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No targets configured"));
}
