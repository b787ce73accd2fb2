//! Tests for `YamlConfigStore` path resolution and loading.

#![allow(clippy::expect_used, unsafe_code)]

use std::path::PathBuf;

use fleetprobe::application::ports::ConfigStore;
use fleetprobe::domain::validate_fleet_config;
use fleetprobe::infra::config::{CONFIG_ENV, YamlConfigStore};
use serial_test::serial;

const VALID: &str = r#"
poll:
  interval_secs: 5
targets:
  main:
    docker_daemon_url: "unix:///var/run/docker.sock"
    workloads:
      - container_name: ubuntu-lg-example
        network_services:
          - { port: 22, username: root, password: root }
"#;

/// Restores (or clears) the config env var when dropped.
struct EnvGuard(Option<String>);

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        let previous = std::env::var(CONFIG_ENV).ok();
        // SAFETY: tests touching the environment are serialized with #[serial].
        unsafe { std::env::set_var(CONFIG_ENV, value) };
        Self(previous)
    }

    fn clear() -> Self {
        let previous = std::env::var(CONFIG_ENV).ok();
        // SAFETY: tests touching the environment are serialized with #[serial].
        unsafe { std::env::remove_var(CONFIG_ENV) };
        Self(previous)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests touching the environment are serialized with #[serial].
        unsafe {
            match &self.0 {
                Some(v) => std::env::set_var(CONFIG_ENV, v),
                None => std::env::remove_var(CONFIG_ENV),
            }
        }
    }
}

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("write config");
    path
}

#[test]
#[serial]
fn explicit_path_wins_over_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let explicit = write_config(&dir, VALID);
    let _env = EnvGuard::set(&dir.path().join("elsewhere.yaml"));

    let store = YamlConfigStore::new(Some(explicit.clone()));

    assert_eq!(store.path().expect("path"), explicit);
    let cfg = store.load().expect("load");
    assert_eq!(cfg.poll.interval_secs, 5);
    assert_eq!(cfg.targets["main"].workloads[0].network_services[0].port, 22);
    validate_fleet_config(&cfg).expect("valid");
}

#[test]
#[serial]
fn env_var_used_without_explicit_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, VALID);
    let _env = EnvGuard::set(&path);

    let store = YamlConfigStore::default();

    assert_eq!(store.path().expect("path"), path);
    assert!(store.load().expect("load").targets.contains_key("main"));
}

#[test]
#[serial]
fn default_path_is_under_home() {
    let _env = EnvGuard::clear();
    let path = YamlConfigStore::default().path().expect("path");
    assert!(path.ends_with(".fleetprobe/config.yaml"));
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = YamlConfigStore::new(Some(dir.path().join("absent.yaml")));

    let err = store.load().expect_err("missing file");
    assert!(format!("{err:#}").contains("config file not found"));
}

#[test]
#[serial]
fn malformed_yaml_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "targets: [not, a, map");
    let store = YamlConfigStore::new(Some(path));

    let err = store.load().expect_err("malformed");
    assert!(format!("{err:#}").contains("cannot parse"));
}

#[test]
#[serial]
fn empty_config_loads_but_fails_validation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "poll:\n  interval_secs: 2\n");
    let cfg = YamlConfigStore::new(Some(path)).load().expect("load");

    assert!(cfg.targets.is_empty());
    assert!(validate_fleet_config(&cfg).is_err());
}
