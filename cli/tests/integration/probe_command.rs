//! Integration tests for `fleetprobe probe` against loopback listeners.

#![allow(clippy::expect_used)]

use std::net::TcpListener;

use predicates::prelude::*;

use crate::cli_tests::fleetprobe;

#[test]
fn test_probe_listening_port_is_reachable() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    fleetprobe()
        .args(["probe", "127.0.0.1", &port.to_string(), "--timeout", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reachable"))
        .stdout(predicate::str::contains("unreachable").not());
}

#[test]
fn test_probe_closed_port_exits_zero() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    fleetprobe()
        .args(["probe", "127.0.0.1", &port.to_string(), "--timeout", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unreachable"));
}

#[test]
fn test_probe_json_reports_result() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    let output = fleetprobe()
        .args(["probe", "127.0.0.1", &port.to_string(), "--json"])
        .output()
        .expect("run");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(value["reachable"], true);
    assert_eq!(value["port"], port);
}

#[test]
fn test_probe_rejects_out_of_range_port() {
    fleetprobe()
        .args(["probe", "127.0.0.1", "70000"])
        .assert()
        .code(2);
}
