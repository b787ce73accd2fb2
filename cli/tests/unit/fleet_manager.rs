//! Tests for `FleetManager`: registration, workload claims, and polling.

#![allow(clippy::expect_used)]

use fleetprobe::application::ports::BackendParams;
use fleetprobe::application::services::FleetManager;
use fleetprobe::domain::FleetError;

use crate::helpers::{DAEMON, REMOTE_DAEMON, container, ssh, stale};
use crate::mocks::{FakeBackend, FakeConnector, ScriptedProbe};

fn fleet(connector: FakeConnector) -> FleetManager<FakeConnector, ScriptedProbe> {
    FleetManager::new(connector, ScriptedProbe::answering(true))
}

// ── register_backend ──────────────────────────────────────────────────────────

#[tokio::test]
async fn register_sweeps_stale_containers_and_marks_ready() {
    let backend = FakeBackend::new(DAEMON);
    backend.add_stopped(stale("s1", "old-run"));
    let mut fleet = fleet(FakeConnector::new().with_backend(&backend));

    let conn = fleet
        .register_backend("main", &BackendParams::new(DAEMON))
        .await
        .expect("register");

    assert!(conn.is_ready());
    assert_eq!(conn.identity(), DAEMON);
    assert_eq!(backend.removed(), vec!["s1"]);
    assert!(fleet.cleanup_ledger().is_cleaned(DAEMON));
}

#[tokio::test]
async fn register_same_target_twice_is_rejected() {
    let connector = FakeConnector::new();
    let mut fleet = fleet(connector.clone());
    fleet
        .register_backend("main", &BackendParams::new(DAEMON))
        .await
        .expect("first register");

    let err = fleet
        .register_backend("main", &BackendParams::new(REMOTE_DAEMON))
        .await
        .expect_err("duplicate target");

    assert_eq!(
        err,
        FleetError::DuplicateBackend {
            target: "main".to_string()
        }
    );
    assert_eq!(connector.connect_calls(), vec![DAEMON], "no second connect");
    assert_eq!(
        fleet.backend("main").expect("kept").identity(),
        DAEMON,
        "original registration unchanged"
    );
}

#[tokio::test]
async fn targets_sharing_a_daemon_are_swept_once() {
    let backend = FakeBackend::new(DAEMON);
    backend.add_running(stale("s1", "old-run"));
    let mut fleet = fleet(FakeConnector::new().with_backend(&backend));

    fleet
        .register_backend("dut-a", &BackendParams::new(DAEMON))
        .await
        .expect("register a");
    backend.add_running(stale("s2", "created-between"));
    fleet
        .register_backend("dut-b", &BackendParams::new(DAEMON))
        .await
        .expect("register b");

    assert_eq!(backend.removed(), vec!["s1"]);
    assert_eq!(fleet.cleanup_ledger().len(), 1);
    assert_eq!(fleet.targets().collect::<Vec<_>>(), vec!["dut-a", "dut-b"]);
}

#[tokio::test]
async fn register_connect_failure_reports_backend() {
    let mut fleet = fleet(FakeConnector::new().reject("ssh://box"));

    let err = fleet
        .register_backend("main", &BackendParams::new("ssh://box"))
        .await
        .expect_err("connect rejected");

    assert!(matches!(err, FleetError::BackendConnect { ref backend, .. } if backend == "ssh://box"));
    assert!(fleet.backend("main").is_none());
}

#[tokio::test]
async fn register_listing_failure_leaves_target_unregistered() {
    let backend = FakeBackend::new(DAEMON);
    backend.set_fail_list(true);
    let mut fleet = fleet(FakeConnector::new().with_backend(&backend));

    let err = fleet
        .register_backend("main", &BackendParams::new(DAEMON))
        .await
        .expect_err("listing fails");
    assert!(err.is_backend_failure());
    assert!(fleet.backend("main").is_none());
    assert!(fleet.cleanup_ledger().is_empty());

    // Daemon comes back: registration may be retried.
    backend.set_fail_list(false);
    fleet
        .register_backend("main", &BackendParams::new(DAEMON))
        .await
        .expect("retry succeeds");
}

// ── bind_workload_endpoints ───────────────────────────────────────────────────

#[tokio::test]
async fn bind_unknown_target_is_rejected() {
    let mut fleet = fleet(FakeConnector::new());

    let err = fleet
        .bind_workload_endpoints("nowhere", "sshd", &[ssh()])
        .expect_err("unknown target");

    assert_eq!(
        err,
        FleetError::UnknownTarget {
            target: "nowhere".to_string()
        }
    );
}

#[tokio::test]
async fn workload_is_owned_by_one_target() {
    let mut fleet = fleet(FakeConnector::new());
    fleet
        .register_backend("dut-a", &BackendParams::new(DAEMON))
        .await
        .expect("register a");
    fleet
        .register_backend("dut-b", &BackendParams::new(REMOTE_DAEMON))
        .await
        .expect("register b");

    fleet
        .bind_workload_endpoints("dut-a", "sshd", &[ssh()])
        .expect("first claim");
    let err = fleet
        .bind_workload_endpoints("dut-b", "sshd", &[ssh()])
        .expect_err("second target cannot claim");

    assert_eq!(
        err,
        FleetError::WorkloadClaimed {
            workload: "sshd".to_string(),
            owner: "dut-a".to_string()
        }
    );
    assert_eq!(fleet.owner_of("sshd"), Some("dut-a"));
    assert!(fleet.backend("dut-b").expect("b").endpoints("sshd").is_none());

    // The owner may keep adding services.
    fleet
        .bind_workload_endpoints("dut-a", "sshd", &[ssh()])
        .expect("owner rebinding is additive");
}

// ── poll ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn poll_discovers_then_reports_endpoints() {
    let backend = FakeBackend::new(DAEMON);
    let mut fleet = fleet(FakeConnector::new().with_backend(&backend));
    fleet
        .register_backend("main", &BackendParams::new(DAEMON))
        .await
        .expect("register");
    fleet
        .bind_workload_endpoints("main", "ubuntu-lg-example", &[ssh()])
        .expect("bind");

    let summary = fleet.poll().await;
    let report = fleet.report(&summary);
    assert_eq!(report.reconciled, 1);
    assert_eq!(report.available_count(), 0);
    assert_eq!(report.endpoints[0].address, None);

    backend.add_running(container("c1", "ubuntu-lg-example", "172.17.0.4"));
    let summary = fleet.poll().await;
    let report = fleet.report(&summary);
    assert_eq!(report.endpoints[0].address.as_deref(), Some("172.17.0.4"));
    assert!(report.endpoints[0].available);
    assert_eq!(fleet.probe().calls(), vec![("172.17.0.4".to_string(), 22)]);
}

#[tokio::test]
async fn poll_failure_is_isolated_per_connection() {
    let broken = FakeBackend::new(REMOTE_DAEMON);
    let healthy = FakeBackend::new(DAEMON);
    healthy.add_running(container("c1", "sshd", "172.17.0.2"));
    let mut fleet = fleet(
        FakeConnector::new()
            .with_backend(&broken)
            .with_backend(&healthy),
    );
    fleet
        .register_backend("a-remote", &BackendParams::new(REMOTE_DAEMON))
        .await
        .expect("register remote");
    fleet
        .register_backend("b-local", &BackendParams::new(DAEMON))
        .await
        .expect("register local");
    fleet
        .bind_workload_endpoints("a-remote", "web", &[ssh()])
        .expect("bind remote");
    fleet
        .bind_workload_endpoints("b-local", "sshd", &[ssh()])
        .expect("bind local");
    broken.set_fail_list(true);

    let summary = fleet.poll().await;

    assert_eq!(summary.reconciled, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].target, "a-remote");
    assert!(summary.failures[0].error.is_backend_failure());
    let local = fleet.backend("b-local").expect("local");
    assert!(local.endpoints("sshd").expect("endpoints")[0].is_available());
}

#[tokio::test]
async fn poll_with_no_backends_is_empty() {
    let mut fleet = fleet(FakeConnector::new());
    let summary = fleet.poll().await;
    assert_eq!(summary.reconciled, 0);
    assert!(summary.failures.is_empty());
    assert!(fleet.report(&summary).endpoints.is_empty());
}
