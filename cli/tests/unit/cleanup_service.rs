//! Tests for the one-off cleanup sweep service.

#![allow(clippy::expect_used)]

use fleetprobe::application::services::cleanup_service::sweep_backend;
use fleetprobe::domain::CleanupOutcome;

use crate::helpers::{DAEMON, labelled, stale};
use crate::mocks::{FakeBackend, FakeConnector, RecordingReporter};

#[tokio::test]
async fn sweep_reports_removed_and_failed_counts() {
    let backend = FakeBackend::new(DAEMON);
    backend.add_running(stale("s1", "old-1"));
    backend.add_stopped(stale("s2", "old-2"));
    backend.add_running(labelled("k1", "kept", "manual"));
    backend.fail_removal_of("s2");
    let reporter = RecordingReporter::default();

    let outcome = sweep_backend(
        &FakeConnector::new().with_backend(&backend),
        DAEMON,
        &reporter,
    )
    .await
    .expect("sweep");

    assert_eq!(
        outcome,
        CleanupOutcome::Swept {
            removed: 1,
            failed: 1
        }
    );
    assert_eq!(
        reporter.events(),
        vec![
            format!("step: Removing stale containers on {DAEMON}..."),
            "warn: 1 container(s) could not be removed".to_string(),
            "success: 1 stale container(s) removed".to_string(),
        ]
    );
}

#[tokio::test]
async fn sweep_fails_when_daemon_cannot_be_listed() {
    let backend = FakeBackend::new(DAEMON);
    backend.set_fail_list(true);

    let result = sweep_backend(
        &FakeConnector::new().with_backend(&backend),
        DAEMON,
        &RecordingReporter::default(),
    )
    .await;

    assert!(result.is_err());
    assert!(backend.removed().is_empty());
}

#[tokio::test]
async fn sweep_fails_when_connector_rejects_url() {
    let result = sweep_backend(
        &FakeConnector::new().reject("ssh://box"),
        "ssh://box",
        &RecordingReporter::default(),
    )
    .await;

    let err = result.expect_err("rejected");
    assert!(format!("{err:#}").contains("cannot connect to ssh://box"));
}
