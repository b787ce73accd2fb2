//! Application service: one-off stale-workload sweep.

use anyhow::{Context, Result};

use crate::application::ports::{BackendConnector, BackendParams, ProgressReporter};
use crate::application::services::backend_connection::BackendConnection;
use crate::domain::{CleanupLedger, CleanupOutcome};

/// Sweep containers labelled `lg_cleanup=auto` from the backend at `url`.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or listed.
pub async fn sweep_backend(
    connector: &impl BackendConnector,
    url: &str,
    reporter: &impl ProgressReporter,
) -> Result<CleanupOutcome> {
    let backend = connector
        .connect(&BackendParams::new(url))
        .with_context(|| format!("cannot connect to {url}"))?;
    let connection = BackendConnection::new(backend);

    reporter.step(&format!("Removing stale containers on {url}..."));
    let mut ledger = CleanupLedger::new();
    let outcome = connection.cleanup_stale_workloads(&mut ledger).await?;

    if let CleanupOutcome::Swept { removed, failed } = outcome {
        if failed > 0 {
            reporter.warn(&format!("{failed} container(s) could not be removed"));
        }
        reporter.success(&format!("{removed} stale container(s) removed"));
    }
    Ok(outcome)
}
