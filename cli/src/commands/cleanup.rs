//! `fleetprobe cleanup`: one stale-workload sweep against a single daemon.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::BackendConnector;
use crate::application::services::cleanup_service::sweep_backend;
use crate::domain::CleanupOutcome;
use crate::domain::config::is_valid_daemon_url;
use crate::output::reporter::TerminalReporter;

/// Arguments for the cleanup command.
#[derive(Args)]
pub struct CleanupArgs {
    /// Docker daemon URL, e.g. `unix:///var/run/docker.sock`
    pub docker_url: String,
}

/// Run the cleanup command.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the daemon cannot be listed.
pub async fn run(
    app: &AppContext,
    args: &CleanupArgs,
    connector: &impl BackendConnector,
) -> Result<()> {
    if !is_valid_daemon_url(&args.docker_url) {
        anyhow::bail!(
            "invalid Docker daemon URL: {}\n\nExpected unix://, tcp:// or http://",
            args.docker_url
        );
    }

    let reporter = TerminalReporter::new(&app.output);
    let outcome = sweep_backend(connector, &args.docker_url, &reporter).await?;

    let (removed, failed) = match outcome {
        CleanupOutcome::Swept { removed, failed } => (removed, failed),
        CleanupOutcome::AlreadyCleaned => (0, 0),
    };
    app.renderer().cleanup(&args.docker_url, removed, failed)
}
