//! `fleetprobe watch`: discover endpoints and poll their reachability.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use fleetprobe_common::FleetConfig;
use tokio::time::MissedTickBehavior;

use crate::app::AppContext;
use crate::application::ports::{BackendConnector, ConfigStore, EndpointProbe};
use crate::application::services::fleet_setup::build_fleet;
use crate::domain::{ConfigError, validate_fleet_config};
use crate::infra::network::TcpEndpointProbe;
use crate::output::progress;
use crate::output::reporter::TerminalReporter;

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Seconds between poll cycles (overrides the config file)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

impl WatchArgs {
    /// Effective poll interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] for a zero interval.
    pub fn interval(&self, config: &FleetConfig) -> Result<Duration, ConfigError> {
        match self.interval.unwrap_or(config.poll.interval_secs) {
            0 => Err(ConfigError::ZeroInterval),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

/// Probe configured from the `poll` section.
#[must_use]
pub fn probe_for(config: &FleetConfig) -> TcpEndpointProbe {
    match config.poll.probe_timeout_secs {
        Some(secs) => TcpEndpointProbe::with_timeout(Duration::from_secs(secs)),
        None => TcpEndpointProbe::new(),
    }
}

/// Run the watch command.
///
/// `make_probe` builds the reachability probe once the configuration is
/// loaded; production passes [`probe_for`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any target fails to
/// register. Failures during polling are reported per cycle, not returned.
pub async fn run<C, P>(
    app: &AppContext,
    args: &WatchArgs,
    store: &impl ConfigStore,
    connector: C,
    make_probe: impl FnOnce(&FleetConfig) -> P,
) -> Result<()>
where
    C: BackendConnector,
    P: EndpointProbe,
{
    let config = store.load()?;
    validate_fleet_config(&config)?;
    let period = args.interval(&config)?;
    let probe = make_probe(&config);

    let reporter = TerminalReporter::new(&app.output);
    let mut fleet = build_fleet(&config, connector, probe, &reporter)
        .await
        .context("fleet setup failed")?;
    tracing::info!(
        targets = config.targets.len(),
        interval_secs = period.as_secs(),
        "watching fleet"
    );

    let renderer = app.renderer();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping");
                break;
            }
        }

        let pb = progress::spinner(&app.output, "Polling endpoints...");
        let summary = fleet.poll().await;
        progress::finish_clear(&pb);

        renderer.report(&fleet.report(&summary))?;
        if args.once {
            break;
        }
    }
    Ok(())
}
