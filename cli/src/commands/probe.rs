//! `fleetprobe probe`: one reachability check against an address and port.
//!
//! An unreachable service is a result, not a failure: the command exits 0
//! either way.

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::EndpointProbe;

/// Arguments for the probe command.
#[derive(Args)]
pub struct ProbeArgs {
    /// IP address or hostname to connect to
    pub address: String,

    /// TCP port
    pub port: u16,

    /// Give up after this many seconds (default: OS connect timeout)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ProbeArgs {
    /// Explicit connect timeout, if one was requested.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Run the probe command.
///
/// # Errors
///
/// Returns an error only if JSON output cannot be produced.
pub async fn run(app: &AppContext, args: &ProbeArgs, probe: &impl EndpointProbe) -> Result<()> {
    let reachable = probe.probe(&args.address, args.port).await;
    app.renderer().probe(&args.address, args.port, reachable)
}
