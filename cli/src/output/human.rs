//! Human-readable terminal renderer.

use fleetprobe_common::{EndpointSnapshot, FleetConfig, PollReport};
use owo_colors::OwoColorize as _;

use crate::output::OutputContext;

/// Renders fleet state as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("fleetprobe {version}");
        }
    }

    /// Render the endpoint table for one poll cycle.
    ///
    /// The header line is suppressed by `quiet`; rows are always printed.
    pub fn render_report(&self, report: &PollReport) {
        if !self.ctx.quiet {
            println!();
            self.ctx.header(&format!(
                "Endpoints at {} ({}/{} reachable)",
                report.observed_at.format("%H:%M:%S"),
                report.available_count(),
                report.endpoints.len()
            ));
            if report.failed > 0 {
                self.ctx
                    .warn(&format!("{} target(s) failed this cycle", report.failed));
            }
        }
        if report.endpoints.is_empty() {
            self.ctx.info("No endpoints configured.");
            return;
        }
        for snap in &report.endpoints {
            let state = availability_label(snap);
            let style = match state {
                "reachable" => self.ctx.styles.success,
                "unresolved" => self.ctx.styles.warning,
                _ => self.ctx.styles.error,
            };
            println!("  {}  {}", format_endpoint_row(snap), state.style(style));
        }
    }

    /// Render a single reachability check.
    pub fn render_probe(&self, address: &str, port: u16, reachable: bool) {
        if reachable {
            self.ctx.success(&format!("{address}:{port} reachable"));
        } else {
            self.ctx.warn(&format!("{address}:{port} unreachable"));
        }
    }

    /// Render a validated configuration summary.
    pub fn render_config_summary(&self, config: &FleetConfig, path: &std::path::Path) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.success(&format!("Configuration valid ({})", path.display()));
        self.ctx
            .kv("Interval:", &format!("{}s", config.poll.interval_secs));
        for (name, target) in &config.targets {
            let endpoints: usize = target
                .workloads
                .iter()
                .map(|w| w.network_services.len())
                .sum();
            self.ctx.kv(
                &format!("{name}:"),
                &format!(
                    "{} ({} workload(s), {endpoints} endpoint(s))",
                    target.docker_daemon_url,
                    target.workloads.len()
                ),
            );
        }
    }
}

/// State word shown for an endpoint.
#[must_use]
pub fn availability_label(snap: &EndpointSnapshot) -> &'static str {
    match (&snap.address, snap.available) {
        (None, _) => "unresolved",
        (Some(_), true) => "reachable",
        (Some(_), false) => "unreachable",
    }
}

/// Fixed-width table row without the state column.
#[must_use]
pub fn format_endpoint_row(snap: &EndpointSnapshot) -> String {
    let address = snap.address.as_deref().unwrap_or("-");
    format!(
        "{:<12} {:<24} {:<16} {:>21}",
        snap.target,
        snap.workload,
        snap.service,
        format!("{address}:{}", snap.port)
    )
}
