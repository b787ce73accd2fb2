//! JSON output helpers.
//!
//! Every `--json` code path writes a single pretty-printed document to
//! stdout: a result object on success, or the error object below on failure.

use anyhow::{Context, Result};
use fleetprobe_common::{FleetConfig, PollReport};

/// Format a JSON error object.
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format one poll cycle.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &PollReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}

/// Format the result of a single reachability check.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_probe(address: &str, port: u16, reachable: bool) -> Result<String> {
    let obj = serde_json::json!({
        "address": address,
        "port": port,
        "reachable": reachable,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the result of a cleanup sweep.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_cleanup(backend: &str, removed: usize, failed: usize) -> Result<String> {
    let obj = serde_json::json!({
        "backend": backend,
        "removed": removed,
        "failed": failed,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a validated configuration summary.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_config_summary(config: &FleetConfig) -> Result<String> {
    let targets: Vec<_> = config
        .targets
        .iter()
        .map(|(name, target)| {
            serde_json::json!({
                "name": name,
                "docker_daemon_url": target.docker_daemon_url,
                "workloads": target.workloads.len(),
                "endpoints": target
                    .workloads
                    .iter()
                    .map(|w| w.network_services.len())
                    .sum::<usize>(),
            })
        })
        .collect();
    let obj = serde_json::json!({
        "valid": true,
        "interval_secs": config.poll.interval_secs,
        "targets": targets,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Prints each command result as one JSON document on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(self, version: &str) -> Result<()> {
        let obj = serde_json::json!({ "version": version });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(self, report: &PollReport) -> Result<()> {
        println!("{}", format_report(report)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_probe(self, address: &str, port: u16, reachable: bool) -> Result<()> {
        println!("{}", format_probe(address, port, reachable)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_cleanup(self, backend: &str, removed: usize, failed: usize) -> Result<()> {
        println!("{}", format_cleanup(backend, removed, failed)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_summary(self, config: &FleetConfig) -> Result<()> {
        println!("{}", format_config_summary(config)?);
        Ok(())
    }
}
