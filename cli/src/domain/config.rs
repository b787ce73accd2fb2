//! Validators for fleet configuration and workload bindings.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use anyhow::Result;
use fleetprobe_common::{FleetConfig, ServiceDescriptor};
use regex::Regex;

use crate::domain::error::{ConfigError, FleetError};

// ── Constants ────────────────────────────────────────────────────────────────

/// Accepted `docker_daemon_url` schemes.
pub const VALID_DAEMON_SCHEMES: &[&str] = &["unix://", "tcp://", "http://"];

/// Docker's own container-name rule, capped at a DNS name length.
pub static WORKLOAD_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern and cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]{0,252}$").expect("valid regex")
});

// ── Binding validators ───────────────────────────────────────────────────────

/// Validates a workload (container) name.
///
/// # Errors
///
/// Returns [`FleetError::InvalidWorkloadName`] if the name is empty, too
/// long, or contains characters Docker does not allow.
pub fn validate_workload_name(name: &str) -> Result<(), FleetError> {
    if WORKLOAD_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(FleetError::InvalidWorkloadName(name.to_string()))
    }
}

/// Validates one service descriptor of `workload`.
///
/// # Errors
///
/// Returns [`FleetError::InvalidDescriptor`] for port 0 or a blank name.
pub fn validate_descriptor(
    workload: &str,
    descriptor: &ServiceDescriptor,
) -> Result<(), FleetError> {
    if descriptor.port == 0 {
        return Err(FleetError::InvalidDescriptor {
            workload: workload.to_string(),
            reason: "port must be between 1 and 65535".to_string(),
        });
    }
    if descriptor.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(FleetError::InvalidDescriptor {
            workload: workload.to_string(),
            reason: "service name must not be blank".to_string(),
        });
    }
    Ok(())
}

// ── Config validators ────────────────────────────────────────────────────────

/// Validates a daemon URL scheme.
#[must_use]
pub fn is_valid_daemon_url(url: &str) -> bool {
    VALID_DAEMON_SCHEMES
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

/// Validates a whole fleet configuration before any backend is contacted.
///
/// # Errors
///
/// Returns the first violation found: no targets, a bad daemon URL, a
/// duplicate or invalid workload, an invalid service, or a zero interval.
pub fn validate_fleet_config(config: &FleetConfig) -> Result<()> {
    if config.poll.interval_secs == 0 {
        return Err(ConfigError::ZeroInterval.into());
    }
    if config.poll.probe_timeout_secs == Some(0) {
        return Err(ConfigError::ZeroProbeTimeout.into());
    }
    if config.targets.is_empty() {
        return Err(ConfigError::NoTargets.into());
    }
    for (target, target_cfg) in &config.targets {
        if !is_valid_daemon_url(&target_cfg.docker_daemon_url) {
            return Err(ConfigError::InvalidDaemonUrl {
                target: target.clone(),
                url: target_cfg.docker_daemon_url.clone(),
                valid: VALID_DAEMON_SCHEMES.join(", "),
            }
            .into());
        }
        let mut seen = BTreeSet::new();
        for workload in &target_cfg.workloads {
            validate_workload_name(&workload.container_name)?;
            if !seen.insert(workload.container_name.as_str()) {
                return Err(ConfigError::DuplicateWorkload {
                    target: target.clone(),
                    workload: workload.container_name.clone(),
                }
                .into());
            }
            for service in &workload.network_services {
                validate_descriptor(&workload.container_name, service)?;
            }
        }
    }
    Ok(())
}
