//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Fleet errors ──────────────────────────────────────────────────────────────

/// Errors raised while registering backends, binding workloads, and polling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("Target '{target}' already has a backend. Only one backend is allowed per target.")]
    DuplicateBackend { target: String },

    #[error("Target '{target}' has no registered backend.")]
    UnknownTarget { target: String },

    #[error("Cannot connect to backend {backend}: {reason}")]
    BackendConnect { backend: String, reason: String },

    #[error("Backend {backend} query failed: {reason}")]
    BackendQuery { backend: String, reason: String },

    #[error("Failed to remove container {id} on {backend}: {reason}")]
    WorkloadRemoval {
        backend: String,
        id: String,
        reason: String,
    },

    #[error("Workload '{workload}' is already bound to target '{owner}'.")]
    WorkloadClaimed { workload: String, owner: String },

    #[error(
        "Invalid workload name '{0}': must match ^[a-zA-Z0-9][a-zA-Z0-9_.-]*$ (max 253 chars)"
    )]
    InvalidWorkloadName(String),

    #[error("Invalid service descriptor for workload '{workload}': {reason}")]
    InvalidDescriptor { workload: String, reason: String },
}

impl FleetError {
    /// Whether this error reflects a failure to talk to the backend itself,
    /// as opposed to a rejected request.
    #[must_use]
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::BackendQuery { .. } | Self::BackendConnect { .. })
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors found while validating a fleet configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("No targets configured. Add at least one entry under 'targets:'.")]
    NoTargets,

    #[error("Target '{target}': invalid docker_daemon_url '{url}'\n\nValid schemes: {valid}")]
    InvalidDaemonUrl {
        target: String,
        url: String,
        valid: String,
    },

    #[error("Target '{target}': workload '{workload}' is declared more than once")]
    DuplicateWorkload { target: String, workload: String },

    #[error("poll.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("poll.probe_timeout_secs must be greater than zero")]
    ZeroProbeTimeout,
}
