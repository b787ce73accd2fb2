//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use fleetprobe_common::FleetConfig;

use crate::domain::{ContainerDescriptor, ContainerFilter};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Parameters needed to open a connection to one orchestration backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendParams {
    /// Backend address, e.g. `unix:///var/run/docker.sock`.
    pub url: String,
    /// Request timeout in seconds for backend API calls.
    pub timeout_secs: u64,
}

impl BackendParams {
    /// Default request timeout for backend API calls.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ── Backend Ports ─────────────────────────────────────────────────────────────

/// Container query and removal against one orchestration backend.
#[allow(async_fn_in_trait)]
pub trait ContainerBackend {
    /// Backend address string. Two handles with the same identity talk to
    /// the same backend and share one cleanup sweep.
    fn identity(&self) -> &str;

    /// List containers matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the query.
    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerDescriptor>>;

    /// Remove a container by id; `force` kills it first if running.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot perform the removal.
    async fn remove_container(&self, id: &str, force: bool) -> Result<()>;
}

/// Builds backend handles. The concrete backend is chosen by whoever
/// constructs the `FleetManager`.
pub trait BackendConnector {
    /// Backend handle produced by this connector.
    type Backend: ContainerBackend;

    /// Open a handle for `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are unusable (e.g. unknown scheme).
    fn connect(&self, params: &BackendParams) -> Result<Self::Backend>;
}

// ── Network Probe Port ────────────────────────────────────────────────────────

/// Single point-in-time reachability check of a network service.
///
/// Failure to connect is an outcome, not an error: implementations return
/// `false` and never propagate connection failures.
#[allow(async_fn_in_trait)]
pub trait EndpointProbe {
    /// Attempt one transport-level connection to `address:port`.
    async fn probe(&self, address: &str, port: u16) -> bool;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading of the fleet configuration file.
pub trait ConfigStore {
    /// Load and parse the fleet configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    fn load(&self) -> Result<FleetConfig>;

    /// Path the configuration is loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if no path can be determined (no home directory).
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
