use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service name used when a descriptor does not declare one
pub const DEFAULT_SERVICE_NAME: &str = "NetworkService";

/// Login material attached to a network service.
///
/// Carried through to consumers of a resolved endpoint untouched; never
/// inspected during discovery.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    /// True when neither a username nor a password is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A network service declared by a workload, as written in the fleet config.
///
/// ```yaml
/// network_services:
///   - { port: 22, name: ssh, username: root, password: root }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl ServiceDescriptor {
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self {
            port,
            name: None,
            credentials: Credentials::default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Declared name, or [`DEFAULT_SERVICE_NAME`]
    #[must_use]
    pub fn service_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME)
    }

    /// Credentials, if any were declared
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        (!self.credentials.is_empty()).then_some(&self.credentials)
    }
}

/// Point-in-time view of one endpoint, for rendering and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSnapshot {
    pub target: String,
    pub workload: String,
    pub service: String,
    /// `None` until the backend has reported the workload's address
    pub address: Option<String>,
    pub port: u16,
    pub available: bool,
}

/// Endpoint snapshots collected after one poll cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollReport {
    pub observed_at: DateTime<Utc>,
    /// Connections whose reconcile completed
    pub reconciled: usize,
    /// Connections whose reconcile failed with a backend error
    pub failed: usize,
    pub endpoints: Vec<EndpointSnapshot>,
}

impl PollReport {
    /// Number of endpoints currently reachable
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.endpoints.iter().filter(|e| e.available).count()
    }
}
