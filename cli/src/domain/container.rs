//! Container descriptors as reported by an orchestration backend.
//!
//! Backend-neutral: infrastructure adapters translate their client's
//! container summaries into [`ContainerDescriptor`].

use std::collections::HashMap;

use fleetprobe_common::{cleanup, network};
use serde_json::Value;

/// A container known to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerDescriptor {
    pub id: String,
    /// Names as the backend reports them. Docker prefixes each with `/`.
    pub names: Vec<String>,
    pub labels: HashMap<String, String>,
    /// Runtime network attributes, one entry per network attachment.
    pub network_settings: Value,
}

impl ContainerDescriptor {
    /// Whether any of the container's names is exactly `name`.
    ///
    /// A leading `/` on the reported name is ignored; no partial matching.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names
            .iter()
            .any(|n| n.strip_prefix('/').unwrap_or(n) == name)
    }

    /// First reported name without the leading `/`, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map_or(self.id.as_str(), |n| n.strip_prefix('/').unwrap_or(n))
    }

    /// Whether the container is tagged for removal by the startup sweep.
    #[must_use]
    pub fn is_auto_cleanup(&self) -> bool {
        cleanup::is_auto(self.labels.get(cleanup::LABEL).map(String::as_str))
    }

    /// Assigned IP address, if the backend reports one.
    #[must_use]
    pub fn ip_address(&self) -> Option<String> {
        find_ip_address(&self.network_settings)
    }
}

/// Depth-first search for the first non-empty `IPAddress` string.
///
/// Docker reports an empty top-level `IPAddress` for containers attached
/// only to user-defined networks, so empty values are skipped.
#[must_use]
pub fn find_ip_address(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            match map.get(network::IP_ADDRESS_KEY) {
                Some(Value::String(addr)) if !addr.is_empty() => Some(addr.clone()),
                _ => map.values().find_map(find_ip_address),
            }
        }
        Value::Array(items) => items.iter().find_map(find_ip_address),
        _ => None,
    }
}

/// Selection passed to a backend's container listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFilter {
    /// Include stopped containers.
    pub all: bool,
    /// Only containers carrying this label key.
    pub label: Option<String>,
    /// Only containers whose name contains this string. Backends may match
    /// loosely; callers re-check with [`ContainerDescriptor::has_name`].
    pub name: Option<String>,
}

impl ContainerFilter {
    /// Every container, running or stopped, carrying the cleanup label.
    #[must_use]
    pub fn cleanup_candidates() -> Self {
        Self {
            all: true,
            label: Some(cleanup::LABEL.to_string()),
            name: None,
        }
    }

    /// Live containers whose name matches `name`.
    #[must_use]
    pub fn live_named(name: &str) -> Self {
        Self {
            all: false,
            label: None,
            name: Some(name.to_string()),
        }
    }
}
