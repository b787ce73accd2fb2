use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ServiceDescriptor;

/// Fleet configuration file (`~/.fleetprobe/config.yaml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Poll scheduling
    #[serde(default)]
    pub poll: PollConfig,

    /// Targets keyed by name; iteration order is the poll order
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Poll scheduling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between poll cycles (default: 2)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Explicit connect timeout for reachability probes.
    /// When absent the operating system's connect timeout applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_timeout_secs: Option<u64>,
}

/// One device-under-test and the Docker daemon hosting its workloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Daemon URL, e.g. `unix:///var/run/docker.sock` or `tcp://10.0.0.5:2375`
    pub docker_daemon_url: String,

    /// Workloads whose services are tracked on this target
    #[serde(default)]
    pub workloads: Vec<WorkloadConfig>,
}

/// A container and the services it exposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub container_name: String,

    #[serde(default)]
    pub network_services: Vec<ServiceDescriptor>,
}

fn default_interval_secs() -> u64 {
    2
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            probe_timeout_secs: None,
        }
    }
}
