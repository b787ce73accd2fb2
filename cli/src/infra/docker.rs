//! Docker infrastructure: implements `BackendConnector` and
//! `ContainerBackend` on top of the bollard Docker API client.

use std::collections::HashMap;

use anyhow::{Context, Result};
use bollard::container::{ListContainersOptions, RemoveContainerOptions};
use bollard::models::ContainerSummary;
use bollard::{API_DEFAULT_VERSION, Docker};

use crate::application::ports::{BackendConnector, BackendParams, ContainerBackend};
use crate::domain::{ContainerDescriptor, ContainerFilter};

/// Production connector: opens a bollard client for a daemon URL.
///
/// Supported URLs: `unix:///path/to/docker.sock`, `tcp://host:port`,
/// `http://host:port`. The backend identity is the normalised URL.
pub struct DockerConnector;

impl BackendConnector for DockerConnector {
    type Backend = DockerBackend;

    fn connect(&self, params: &BackendParams) -> Result<DockerBackend> {
        let identity = daemon_identity(&params.url)?;
        let docker = if identity.starts_with("unix://") {
            connect_unix(&identity, params.timeout_secs)?
        } else {
            Docker::connect_with_http(&identity, params.timeout_secs, API_DEFAULT_VERSION)
                .with_context(|| format!("cannot create Docker client for {identity}"))?
        };
        Ok(DockerBackend { docker, identity })
    }
}

/// Canonical form of a daemon URL, used as the backend identity.
///
/// `tcp://` and `http://` reach the same daemon, so both become `http://`
/// with a lowercased host. Socket paths are kept verbatim. Trailing `/` is
/// dropped.
fn daemon_identity(url: &str) -> Result<String> {
    let url = url.trim_end_matches('/');
    if url.starts_with("unix://") {
        return Ok(url.to_string());
    }
    let Some(rest) = url
        .strip_prefix("tcp://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        anyhow::bail!("unsupported Docker daemon URL: {url}");
    };
    let (host, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
    Ok(format!("http://{}{path}", host.to_ascii_lowercase()))
}

#[cfg(unix)]
fn connect_unix(url: &str, timeout_secs: u64) -> Result<Docker> {
    Docker::connect_with_unix(url, timeout_secs, API_DEFAULT_VERSION)
        .with_context(|| format!("cannot create Docker client for {url}"))
}

#[cfg(not(unix))]
fn connect_unix(url: &str, _timeout_secs: u64) -> Result<Docker> {
    anyhow::bail!("unix socket daemon URLs are not supported on this platform: {url}")
}

/// A Docker daemon reached through bollard.
pub struct DockerBackend {
    docker: Docker,
    identity: String,
}

impl ContainerBackend for DockerBackend {
    fn identity(&self) -> &str {
        &self.identity
    }

    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerDescriptor>> {
        let options = ListContainersOptions::<String> {
            all: filter.all,
            filters: to_filters(filter),
            ..Default::default()
        };
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .with_context(|| format!("listing containers on {}", self.identity))?;
        Ok(summaries.into_iter().map(to_descriptor).collect())
    }

    async fn remove_container(&self, id: &str, force: bool) -> Result<()> {
        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };
        self.docker
            .remove_container(id, Some(options))
            .await
            .with_context(|| format!("removing container {id} on {}", self.identity))
    }
}

/// Translate a domain filter into Docker's `filters` query map.
fn to_filters(filter: &ContainerFilter) -> HashMap<String, Vec<String>> {
    let mut filters = HashMap::new();
    if let Some(label) = &filter.label {
        filters.insert("label".to_string(), vec![label.clone()]);
    }
    if let Some(name) = &filter.name {
        filters.insert("name".to_string(), vec![name.clone()]);
    }
    filters
}

/// Translate a bollard container summary into a backend-neutral descriptor.
fn to_descriptor(summary: ContainerSummary) -> ContainerDescriptor {
    let network_settings = summary
        .network_settings
        .and_then(|ns| serde_json::to_value(ns).ok())
        .unwrap_or_default();
    ContainerDescriptor {
        id: summary.id.unwrap_or_default(),
        names: summary.names.unwrap_or_default(),
        labels: summary.labels.unwrap_or_default(),
        network_settings,
    }
}
