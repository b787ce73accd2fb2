//! One orchestration backend: stale-workload cleanup, workload binding,
//! address resolution and reachability polling.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use fleetprobe_common::{EndpointSnapshot, ServiceDescriptor};

use crate::application::ports::{ContainerBackend, EndpointProbe};
use crate::domain::{
    CleanupLedger, CleanupOutcome, ContainerFilter, Endpoint, FleetError, validate_descriptor,
    validate_workload_name,
};

/// Endpoints of one workload, in declaration order.
#[derive(Debug)]
struct WorkloadEndpoints {
    name: String,
    endpoints: Vec<Endpoint>,
}

/// A live handle to one backend and the endpoints discovered through it.
#[derive(Debug)]
pub struct BackendConnection<B> {
    backend: B,
    workloads: Vec<WorkloadEndpoints>,
    ready: bool,
}

impl<B: ContainerBackend> BackendConnection<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            workloads: Vec::new(),
            ready: false,
        }
    }

    /// Backend address used as the cleanup dedup key.
    #[must_use]
    pub fn identity(&self) -> &str {
        self.backend.identity()
    }

    /// Whether registration (including the cleanup sweep) has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Remove containers left behind by earlier runs.
    ///
    /// Runs at most once per backend identity recorded in `ledger`. Every
    /// container labelled `lg_cleanup=auto` (running or stopped) is
    /// force-removed. A failed removal is logged and skipped; the identity
    /// is recorded once the sweep completes regardless, so failed removals
    /// are never retried through this ledger.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::BackendQuery`] if the container listing fails.
    /// Nothing is recorded in that case.
    pub async fn cleanup_stale_workloads(
        &self,
        ledger: &mut CleanupLedger,
    ) -> Result<CleanupOutcome, FleetError> {
        let identity = self.backend.identity();
        if ledger.is_cleaned(identity) {
            tracing::debug!(backend = %identity, "backend already cleaned, skipping sweep");
            return Ok(CleanupOutcome::AlreadyCleaned);
        }

        let candidates = self
            .backend
            .list_containers(&ContainerFilter::cleanup_candidates())
            .await
            .map_err(|e| query_error(identity, &e))?;

        let mut removed = 0;
        let mut failed = 0;
        for container in candidates.iter().filter(|c| c.is_auto_cleanup()) {
            tracing::info!(
                backend = %identity,
                container = %container.display_name(),
                "Deleting container"
            );
            match self.backend.remove_container(&container.id, true).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    let err = FleetError::WorkloadRemoval {
                        backend: identity.to_string(),
                        id: container.id.clone(),
                        reason: format!("{e:#}"),
                    };
                    tracing::warn!(error = %err, "stale container not removed");
                    failed += 1;
                }
            }
        }

        ledger.mark_cleaned(identity);
        Ok(CleanupOutcome::Swept { removed, failed })
    }

    /// Create one unresolved endpoint per descriptor for `workload`.
    ///
    /// Additive: existing endpoints of the workload are kept and the new ones
    /// are appended in declaration order. Returns the number added.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::InvalidWorkloadName`] or
    /// [`FleetError::InvalidDescriptor`]; nothing is added in that case.
    pub fn bind_workload_endpoints(
        &mut self,
        workload: &str,
        descriptors: &[ServiceDescriptor],
    ) -> Result<usize, FleetError> {
        validate_workload_name(workload)?;
        for descriptor in descriptors {
            validate_descriptor(workload, descriptor)?;
        }
        if descriptors.is_empty() {
            return Ok(0);
        }

        let new_endpoints = descriptors.iter().map(Endpoint::from_descriptor);
        if let Some(existing) = self.workloads.iter_mut().find(|w| w.name == workload) {
            existing.endpoints.extend(new_endpoints);
        } else {
            self.workloads.push(WorkloadEndpoints {
                name: workload.to_string(),
                endpoints: new_endpoints.collect(),
            });
        }
        tracing::debug!(
            backend = %self.backend.identity(),
            workload,
            count = descriptors.len(),
            "bound workload endpoints"
        );
        Ok(descriptors.len())
    }

    /// One discovery-and-probe pass over every endpoint.
    ///
    /// Each unresolved endpoint gets one name lookup; each resolved endpoint
    /// gets one probe whose result replaces its availability. Unresolved
    /// endpoints are always unavailable. There is no internal retry: callers
    /// schedule repeated passes.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::BackendQuery`] if a lookup fails. Endpoints
    /// handled before the failure keep their updated state.
    pub async fn reconcile(&mut self, probe: &impl EndpointProbe) -> Result<(), FleetError> {
        for workload in &mut self.workloads {
            for endpoint in &mut workload.endpoints {
                if !endpoint.is_resolved() {
                    let found = lookup_address(&self.backend, &workload.name).await?;
                    if let Some(address) = found.filter(|a| endpoint.resolve(a)) {
                        tracing::debug!(
                            backend = %self.backend.identity(),
                            workload = %workload.name,
                            address = %address,
                            "resolved endpoint address"
                        );
                    }
                }

                let Some(address) = endpoint.address().map(str::to_owned) else {
                    endpoint.mark_unavailable();
                    continue;
                };
                let reachable = probe.probe(&address, endpoint.port()).await;
                endpoint.record_probe(reachable);
            }
        }
        Ok(())
    }

    /// Endpoints bound for `workload`, in declaration order.
    #[must_use]
    pub fn endpoints(&self, workload: &str) -> Option<&[Endpoint]> {
        self.workloads
            .iter()
            .find(|w| w.name == workload)
            .map(|w| w.endpoints.as_slice())
    }

    /// Names of workloads with at least one endpoint, in binding order.
    pub fn workloads(&self) -> impl Iterator<Item = &str> {
        self.workloads.iter().map(|w| w.name.as_str())
    }

    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.workloads.iter().map(|w| w.endpoints.len()).sum()
    }

    /// Snapshot every endpoint, labelled with `target`.
    #[must_use]
    pub fn snapshot(&self, target: &str) -> Vec<EndpointSnapshot> {
        self.workloads
            .iter()
            .flat_map(|w| w.endpoints.iter().map(|e| e.snapshot(target, &w.name)))
            .collect()
    }
}

/// Look up the address of the single live container named exactly `workload`.
///
/// No match leaves the endpoint unresolved. Several exact matches are
/// ambiguous and also leave it unresolved.
async fn lookup_address<B: ContainerBackend>(
    backend: &B,
    workload: &str,
) -> Result<Option<String>, FleetError> {
    let found = backend
        .list_containers(&ContainerFilter::live_named(workload))
        .await
        .map_err(|e| query_error(backend.identity(), &e))?;

    let mut matches = found.iter().filter(|c| c.has_name(workload));
    let Some(container) = matches.next() else {
        tracing::debug!(backend = %backend.identity(), workload, "no live container yet");
        return Ok(None);
    };
    if matches.next().is_some() {
        tracing::warn!(
            backend = %backend.identity(),
            workload,
            "several live containers share this name; address left unresolved"
        );
        return Ok(None);
    }
    Ok(container.ip_address())
}

fn query_error(identity: &str, e: &anyhow::Error) -> FleetError {
    FleetError::BackendQuery {
        backend: identity.to_string(),
        reason: format!("{e:#}"),
    }
}
