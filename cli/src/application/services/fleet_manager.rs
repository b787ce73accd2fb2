//! Fleet manager: one backend connection per target, a shared cleanup
//! ledger, and poll fan-out.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use fleetprobe_common::{EndpointSnapshot, PollReport, ServiceDescriptor};

use crate::application::ports::{BackendConnector, BackendParams, EndpointProbe};
use crate::application::services::backend_connection::BackendConnection;
use crate::domain::{CleanupLedger, CleanupOutcome, FleetError};

/// A connection whose reconcile failed during a poll.
#[derive(Debug)]
pub struct PollFailure {
    pub target: String,
    pub error: FleetError,
}

/// Outcome of one poll across all registered connections.
#[derive(Debug, Default)]
pub struct PollSummary {
    /// Connections whose reconcile completed.
    pub reconciled: usize,
    /// Connections whose reconcile failed; the others were still polled.
    pub failures: Vec<PollFailure>,
}

/// Owns the backend connection of every target.
///
/// Constructed once by the host's setup routine and passed by reference to
/// whatever needs to register backends or bind workloads.
pub struct FleetManager<C: BackendConnector, P> {
    connector: C,
    probe: P,
    backends: BTreeMap<String, BackendConnection<C::Backend>>,
    /// Workload name → owning target.
    claims: HashMap<String, String>,
    ledger: CleanupLedger,
}

impl<C: BackendConnector, P: EndpointProbe> FleetManager<C, P> {
    #[must_use]
    pub fn new(connector: C, probe: P) -> Self {
        Self {
            connector,
            probe,
            backends: BTreeMap::new(),
            claims: HashMap::new(),
            ledger: CleanupLedger::new(),
        }
    }

    /// Connect `target` to its backend and sweep stale workloads.
    ///
    /// The sweep runs at most once per backend identity, so two targets
    /// sharing a daemon trigger one sweep between them.
    ///
    /// # Errors
    ///
    /// - [`FleetError::DuplicateBackend`] if `target` is already registered.
    /// - [`FleetError::BackendConnect`] if the connector rejects `params`.
    /// - [`FleetError::BackendQuery`] if the cleanup listing fails; the
    ///   target stays unregistered and may be registered again.
    pub async fn register_backend(
        &mut self,
        target: &str,
        params: &BackendParams,
    ) -> Result<&BackendConnection<C::Backend>, FleetError> {
        if self.backends.contains_key(target) {
            return Err(FleetError::DuplicateBackend {
                target: target.to_string(),
            });
        }

        let backend = self
            .connector
            .connect(params)
            .map_err(|e| FleetError::BackendConnect {
                backend: params.url.clone(),
                reason: format!("{e:#}"),
            })?;
        let mut connection = BackendConnection::new(backend);

        match connection.cleanup_stale_workloads(&mut self.ledger).await? {
            CleanupOutcome::AlreadyCleaned => {}
            CleanupOutcome::Swept { removed, failed } => tracing::info!(
                target_name = %target,
                backend = %connection.identity(),
                removed,
                failed,
                "stale container sweep complete"
            ),
        }
        connection.mark_ready();

        tracing::info!(target_name = %target, backend = %connection.identity(), "backend registered");
        Ok(self.backends.entry(target.to_string()).or_insert(connection))
    }

    /// Bind a workload's services to the backend of `target`.
    ///
    /// # Errors
    ///
    /// - [`FleetError::UnknownTarget`] if `target` has no backend.
    /// - [`FleetError::WorkloadClaimed`] if another target already bound
    ///   `workload`.
    /// - Validation errors from [`BackendConnection::bind_workload_endpoints`].
    pub fn bind_workload_endpoints(
        &mut self,
        target: &str,
        workload: &str,
        descriptors: &[ServiceDescriptor],
    ) -> Result<usize, FleetError> {
        let connection = self
            .backends
            .get_mut(target)
            .ok_or_else(|| FleetError::UnknownTarget {
                target: target.to_string(),
            })?;
        if let Some(owner) = self.claims.get(workload).filter(|owner| *owner != target) {
            return Err(FleetError::WorkloadClaimed {
                workload: workload.to_string(),
                owner: owner.clone(),
            });
        }

        let added = connection.bind_workload_endpoints(workload, descriptors)?;
        self.claims.insert(workload.to_string(), target.to_string());
        Ok(added)
    }

    /// Reconcile every registered connection, in target order.
    ///
    /// A failing connection is logged and recorded in the summary; the
    /// remaining connections are still reconciled.
    pub async fn poll(&mut self) -> PollSummary {
        let mut summary = PollSummary::default();
        for (target, connection) in &mut self.backends {
            match connection.reconcile(&self.probe).await {
                Ok(()) => summary.reconciled += 1,
                Err(error) => {
                    tracing::warn!(
                        target_name = %target,
                        error = %error,
                        "reconcile failed; continuing with remaining backends"
                    );
                    summary.failures.push(PollFailure {
                        target: target.clone(),
                        error,
                    });
                }
            }
        }
        summary
    }

    /// Build a timestamped report of the current endpoint state.
    #[must_use]
    pub fn report(&self, summary: &PollSummary) -> PollReport {
        PollReport {
            observed_at: Utc::now(),
            reconciled: summary.reconciled,
            failed: summary.failures.len(),
            endpoints: self.snapshot(),
        }
    }

    #[must_use]
    pub fn backend(&self, target: &str) -> Option<&BackendConnection<C::Backend>> {
        self.backends.get(target)
    }

    /// Registered targets, in poll order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    /// Target that bound `workload`, if any.
    #[must_use]
    pub fn owner_of(&self, workload: &str) -> Option<&str> {
        self.claims.get(workload).map(String::as_str)
    }

    /// Every endpoint of every target.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EndpointSnapshot> {
        self.backends
            .iter()
            .flat_map(|(target, connection)| connection.snapshot(target))
            .collect()
    }

    #[must_use]
    pub fn cleanup_ledger(&self) -> &CleanupLedger {
        &self.ledger
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }
}
