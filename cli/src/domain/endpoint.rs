//! Endpoint state: address resolution and availability.
//!
//! Pure state transitions only. Resolution and probing are driven by
//! `application::services::backend_connection`.

use fleetprobe_common::{Credentials, EndpointSnapshot, ServiceDescriptor};

/// Address state of an endpoint. Transitions one way only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EndpointAddress {
    /// The backend has not yet reported an address for the workload.
    #[default]
    Unresolved,
    /// Address assigned by the backend; kept even if the workload disappears.
    Resolved(String),
}

/// One network service exposed by a workload.
#[derive(Debug, Clone)]
pub struct Endpoint {
    service: String,
    address: EndpointAddress,
    port: u16,
    available: bool,
    credentials: Option<Credentials>,
}

impl Endpoint {
    /// Build an unresolved, unavailable endpoint from a validated descriptor.
    #[must_use]
    pub fn from_descriptor(descriptor: &ServiceDescriptor) -> Self {
        Self {
            service: descriptor.service_name().to_string(),
            address: EndpointAddress::Unresolved,
            port: descriptor.port,
            available: false,
            credentials: descriptor.credentials().cloned(),
        }
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Resolved address, or `None` while unresolved.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match &self.address {
            EndpointAddress::Resolved(addr) => Some(addr),
            EndpointAddress::Unresolved => None,
        }
    }

    #[must_use]
    pub fn address_state(&self) -> &EndpointAddress {
        &self.address
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.address, EndpointAddress::Resolved(_))
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Assign the backend-reported address.
    ///
    /// Returns `true` if the address was assigned. An already-resolved
    /// endpoint keeps its address, and an empty address is ignored.
    pub fn resolve(&mut self, address: &str) -> bool {
        if self.is_resolved() || address.is_empty() {
            return false;
        }
        self.address = EndpointAddress::Resolved(address.to_string());
        true
    }

    /// Record the outcome of the latest reachability check.
    ///
    /// An unresolved endpoint is always unavailable, whatever the caller says.
    pub fn record_probe(&mut self, reachable: bool) {
        self.available = reachable && self.is_resolved();
    }

    /// Mark unavailable without probing (address still unknown).
    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    #[must_use]
    pub fn snapshot(&self, target: &str, workload: &str) -> EndpointSnapshot {
        EndpointSnapshot {
            target: target.to_string(),
            workload: workload.to_string(),
            service: self.service.clone(),
            address: self.address().map(String::from),
            port: self.port,
            available: self.available,
        }
    }
}
