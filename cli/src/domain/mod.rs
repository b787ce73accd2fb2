//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod cleanup;
pub mod config;
pub mod container;
pub mod endpoint;
pub mod error;

pub use cleanup::{CleanupLedger, CleanupOutcome};
pub use config::{validate_descriptor, validate_fleet_config, validate_workload_name};
pub use container::{ContainerDescriptor, ContainerFilter, find_ip_address};
pub use endpoint::{Endpoint, EndpointAddress};
pub use error::{ConfigError, FleetError};
