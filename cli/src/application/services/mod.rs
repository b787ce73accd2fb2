//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod backend_connection;
pub mod cleanup_service;
pub mod fleet_manager;
pub mod fleet_setup;

pub use backend_connection::BackendConnection;
pub use fleet_manager::{FleetManager, PollFailure, PollSummary};
