//! Infrastructure layer: concrete implementations of application port traits.
//!
//! All I/O lives here: the Docker API client, TCP probing, and config file
//! access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod docker;
pub mod network;
