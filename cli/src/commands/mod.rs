//! Command implementations

pub mod cleanup;
pub mod probe;
pub mod validate;
pub mod version;
pub mod watch;
