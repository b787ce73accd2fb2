pub mod config;
pub mod labels;
pub mod types;

pub use config::{FleetConfig, PollConfig, TargetConfig, WorkloadConfig};
pub use labels::{cleanup, network};
pub use types::*;
