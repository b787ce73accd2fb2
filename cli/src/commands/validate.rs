//! `fleetprobe validate`: load and check the fleet configuration.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::validate_fleet_config;

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run(app: &AppContext, store: &impl ConfigStore) -> Result<()> {
    let path = store.path()?;
    let config = store.load()?;
    validate_fleet_config(&config)?;
    app.renderer().config_summary(&config, &path)
}
