//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use fleetprobe_common::FleetConfig;

use crate::application::ports::ConfigStore;

/// Environment variable that overrides the default config location.
pub const CONFIG_ENV: &str = "FLEETPROBE_CONFIG";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
///
/// Lookup order: explicit path (from `--config`), then `FLEETPROBE_CONFIG`,
/// then `~/.fleetprobe/config.yaml`.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<FleetConfig> {
        let path = self.path()?;
        if !path.exists() {
            anyhow::bail!(
                "config file not found: {}\n\nCreate it or pass --config <path>.",
                path.display()
            );
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".fleetprobe").join("config.yaml"))
    }
}
