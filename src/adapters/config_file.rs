//! JSON config-file adapter.
//!
//! Implements [`ConfigPort`] by reading an optional JSON file.  No path
//! means built-in defaults.  The binary takes the path from the
//! `THRUSTLINK_CONFIG` environment variable.

use std::path::PathBuf;

use log::info;

use crate::app::ports::ConfigPort;
use crate::config::SystemConfig;
use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "THRUSTLINK_CONFIG";

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Use the file named by [`CONFIG_ENV`], if set.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let Some(path) = &self.path else {
            return Ok(SystemConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let config = SystemConfig::from_json(&text)?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }
}
