//! System configuration parameters
//!
//! Bus addressing and loop timing. The defaults match the deployed
//! firmware (`/dev/i2c-1`, address `0x09`, 100 Hz); a JSON file can
//! override any subset of them (see [`crate::adapters::config_file`]).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the loop waits out the remainder of each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// Sleep one full period after each cycle's I/O. Cycle time drifts by
    /// however long the I/O took.
    #[default]
    FixedDelay,
    /// Sleep until the next period boundary measured from loop start.
    FixedRate,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Bus ---
    /// I2C character device
    pub bus_path: String,
    /// 7-bit address of the remote microcontroller
    pub device_address: u8,

    // --- Timing ---
    /// Control loop period (milliseconds)
    pub period_ms: u32,
    /// Cycles per unit of the duration multiplier
    pub cycles_per_unit: u32,
    /// Period pacing strategy
    pub pacing: PacingMode,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Bus
            bus_path: "/dev/i2c-1".to_owned(),
            device_address: 0x09,

            // Timing
            period_ms: 10,        // 100 Hz
            cycles_per_unit: 100, // 1 s per multiplier unit
            pacing: PacingMode::FixedDelay,
        }
    }
}

impl SystemConfig {
    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus_path.is_empty() {
            return Err(ConfigError::ValidationFailed("bus_path must not be empty"));
        }
        if self.device_address > 0x7F {
            return Err(ConfigError::ValidationFailed(
                "device_address must be a 7-bit address",
            ));
        }
        if self.period_ms == 0 {
            return Err(ConfigError::ValidationFailed("period_ms must be positive"));
        }
        if self.cycles_per_unit == 0 {
            return Err(ConfigError::ValidationFailed(
                "cycles_per_unit must be positive",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields keep defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loop period as a `Duration`.
    pub fn period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.period_ms))
    }
}
