//! Configuration system for the bus slave.
//!
//! This module defines the configuration structures used to parameterize the slave. It provides:
//! 1. **Defaults:** Baseline window placement and logging switches.
//! 2. **Structures:** General settings and peripheral placement / reset values.
//! 3. **Loading:** JSON parsing from a string or file, followed by validation.
//!
//! Use `Config::default()` when no configuration is supplied.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::common::constants::WINDOW_OFFSET_MASK;
use crate::common::error::ConfigError;
use crate::regfile::map::RegisterId;

/// Default configuration constants for the slave.
mod defaults {
    /// Base address of the peripheral's 4 KiB register window.
    pub const BASE_ADDR: u32 = 0x4000_0000;
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use ahbsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.peripheral.base_addr, 0x4000_0000);
/// assert!(!config.general.trace_transfers);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use ahbsim_core::config::Config;
/// use ahbsim_core::regfile::RegisterId;
///
/// let json = r#"{
///     "general": { "trace_transfers": true },
///     "peripheral": {
///         "base_addr": 1342177280,
///         "reset_values": { "CTRL": 5, "SCRATCH": 3735928559 }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_transfers);
/// assert_eq!(config.peripheral.base_addr, 0x5000_0000);
/// assert_eq!(config.peripheral.reset_values[&RegisterId::Scratch], 0xDEAD_BEEF);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Peripheral placement and register reset values.
    #[serde(default)]
    pub peripheral: PeripheralConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and any error from `validate`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as `from_json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Checks semantic constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnalignedBase` if the base address is not 4 KiB aligned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.peripheral.base_addr;
        if base & WINDOW_OFFSET_MASK != 0 {
            return Err(ConfigError::UnalignedBase(base));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every completed data phase at `info` level.
    #[serde(default)]
    pub trace_transfers: bool,
}

/// Peripheral placement and reset values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeripheralConfig {
    /// Base address of the 4 KiB register window.
    #[serde(default = "PeripheralConfig::default_base_addr")]
    pub base_addr: u32,

    /// Per-register reset values replacing the built-in ones.
    #[serde(default)]
    pub reset_values: HashMap<RegisterId, u32>,
}

impl PeripheralConfig {
    /// Returns the default window base address.
    const fn default_base_addr() -> u32 {
        defaults::BASE_ADDR
    }
}

impl Default for PeripheralConfig {
    fn default() -> Self {
        Self {
            base_addr: defaults::BASE_ADDR,
            reset_values: HashMap::new(),
        }
    }
}
