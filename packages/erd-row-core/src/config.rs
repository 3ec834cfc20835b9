//! Row runtime configuration.
//!
//! Supports TOML config files, environment variable overrides, and defaults.

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RowError};
use crate::host::DisplayPreferences;

/// Row runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowConfig {
    /// Tick rate in Hz (1-240, default: 60)
    pub tickrate: u32,
    /// Delay before the host recomputes node geometry after the edge count changes (default: 100)
    pub geometry_debounce_ms: u64,
    /// Show the `(len)` / `(p, s)` suffix on type badges (default: false)
    pub show_field_attributes: bool,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            tickrate: 60,
            geometry_debounce_ms: 100,
            show_field_attributes: false,
        }
    }
}

impl RowConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RowError::ConfigError(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded row config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parses configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| RowError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment variable overrides.
    /// Environment variables are prefixed with `ERD_ROW_`.
    /// Example: `ERD_ROW_TICKRATE=120` overrides `tickrate`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(val) = lookup("ERD_ROW_TICKRATE") {
            self.tickrate = val
                .parse()
                .map_err(|_| RowError::ConfigError(format!("Invalid tickrate: {}", val)))?;
        }
        if let Some(val) = lookup("ERD_ROW_GEOMETRY_DEBOUNCE_MS") {
            self.geometry_debounce_ms = val.parse().map_err(|_| {
                RowError::ConfigError(format!("Invalid geometry_debounce_ms: {}", val))
            })?;
        }
        if let Some(val) = lookup("ERD_ROW_SHOW_FIELD_ATTRIBUTES") {
            self.show_field_attributes = val.parse().map_err(|_| {
                RowError::ConfigError(format!("Invalid show_field_attributes: {}", val))
            })?;
        }
        tracing::trace!(config = ?self, "Applied row config overrides");
        self.validate()
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=240).contains(&self.tickrate) {
            return Err(RowError::ConfigError(format!(
                "tickrate must be between 1 and 240, got {}",
                self.tickrate
            )));
        }
        Ok(())
    }

    /// Returns the duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tickrate as f64)
    }

    /// Returns the geometry notification debounce delay.
    pub fn geometry_debounce(&self) -> Duration {
        Duration::from_millis(self.geometry_debounce_ms)
    }
}

impl DisplayPreferences for RowConfig {
    fn show_field_attributes(&self) -> bool {
        self.show_field_attributes
    }
}
