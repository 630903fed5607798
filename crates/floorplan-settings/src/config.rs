//! Configuration for the floorplan layout engine
//!
//! Configuration is organized into logical sections:
//! - History settings (undo depth)
//! - Floor defaults (size and placement of new and duplicated floors)
//! - Placement settings (collision-avoiding paste)
//!
//! Files may be TOML or JSON; the format is chosen by extension.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept; the oldest are discarded first
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Defaults for newly created floors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSettings {
    pub default_x: f64,
    pub default_y: f64,
    pub default_width: f64,
    pub default_height: f64,
    /// Offset applied to both axes when a floor is duplicated
    pub duplicate_offset: f64,
}

impl Default for FloorSettings {
    fn default() -> Self {
        Self {
            default_x: 100.0,
            default_y: 100.0,
            default_width: 400.0,
            default_height: 300.0,
            duplicate_offset: 20.0,
        }
    }
}

/// Collision-avoiding placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Step applied to both axes on every placement attempt
    pub paste_offset: f64,
    /// Number of extra positions tried before giving up
    pub max_attempts: u32,
}

impl PlacementSettings {
    /// Largest accepted `max_attempts`.
    pub const MAX_ATTEMPTS: u32 = 1000;
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            paste_offset: 20.0,
            max_attempts: 10,
        }
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub history: HistorySettings,
    pub floor: FloorSettings,
    pub placement: PlacementSettings,
}

impl Config {
    /// Platform config file location: `<config_dir>/floorplan/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join("floorplan").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the platform config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Ignoring invalid configuration at {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }

        if !positive(self.floor.default_width) || !positive(self.floor.default_height) {
            return Err(SettingsError::invalid(
                "floor.default_width",
                "floor dimensions must be finite and > 0",
            ));
        }

        for (key, value) in [
            ("floor.default_x", self.floor.default_x),
            ("floor.default_y", self.floor.default_y),
            ("floor.duplicate_offset", self.floor.duplicate_offset),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::invalid(key, "must be a finite number"));
            }
        }

        if !positive(self.placement.paste_offset) {
            return Err(SettingsError::invalid(
                "placement.paste_offset",
                "must be finite and > 0",
            ));
        }

        if self.placement.max_attempts > PlacementSettings::MAX_ATTEMPTS {
            return Err(SettingsError::invalid(
                "placement.max_attempts",
                format!("must be at most {}", PlacementSettings::MAX_ATTEMPTS),
            ));
        }

        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
