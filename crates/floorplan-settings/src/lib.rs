//! Floorplan Settings Crate
//!
//! Handles engine configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, FloorSettings, HistorySettings, PlacementSettings};
pub use error::{SettingsError, SettingsResult};
