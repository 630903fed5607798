//! # Floorplan
//!
//! A spatial layout engine for restaurant floor plans with support for:
//! - Multiple floors with z-ordering, duplication and cascade deletion
//! - Tables, chairs and custom polygon shapes
//! - Rigid groups that move, rotate and resize as one body
//! - Selection with group expansion
//! - Linear undo/redo over full-state snapshots
//! - JSON plan files
//!
//! ## Architecture
//!
//! Floorplan is organized as a workspace with multiple crates:
//!
//! 1. **floorplan-core** - Geometry kernel, ids and error types
//! 2. **floorplan-settings** - Engine configuration and its persistence
//! 3. **floorplan-designer** - Shape store, group/selection/history managers
//!    and the `LayoutEngine` facade
//! 4. **floorplan** - Binary that loads and summarizes plans

pub use floorplan_designer as designer;
pub use floorplan_settings as settings;

pub use floorplan_core::{
    Error, InvariantViolation, LayoutError, Point, Rect, Result,
};
pub use floorplan_designer::{
    ElementType, Floor, Group, GroupManager, HistoryManager, LayoutEngine, PlanFile,
    SelectionElement, SelectionManager, Shape, ShapeCategory, ShapeStore,
};
pub use floorplan_settings::{Config, SettingsError};

use serde_json::{json, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for plan output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Per-floor overview of a store, bottom floor first.
pub fn plan_summary(store: &ShapeStore) -> Value {
    let floors: Vec<Value> = store
        .floors_by_z()
        .into_iter()
        .map(|floor| {
            let count = |category: ShapeCategory| {
                floor
                    .shapes
                    .iter()
                    .filter(|s| s.category == category)
                    .count()
            };
            let reserved = floor
                .shapes
                .iter()
                .filter(|s| s.reservation.is_some())
                .count();
            let groups = store
                .groups()
                .values()
                .filter(|g| g.floor_id == floor.id)
                .count();
            json!({
                "id": floor.id,
                "name": floor.name,
                "zIndex": floor.z_index,
                "tables": count(ShapeCategory::Table),
                "chairs": count(ShapeCategory::Chair),
                "custom": count(ShapeCategory::Custom),
                "reservedTables": reserved,
                "groups": groups,
            })
        })
        .collect();

    json!({
        "floors": floors,
        "shapes": store.shape_count(),
        "groups": store.groups().len(),
    })
}
