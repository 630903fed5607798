//! # Floorplan Designer
//!
//! This crate provides the layout tools for arranging furniture on floor
//! plans: floors holding tables, chairs and custom shapes, rigid groups of
//! shapes, selection with group expansion and linear undo/redo.
//!
//! ## Core Components
//!
//! - **ShapeStore**: the single source of truth for floors, shapes, groups
//!   and the selection
//! - **GroupManager**: creates, dissolves and rigidly transforms groups
//! - **SelectionManager**: selection rules and dangling-reference pruning
//! - **HistoryManager**: full-state snapshots with undo/redo
//! - **LayoutEngine**: facade that records one snapshot per completed action
//! - **PlanFile**: JSON persistence of floors and groups
//!
//! ## Architecture
//!
//! ```text
//! LayoutEngine
//!   ├── ShapeStore (floors → shapes, groups, selection)
//!   │     └── GroupManager (called with the store as a parameter)
//!   ├── SelectionManager
//!   ├── HistoryManager (snapshots of the store)
//!   └── Config (floorplan-settings)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorplan_designer::{LayoutEngine, Shape};
//!
//! let mut engine = LayoutEngine::new();
//! engine.add_floor();
//! let first = engine.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).expect("floor exists");
//! let second = engine.add_shape(Shape::table(120.0, 0.0, 80.0, 80.0)).expect("floor exists");
//!
//! // Select both tables and group them
//! engine.select_shape(&first, false);
//! engine.select_shape(&second, true);
//! let group = engine.group_selection()?;
//! engine.rotate_group(&group, 90.0);
//! engine.undo();
//! ```

pub mod group_manager;
pub mod history;
pub mod layout_engine;
pub mod model;
pub mod selection_manager;
pub mod serialization;
pub mod shape_store;

pub use group_manager::GroupManager;
pub use history::{HistoryManager, HistorySnapshot};
pub use layout_engine::LayoutEngine;
pub use model::{
    ElementType, Floor, Group, Reservation, ReservationPatch, ReservationStatus,
    SelectionElement, Shape, ShapeCategory,
};
pub use selection_manager::SelectionManager;
pub use serialization::PlanFile;
pub use shape_store::ShapeStore;
