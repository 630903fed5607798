//! # Floorplan Core
//!
//! Core types, geometry and error handling for the floorplan layout engine.
//! Provides the fundamental abstractions shared by the designer and the
//! settings crates:
//!
//! - [`geometry`]: pure 2D math (rotation, overlap, containment, centroid,
//!   centroid-relative bounding boxes)
//! - [`error`]: rejected-operation errors and invariant violations
//! - [`ids`]: globally unique identifiers for floors, shapes and groups

pub mod error;
pub mod geometry;
pub mod ids;

pub use error::{Error, InvariantViolation, LayoutError, Result};
pub use geometry::{
    bounding_box, bounding_box_overlap, centroid, contains, rotate_point, Bounded, GroupBounds,
    Point, Rect,
};
pub use ids::{new_id, IdKind};
