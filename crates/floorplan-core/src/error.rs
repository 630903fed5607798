//! Error handling for the floorplan layout engine
//!
//! Three kinds of outcome exist in the engine:
//! - Validation failures (e.g. grouping shapes across floors), rejected before
//!   any mutation and surfaced to the caller as [`LayoutError`]
//! - Missing-reference no-ops, which are not errors at all: operations report
//!   them through a `bool` or `Option` return value
//! - Invariant violations between shapes and groups, reported as
//!   [`InvariantViolation`] by the store's consistency check
//!
//! Loading a saved plan reports broken links and malformed plans through
//! [`Error`].
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Rejected layout operation
///
/// Returned before any mutation takes place; state is unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The selection spans more than one floor
    #[error("Cannot group shapes that belong to different floors: {floors:?}")]
    CrossFloorGrouping {
        /// The distinct floor ids found in the selection.
        floors: Vec<String>,
    },

    /// Fewer than two shapes were selected for grouping
    #[error("A group needs at least 2 shapes, {found} selected")]
    InsufficientShapes {
        /// Number of existing shapes found in the selection.
        found: usize,
    },

    /// A selected shape already belongs to another group
    #[error("Shape {shape_id} already belongs to group {group_id}")]
    AlreadyGrouped {
        /// The shape that is already grouped.
        shape_id: String,
        /// The group it belongs to.
        group_id: String,
    },
}

/// Broken link between shapes, groups and floors
///
/// These never occur when all mutation goes through the store and the group
/// manager. Detecting one means a bug in the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// A shape points at a group that does not exist
    #[error("Shape {shape_id} references missing group {group_id}")]
    MissingGroup { shape_id: String, group_id: String },

    /// A shape points at a group that does not list it
    #[error("Group {group_id} does not list member shape {shape_id}")]
    NotListed { shape_id: String, group_id: String },

    /// A group lists a shape that does not exist on its floor
    #[error("Group {group_id} lists shape {shape_id} which is not on floor {floor_id}")]
    MemberNotOnFloor {
        group_id: String,
        shape_id: String,
        floor_id: String,
    },

    /// A group lists a shape whose group id points elsewhere
    #[error("Group {group_id} lists shape {shape_id} which is not stamped with it")]
    NotStamped { group_id: String, shape_id: String },

    /// A group lists the same shape twice
    #[error("Group {group_id} lists shape {shape_id} more than once")]
    DuplicateMember { group_id: String, shape_id: String },

    /// The same id is used by two shapes
    #[error("Shape id {shape_id} is used more than once")]
    DuplicateShapeId { shape_id: String },

    /// A shape's floor id disagrees with the floor that holds it
    #[error("Shape {shape_id} is stored on floor {stored_on} but claims floor {claimed}")]
    WrongFloor {
        shape_id: String,
        stored_on: String,
        claimed: String,
    },

    /// The selection references an entity that no longer exists
    #[error("Selection references missing {kind} {id}")]
    DanglingSelection { kind: String, id: String },

    /// A grouped shape is selected on its own instead of through its group
    #[error("Shape {shape_id} is selected apart from its group {group_id}")]
    GroupedShapeSelected { shape_id: String, group_id: String },
}

/// Main error type for the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Internal consistency failure
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// Saved plan could not be turned into a consistent store
    #[error("Plan error: {reason}")]
    Plan {
        /// The reason the plan was rejected.
        reason: String,
    },
}

impl Error {
    /// Create a plan error from any displayable reason.
    pub fn plan(reason: impl Into<String>) -> Self {
        Self::Plan {
            reason: reason.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
