//! Identifier generation.
//!
//! Ids are plain strings so that saved plans stay readable and so that ids
//! from older plans (`"table-1"`, `"floor-1"`) keep working. New ids are a
//! kind prefix followed by a UUID v4, which makes them globally unique across
//! floors, duplicates and pasted copies.

use uuid::Uuid;

/// What an id names. Determines the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Floor,
    Shape,
    Group,
    Reservation,
}

impl IdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Shape => "shape",
            Self::Group => "group",
            Self::Reservation => "reservation",
        }
    }
}

/// Returns a fresh id such as `group-6f1c…`.
pub fn new_id(kind: IdKind) -> String {
    format!("{}-{}", kind.prefix(), Uuid::new_v4().simple())
}
