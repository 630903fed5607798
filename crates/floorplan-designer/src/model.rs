//! Floor plan data model.
//!
//! Field names serialize in camelCase so that saved plans keep the
//! `{ floors, groups, savedAt }` JSON shape used by existing plan files.

use chrono::{DateTime, Utc};
use floorplan_core::geometry::{Bounded, Point, Rect};
use floorplan_core::ids::{new_id, IdKind};
use serde::{Deserialize, Serialize};

/// A rectangular placement surface holding shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Floor {
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: new_id(IdKind::Floor),
            name: name.into(),
            x,
            y,
            width,
            height,
            z_index: 1,
            shapes: Vec::new(),
        }
    }

    /// Floor surface in its own local coordinates.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn shape(&self, shape_id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == shape_id)
    }

    pub(crate) fn shape_mut(&mut self, shape_id: &str) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == shape_id)
    }
}

/// Furniture category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeCategory {
    Table,
    Chair,
    Custom,
}

impl std::fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "Table"),
            Self::Chair => write!(f, "Chair"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

/// A placeable element owned by exactly one floor.
///
/// `(x, y)` is the top-left corner in floor-local coordinates before
/// rotation. Rotation is about the shape's own center and never changes the
/// stored position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(default)]
    pub floor_id: String,
    #[serde(default)]
    pub label: String,
    pub category: ShapeCategory,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "rotation", default)]
    pub rotation_degrees: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Table this chair belongs to. Lookup only; no lifecycle coupling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,
}

impl Shape {
    /// Creates an unplaced shape with a fresh id.
    pub fn new(category: ShapeCategory, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: new_id(IdKind::Shape),
            floor_id: String::new(),
            label: category.to_string(),
            category,
            x,
            y,
            width,
            height,
            rotation_degrees: 0.0,
            fill: None,
            stroke: None,
            custom_path: None,
            group_id: None,
            table_id: None,
            reservation: None,
        }
    }

    pub fn table(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ShapeCategory::Table, x, y, width, height)
    }

    /// A chair linked to `table_id`.
    pub fn chair(x: f64, y: f64, width: f64, height: f64, table_id: impl Into<String>) -> Self {
        Self {
            table_id: Some(table_id.into()),
            ..Self::new(ShapeCategory::Chair, x, y, width, height)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds a custom polygon from drawn points.
    ///
    /// The shape's box is the points' bounding box and `custom_path` is a
    /// closed `M x,y L x,y … Z` path over the points as given. Returns `None`
    /// for an empty point list.
    pub fn custom_from_points(
        points: &[Point],
        category: ShapeCategory,
        label: &str,
    ) -> Option<Self> {
        let first = points.first()?;

        let (min_x, min_y, max_x, max_y) = points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        );

        let mut path = format!("M{},{} ", first.x, first.y);
        for p in &points[1..] {
            path.push_str(&format!("L{},{} ", p.x, p.y));
        }
        path.push('Z');

        let label = if label.is_empty() {
            format!("Custom {}", category)
        } else {
            label.to_string()
        };

        Some(Self {
            custom_path: Some(path),
            ..Self::new(category, min_x, min_y, max_x - min_x, max_y - min_y).with_label(label)
        })
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_table(&self) -> bool {
        self.category == ShapeCategory::Table
    }
}

impl Bounded for Shape {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A rigid composite of shapes on one floor.
///
/// `center` is the rotation pivot. `rotation_degrees` is the group's
/// cumulative rotation; member rotation is kept equal to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub floor_id: String,
    pub shape_ids: Vec<String>,
    #[serde(rename = "rotation", default)]
    pub rotation_degrees: f64,
    pub center: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Group {
    pub fn contains(&self, shape_id: &str) -> bool {
        self.shape_ids.iter().any(|id| id == shape_id)
    }
}

/// Reservation state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Reserved,
    Pending,
    Available,
}

/// Reservation record attached to a table shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub time: DateTime<Utc>,
    pub customer_name: String,
    pub party_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ReservationStatus,
}

/// Partial update for a [`Reservation`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationPatch {
    pub time: Option<DateTime<Utc>>,
    pub customer_name: Option<String>,
    pub party_size: Option<u32>,
    pub notes: Option<String>,
    pub status: Option<ReservationStatus>,
}

impl ReservationPatch {
    pub(crate) fn apply(self, reservation: &mut Reservation) {
        if let Some(time) = self.time {
            reservation.time = time;
        }
        if let Some(name) = self.customer_name {
            reservation.customer_name = name;
        }
        if let Some(size) = self.party_size {
            reservation.party_size = size;
        }
        if let Some(notes) = self.notes {
            reservation.notes = Some(notes);
        }
        if let Some(status) = self.status {
            reservation.status = status;
        }
    }
}

/// Kind of entity a selection element refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Floor,
    Shape,
    Group,
}

/// Tagged, non-owning reference to a selected floor, shape or group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementType,
    pub floor_id: String,
}

impl SelectionElement {
    pub fn floor(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            floor_id: id.clone(),
            id,
            kind: ElementType::Floor,
        }
    }

    pub fn shape(id: impl Into<String>, floor_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementType::Shape,
            floor_id: floor_id.into(),
        }
    }

    pub fn group(id: impl Into<String>, floor_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementType::Group,
            floor_id: floor_id.into(),
        }
    }

    pub fn refers_to(&self, kind: ElementType, id: &str) -> bool {
        self.kind == kind && self.id == id
    }
}
