//! Geometry kernel.
//!
//! Pure functions over points and axis-aligned rectangles. Coordinates are
//! screen-style: x grows to the right, y grows downward, and positive angles
//! rotate clockwise on screen.

use serde::{Deserialize, Serialize};

/// 2D point in floor-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anything with an axis-aligned box in floor-local coordinates.
pub trait Bounded {
    fn rect(&self) -> Rect;
}

impl Bounded for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// Group extent relative to its centroid.
///
/// `x` and `y` are the offsets of the padded box's top-left corner from
/// `center`, so scaling the box about `center` keeps the rotation pivot fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center: Point,
}

impl GroupBounds {
    /// The box in absolute floor-local coordinates.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.center.x + self.x,
            self.center.y + self.y,
            self.width,
            self.height,
        )
    }
}

/// Rotates `point` about `pivot` by `angle_degrees` (clockwise on screen).
pub fn rotate_point(point: Point, pivot: Point, angle_degrees: f64) -> Point {
    let angle_rad = angle_degrees.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point {
        x: pivot.x + dx * c - dy * s,
        y: pivot.y + dx * s + dy * c,
    }
}

/// Axis-aligned overlap test.
///
/// Two boxes overlap unless strictly separated on some axis, so boxes that
/// only touch along an edge count as overlapping.
pub fn bounding_box_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
}

/// True when `inner` lies entirely inside `outer`; shared edges are allowed.
pub fn contains(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

/// Mean of the shapes' own centers. `(0, 0)` for an empty slice.
pub fn centroid<T: Bounded>(shapes: &[T]) -> Point {
    if shapes.is_empty() {
        return Point::default();
    }
    let (sum_x, sum_y) = shapes.iter().fold((0.0, 0.0), |(sx, sy), s| {
        let c = s.rect().center();
        (sx + c.x, sy + c.y)
    });
    let n = shapes.len() as f64;
    Point::new(sum_x / n, sum_y / n)
}

/// Smallest box enclosing every shape, grown by `padding` on each side and
/// expressed relative to [`centroid`].
///
/// An empty slice yields a zero-sized box at the origin.
pub fn bounding_box<T: Bounded>(shapes: &[T], padding: f64) -> GroupBounds {
    let center = centroid(shapes);
    let mut iter = shapes.iter().map(Bounded::rect);
    let Some(first) = iter.next() else {
        return GroupBounds::default();
    };

    let (min_x, min_y, max_x, max_y) = iter.fold(
        (first.x, first.y, first.right(), first.bottom()),
        |(min_x, min_y, max_x, max_y), r| {
            (
                min_x.min(r.x),
                min_y.min(r.y),
                max_x.max(r.right()),
                max_y.max(r.bottom()),
            )
        },
    );

    GroupBounds {
        x: min_x - padding - center.x,
        y: min_y - padding - center.y,
        width: max_x - min_x + padding * 2.0,
        height: max_y - min_y + padding * 2.0,
        center,
    }
}
