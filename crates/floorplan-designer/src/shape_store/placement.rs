//! Collision and containment queries.
//!
//! Collision uses axis-aligned boxes for every category, custom polygons
//! included.

use super::ShapeStore;
use floorplan_core::geometry::{bounding_box_overlap, contains, Bounded, Point, Rect};
use floorplan_settings::PlacementSettings;

impl ShapeStore {
    /// Ids of shapes on `floor_id` whose box overlaps `rect`, skipping
    /// the ids in `ignore`.
    pub fn collisions(&self, floor_id: &str, rect: &Rect, ignore: &[&str]) -> Vec<String> {
        let Some(floor) = self.floor(floor_id) else {
            return Vec::new();
        };
        floor
            .shapes
            .iter()
            .filter(|s| !ignore.contains(&s.id.as_str()))
            .filter(|s| bounding_box_overlap(&s.rect(), rect))
            .map(|s| s.id.clone())
            .collect()
    }

    /// True when `rect` (floor-local) lies within the floor's surface.
    pub fn fits_floor(&self, floor_id: &str, rect: &Rect) -> bool {
        self.floor(floor_id)
            .is_some_and(|floor| contains(&floor.local_bounds(), rect))
    }

    /// Finds an offset that places all `rects` on `floor_id` without
    /// touching existing shapes.
    ///
    /// Offsets of `k * paste_offset` on both axes are tried for
    /// `k = 1..=max_attempts + 1`. If every attempt collides the last
    /// offset is returned anyway.
    pub fn find_free_offset(
        &self,
        floor_id: &str,
        rects: &[Rect],
        settings: &PlacementSettings,
    ) -> Point {
        let step = settings.paste_offset;
        let mut offset = Point::new(step, step);
        for attempt in 0..=settings.max_attempts {
            let k = f64::from(attempt) + 1.0;
            offset = Point::new(step * k, step * k);
            let blocked = rects.iter().any(|r| {
                let moved = Rect::new(r.x + offset.x, r.y + offset.y, r.width, r.height);
                !self.collisions(floor_id, &moved, &[]).is_empty()
            });
            if !blocked {
                return offset;
            }
        }
        tracing::debug!(
            "No collision-free position on floor {} after {} attempts",
            floor_id,
            u64::from(settings.max_attempts) + 1
        );
        offset
    }
}
