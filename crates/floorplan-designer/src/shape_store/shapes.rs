//! Shape operations on the store.

use super::ShapeStore;
use crate::group_manager::GroupManager;
use crate::model::{ElementType, Shape};
use floorplan_core::ids::{new_id, IdKind};

impl ShapeStore {
    /// Floor that receives new shapes: the selected floor when exactly one
    /// floor is selected, otherwise the first floor.
    pub fn target_floor_id(&self) -> Option<String> {
        if let [only] = self.selected.as_slice() {
            if only.kind == ElementType::Floor && self.floor(&only.id).is_some() {
                return Some(only.id.clone());
            }
        }
        self.floors.first().map(|f| f.id.clone())
    }

    /// Appends a shape to the target floor without any collision check.
    ///
    /// The shape is re-homed to the target floor. An empty or already used
    /// id is replaced by a fresh one, and group membership is cleared since
    /// groups are formed only through the group manager. Returns the stored
    /// shape id, or `None` when there is no floor to place it on.
    pub fn add_shape(&mut self, shape: Shape) -> Option<String> {
        let floor_id = self.target_floor_id()?;
        self.add_shape_to_floor(&floor_id, shape)
    }

    /// Appends a shape to a specific floor, with the same id and membership
    /// handling as [`add_shape`](Self::add_shape).
    pub fn add_shape_to_floor(&mut self, floor_id: &str, mut shape: Shape) -> Option<String> {
        self.floor(floor_id)?;

        if shape.id.is_empty() || self.find_shape(&shape.id).is_some() {
            shape.id = new_id(IdKind::Shape);
        }
        shape.floor_id = floor_id.to_string();
        shape.group_id = None;

        let id = shape.id.clone();
        let floor = self.floor_mut(floor_id)?;
        floor.shapes.push(shape);
        tracing::debug!("Added shape {} to floor {}", id, floor_id);
        Some(id)
    }

    /// Replaces one shape in place.
    ///
    /// Identity and membership (`id`, `floor_id`, `group_id`) stay as stored;
    /// every other field comes from `replacement`. Returns `false` when the
    /// shape is not on that floor.
    pub fn update_shape(&mut self, floor_id: &str, shape_id: &str, replacement: Shape) -> bool {
        let Some(shape) = self.shape_mut(floor_id, shape_id) else {
            return false;
        };
        let id = std::mem::take(&mut shape.id);
        let floor = std::mem::take(&mut shape.floor_id);
        let group_id = shape.group_id.take();
        *shape = Shape {
            id,
            floor_id: floor,
            group_id,
            ..replacement
        };
        true
    }

    /// Removes a shape, drops it from its group's member list and prunes it
    /// from the selection.
    ///
    /// The group is not dissolved even if this leaves it with a single
    /// member.
    pub fn delete_shape(&mut self, floor_id: &str, shape_id: &str) -> bool {
        let Some(floor) = self.floor_mut(floor_id) else {
            return false;
        };
        let Some(index) = floor.shapes.iter().position(|s| s.id == shape_id) else {
            return false;
        };
        let removed = floor.shapes.remove(index);

        if let Some(group) = removed
            .group_id
            .as_ref()
            .and_then(|gid| self.groups.get_mut(gid))
        {
            group.shape_ids.retain(|id| id != shape_id);
            if group.shape_ids.len() < 2 {
                tracing::debug!(
                    "Group {} left with {} member(s) after deleting {}",
                    group.id,
                    group.shape_ids.len(),
                    shape_id
                );
            }
        }

        self.selected
            .retain(|el| !el.refers_to(ElementType::Shape, shape_id));
        self.debug_assert_invariants();
        true
    }

    /// Moves a shape's top-left corner to `(x, y)`.
    ///
    /// A grouped shape never moves alone: the request becomes a rigid move
    /// of its whole group by the difference between the requested and the
    /// current position.
    pub fn move_shape(&mut self, floor_id: &str, shape_id: &str, x: f64, y: f64) -> bool {
        let Some(shape) = self.shape_mut(floor_id, shape_id) else {
            return false;
        };

        match shape.group_id.clone() {
            Some(group_id) => {
                let (dx, dy) = (x - shape.x, y - shape.y);
                GroupManager::move_group(self, &group_id, dx, dy)
            }
            None => {
                shape.x = x;
                shape.y = y;
                true
            }
        }
    }

    /// Sets a shape's own rotation. Grouped shapes are rotated through
    /// their group instead; this returns `false` for them.
    pub fn rotate_shape(&mut self, floor_id: &str, shape_id: &str, angle_degrees: f64) -> bool {
        match self.shape_mut(floor_id, shape_id) {
            Some(shape) if shape.group_id.is_none() => {
                shape.rotation_degrees = angle_degrees;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectionElement;
    use floorplan_settings::FloorSettings;

    fn store_with_floors(n: usize) -> (ShapeStore, Vec<String>) {
        let mut store = ShapeStore::new();
        let ids = (0..n)
            .map(|_| store.add_floor(&FloorSettings::default()))
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_shape_targets_first_floor_by_default() {
        let (mut store, floors) = store_with_floors(2);
        let id = store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).unwrap();
        assert_eq!(store.find_shape(&id).unwrap().floor_id, floors[0]);
    }

    #[test]
    fn test_add_shape_targets_selected_floor() {
        let (mut store, floors) = store_with_floors(2);
        store.set_selected(vec![SelectionElement::floor(floors[1].clone())]);
        let id = store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).unwrap();
        assert_eq!(store.find_shape(&id).unwrap().floor_id, floors[1]);
    }

    #[test]
    fn test_add_shape_without_floor() {
        let mut store = ShapeStore::new();
        assert!(store.add_shape(Shape::table(0.0, 0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn test_add_shape_to_specific_floor() {
        let (mut store, floors) = store_with_floors(2);
        let id = store
            .add_shape_to_floor(&floors[1], Shape::table(0.0, 0.0, 80.0, 80.0))
            .unwrap();
        assert_eq!(store.find_shape(&id).unwrap().floor_id, floors[1]);
        assert!(store
            .add_shape_to_floor("missing", Shape::table(0.0, 0.0, 1.0, 1.0))
            .is_none());
    }

    #[test]
    fn test_add_shape_rewrites_duplicate_id() {
        let (mut store, _) = store_with_floors(1);
        let a = store
            .add_shape(Shape::table(0.0, 0.0, 1.0, 1.0).with_id("t"))
            .unwrap();
        let b = store
            .add_shape(Shape::table(5.0, 5.0, 1.0, 1.0).with_id("t"))
            .unwrap();
        assert_eq!(a, "t");
        assert_ne!(b, "t");
        assert_eq!(store.shape_count(), 2);
    }

    #[test]
    fn test_update_shape_missing_is_noop() {
        let (mut store, floors) = store_with_floors(1);
        assert!(!store.update_shape(&floors[0], "missing", Shape::table(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(store.shape_count(), 0);
    }

    #[test]
    fn test_update_shape_keeps_identity() {
        let (mut store, floors) = store_with_floors(1);
        let id = store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).unwrap();

        let replacement = Shape::table(10.0, 20.0, 60.0, 60.0).with_label("Window table");
        assert!(store.update_shape(&floors[0], &id, replacement));

        let shape = store.shape(&floors[0], &id).unwrap();
        assert_eq!(shape.id, id);
        assert_eq!(shape.floor_id, floors[0]);
        assert_eq!(shape.label, "Window table");
        assert_eq!((shape.x, shape.y, shape.width), (10.0, 20.0, 60.0));
    }

    #[test]
    fn test_delete_shape_prunes_selection() {
        let (mut store, floors) = store_with_floors(1);
        let id = store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).unwrap();
        store.set_selected(vec![SelectionElement::shape(id.clone(), floors[0].clone())]);

        assert!(store.delete_shape(&floors[0], &id));
        assert!(store.selected_elements().is_empty());
        assert!(!store.delete_shape(&floors[0], &id));
    }

    #[test]
    fn test_move_ungrouped_shape() {
        let (mut store, floors) = store_with_floors(1);
        let id = store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).unwrap();

        assert!(store.move_shape(&floors[0], &id, 42.0, 17.0));
        let shape = store.shape(&floors[0], &id).unwrap();
        assert_eq!((shape.x, shape.y), (42.0, 17.0));
        assert!(!store.move_shape(&floors[0], "missing", 1.0, 1.0));
    }
}
