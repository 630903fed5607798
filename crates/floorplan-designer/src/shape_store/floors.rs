//! Floor operations: creation, replacement, cascade deletion, duplication and
//! z-ordering.

use super::ShapeStore;
use crate::model::{ElementType, Floor, Group};
use floorplan_core::ids::{new_id, IdKind};
use floorplan_settings::FloorSettings;
use std::collections::HashMap;

impl ShapeStore {
    /// Appends a new `Floor N` built from the configured defaults and
    /// returns its id.
    pub fn add_floor(&mut self, defaults: &FloorSettings) -> String {
        let mut floor = Floor::new(
            format!("Floor {}", self.floors.len() + 1),
            defaults.default_x,
            defaults.default_y,
            defaults.default_width,
            defaults.default_height,
        );
        floor.z_index = self.floors.len() as i64 + 1;
        let id = floor.id.clone();
        tracing::debug!("Added floor {} ({})", floor.name, id);
        self.floors.push(floor);
        id
    }

    /// Replaces a floor's name, placement, size and z-index.
    ///
    /// The floor keeps its id and its shapes; shapes change only through
    /// the shape operations. Returns `false` if the floor does not exist.
    pub fn update_floor(&mut self, floor_id: &str, replacement: Floor) -> bool {
        let Some(floor) = self.floor_mut(floor_id) else {
            return false;
        };
        floor.name = replacement.name;
        floor.x = replacement.x;
        floor.y = replacement.y;
        floor.width = replacement.width;
        floor.height = replacement.height;
        floor.z_index = replacement.z_index;
        true
    }

    /// Removes a floor, its shapes and every group on it, and prunes the
    /// selection of anything that referenced them.
    pub fn delete_floor(&mut self, floor_id: &str) -> bool {
        let Some(index) = self.floors.iter().position(|f| f.id == floor_id) else {
            return false;
        };
        let floor = self.floors.remove(index);
        self.groups.retain(|_, g| g.floor_id != floor_id);
        self.selected.retain(|el| {
            el.floor_id != floor_id && !(el.kind == ElementType::Floor && el.id == floor_id)
        });
        self.prune_selection();
        tracing::debug!(
            "Deleted floor {} with {} shapes",
            floor_id,
            floor.shapes.len()
        );
        self.debug_assert_invariants();
        true
    }

    /// Copies a floor with all its shapes and groups under fresh ids.
    ///
    /// The copy is named `"<name> (Copy)"`, shifted by the configured
    /// duplicate offset and placed on top. Groups on the source floor are
    /// duplicated too, so the copy holds the same rigid groups.
    pub fn duplicate_floor(&mut self, floor_id: &str, defaults: &FloorSettings) -> Option<String> {
        let source = self.floor(floor_id)?.clone();
        let new_floor_id = new_id(IdKind::Floor);

        let shape_map: HashMap<String, String> = source
            .shapes
            .iter()
            .map(|s| (s.id.clone(), new_id(IdKind::Shape)))
            .collect();

        let mut group_map: HashMap<String, String> = HashMap::new();
        let mut new_groups: Vec<Group> = Vec::new();
        for group in self.groups.values().filter(|g| g.floor_id == floor_id) {
            let new_group_id = new_id(IdKind::Group);
            group_map.insert(group.id.clone(), new_group_id.clone());
            new_groups.push(Group {
                id: new_group_id,
                name: format!("{} (Copy)", group.name),
                floor_id: new_floor_id.clone(),
                shape_ids: group
                    .shape_ids
                    .iter()
                    .filter_map(|id| shape_map.get(id).cloned())
                    .collect(),
                ..group.clone()
            });
        }

        let shapes = source
            .shapes
            .iter()
            .map(|shape| {
                let mut copy = shape.clone();
                copy.id = shape_map[&shape.id].clone();
                copy.floor_id = new_floor_id.clone();
                copy.group_id = shape
                    .group_id
                    .as_ref()
                    .and_then(|gid| group_map.get(gid).cloned());
                // Chairs keep pointing at their table's copy when it exists.
                if let Some(table_id) = &shape.table_id {
                    if let Some(copied) = shape_map.get(table_id) {
                        copy.table_id = Some(copied.clone());
                    }
                }
                copy
            })
            .collect();

        let floor = Floor {
            id: new_floor_id.clone(),
            name: format!("{} (Copy)", source.name),
            x: source.x + defaults.duplicate_offset,
            y: source.y + defaults.duplicate_offset,
            z_index: self.floors.len() as i64 + 1,
            shapes,
            ..source
        };

        self.floors.push(floor);
        for group in new_groups {
            self.groups.insert(group.id.clone(), group);
        }
        tracing::debug!("Duplicated floor {} as {}", floor_id, new_floor_id);
        self.debug_assert_invariants();
        Some(new_floor_id)
    }

    /// Moves a floor above all others (`max + 1`).
    pub fn bring_floor_to_front(&mut self, floor_id: &str) -> bool {
        let Some(max) = self.floors.iter().map(|f| f.z_index).max() else {
            return false;
        };
        match self.floor_mut(floor_id) {
            Some(floor) => {
                floor.z_index = max + 1;
                true
            }
            None => false,
        }
    }

    /// Moves a floor below all others (`min - 1`).
    pub fn send_floor_to_back(&mut self, floor_id: &str) -> bool {
        let Some(min) = self.floors.iter().map(|f| f.z_index).min() else {
            return false;
        };
        match self.floor_mut(floor_id) {
            Some(floor) => {
                floor.z_index = min - 1;
                true
            }
            None => false,
        }
    }

    /// Floors ordered bottom to top; ties keep insertion order.
    pub fn floors_by_z(&self) -> Vec<&Floor> {
        let mut floors: Vec<&Floor> = self.floors.iter().collect();
        floors.sort_by_key(|f| f.z_index);
        floors
    }
}
