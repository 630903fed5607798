//! Canonical storage for floors, shapes, groups and the current selection.
//!
//! `ShapeStore` is the single source of truth. Managers never keep their own
//! copies of floors or groups; they receive the store as an explicit
//! parameter and mutate it through the operations defined here and in
//! [`crate::group_manager`].
//!
//! The implementation is split by concern:
//! - `floors`: floor CRUD, duplication and z-ordering
//! - `shapes`: shape CRUD and moves
//! - `reservations`: the table/reservation data link
//! - `placement`: collision and containment queries

mod floors;
mod placement;
mod reservations;
mod shapes;

use crate::history::HistorySnapshot;
use crate::model::{ElementType, Floor, Group, SelectionElement, Shape};
use floorplan_core::error::InvariantViolation;
use std::collections::{BTreeMap, HashSet};

/// Owns every floor (and, through them, every shape), every group and the
/// selection list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStore {
    floors: Vec<Floor>,
    groups: BTreeMap<String, Group>,
    selected: Vec<SelectionElement>,
}

impl ShapeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from loaded floors and groups.
    ///
    /// Each shape's `floor_id` is normalized to the floor that holds it, so
    /// plans saved without that field load consistently. The selection
    /// starts empty.
    pub fn from_parts(mut floors: Vec<Floor>, groups: BTreeMap<String, Group>) -> Self {
        for floor in &mut floors {
            for shape in &mut floor.shapes {
                shape.floor_id = floor.id.clone();
            }
        }
        Self {
            floors,
            groups,
            selected: Vec::new(),
        }
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == floor_id)
    }

    pub(crate) fn floor_mut(&mut self, floor_id: &str) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.id == floor_id)
    }

    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id)
    }

    pub(crate) fn groups_mut(&mut self) -> &mut BTreeMap<String, Group> {
        &mut self.groups
    }

    pub fn shape(&self, floor_id: &str, shape_id: &str) -> Option<&Shape> {
        self.floor(floor_id)?.shape(shape_id)
    }

    pub(crate) fn shape_mut(&mut self, floor_id: &str, shape_id: &str) -> Option<&mut Shape> {
        self.floor_mut(floor_id)?.shape_mut(shape_id)
    }

    /// Finds a shape on any floor.
    pub fn find_shape(&self, shape_id: &str) -> Option<&Shape> {
        self.floors.iter().find_map(|f| f.shape(shape_id))
    }

    /// Total number of shapes across all floors.
    pub fn shape_count(&self) -> usize {
        self.floors.iter().map(|f| f.shapes.len()).sum()
    }

    pub fn selected_elements(&self) -> &[SelectionElement] {
        &self.selected
    }

    pub(crate) fn set_selected(&mut self, elements: Vec<SelectionElement>) {
        self.selected = elements;
    }

    pub(crate) fn selected_mut(&mut self) -> &mut Vec<SelectionElement> {
        &mut self.selected
    }

    /// True when `element` names an entity that currently exists.
    pub fn element_exists(&self, element: &SelectionElement) -> bool {
        match element.kind {
            ElementType::Floor => self.floor(&element.id).is_some(),
            ElementType::Shape => self.find_shape(&element.id).is_some(),
            ElementType::Group => self.groups.contains_key(&element.id),
        }
    }

    /// Drops selection entries whose referent no longer exists.
    pub(crate) fn prune_selection(&mut self) {
        let selected = std::mem::take(&mut self.selected);
        self.selected = selected
            .into_iter()
            .filter(|el| self.element_exists(el))
            .collect();
    }

    /// Deep copy of floors, groups and selection.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(
            self.floors.clone(),
            self.groups.clone(),
            self.selected.clone(),
        )
    }

    /// Replaces the whole state with a snapshot's contents.
    pub fn restore(&mut self, snapshot: &HistorySnapshot) {
        self.floors = snapshot.floors().to_vec();
        self.groups = snapshot.groups().clone();
        self.selected = snapshot.selected_elements().to_vec();
    }

    /// Verifies the links between floors, shapes, groups and the selection.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for floor in &self.floors {
            for shape in &floor.shapes {
                if !seen.insert(shape.id.as_str()) {
                    return Err(InvariantViolation::DuplicateShapeId {
                        shape_id: shape.id.clone(),
                    });
                }
                if shape.floor_id != floor.id {
                    return Err(InvariantViolation::WrongFloor {
                        shape_id: shape.id.clone(),
                        stored_on: floor.id.clone(),
                        claimed: shape.floor_id.clone(),
                    });
                }
                if let Some(group_id) = &shape.group_id {
                    let group = self.groups.get(group_id).ok_or_else(|| {
                        InvariantViolation::MissingGroup {
                            shape_id: shape.id.clone(),
                            group_id: group_id.clone(),
                        }
                    })?;
                    if !group.contains(&shape.id) {
                        return Err(InvariantViolation::NotListed {
                            shape_id: shape.id.clone(),
                            group_id: group_id.clone(),
                        });
                    }
                }
            }
        }

        for group in self.groups.values() {
            let mut members = HashSet::new();
            for shape_id in &group.shape_ids {
                if !members.insert(shape_id.as_str()) {
                    return Err(InvariantViolation::DuplicateMember {
                        group_id: group.id.clone(),
                        shape_id: shape_id.clone(),
                    });
                }
                let shape = self.shape(&group.floor_id, shape_id).ok_or_else(|| {
                    InvariantViolation::MemberNotOnFloor {
                        group_id: group.id.clone(),
                        shape_id: shape_id.clone(),
                        floor_id: group.floor_id.clone(),
                    }
                })?;
                if shape.group_id.as_deref() != Some(group.id.as_str()) {
                    return Err(InvariantViolation::NotStamped {
                        group_id: group.id.clone(),
                        shape_id: shape_id.clone(),
                    });
                }
            }
        }

        if let Some(el) = self.selected.iter().find(|el| !self.element_exists(el)) {
            return Err(InvariantViolation::DanglingSelection {
                kind: format!("{:?}", el.kind).to_lowercase(),
                id: el.id.clone(),
            });
        }
        for el in self.selected.iter().filter(|el| el.kind == ElementType::Shape) {
            if let Some(group_id) = self.find_shape(&el.id).and_then(|s| s.group_id.as_ref()) {
                return Err(InvariantViolation::GroupedShapeSelected {
                    shape_id: el.id.clone(),
                    group_id: group_id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Fails loudly in debug builds when [`check_invariants`] finds a
    /// violation; logs it in release builds.
    ///
    /// [`check_invariants`]: Self::check_invariants
    pub fn debug_assert_invariants(&self) {
        if let Err(violation) = self.check_invariants() {
            if cfg!(debug_assertions) {
                panic!("floor plan invariant violated: {violation}");
            }
            tracing::warn!("Floor plan invariant violated: {}", violation);
        }
    }
}
