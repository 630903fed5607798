use crate::model::{ElementType, Group, SelectionElement, Shape};
use crate::shape_store::ShapeStore;
use floorplan_core::error::LayoutError;
use floorplan_core::geometry::{bounding_box, centroid, rotate_point, Point};
use floorplan_core::ids::{new_id, IdKind};

/// Creates, dissolves and transforms rigid groups of shapes.
///
/// `GroupManager` is responsible for:
/// - Grouping a selection of shapes that share one floor
/// - Ungrouping a selected group back into its member shapes
/// - Moving, rotating and resizing every member of a group as one body
///
/// # Rigidity
///
/// A group's `center` is its pivot. Every transform applies to all members
/// at once and keeps member rotation equal to the group rotation, so
/// grouped shapes never drift relative to each other.
///
/// # Failure semantics
///
/// Operations on a missing group or shape are no-ops that return `false`.
/// Only [`create_group`](Self::create_group) rejects its input, with a
/// [`LayoutError`], and it does so before touching the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupManager;

impl GroupManager {
    /// Groups the shape elements of `selection`.
    ///
    /// Requires at least two existing, ungrouped shapes, all on the same
    /// floor. Non-shape elements in the selection are ignored. On success the members are
    /// stamped with the new group id, the selection becomes the group and
    /// the group id is returned.
    pub fn create_group(
        store: &mut ShapeStore,
        selection: &[SelectionElement],
    ) -> Result<String, LayoutError> {
        let shape_elements: Vec<&SelectionElement> = selection
            .iter()
            .filter(|el| el.kind == ElementType::Shape)
            .collect();

        let mut floors: Vec<String> = Vec::new();
        for el in &shape_elements {
            if !floors.contains(&el.floor_id) {
                floors.push(el.floor_id.clone());
            }
        }
        if floors.len() > 1 {
            tracing::warn!("Rejected grouping across floors {:?}", floors);
            return Err(LayoutError::CrossFloorGrouping { floors });
        }

        let mut members: Vec<Shape> = Vec::new();
        if let Some(floor_id) = floors.first() {
            for el in &shape_elements {
                if members.iter().any(|m| m.id == el.id) {
                    continue;
                }
                if let Some(shape) = store.shape(floor_id, &el.id) {
                    if let Some(group_id) = &shape.group_id {
                        return Err(LayoutError::AlreadyGrouped {
                            shape_id: shape.id.clone(),
                            group_id: group_id.clone(),
                        });
                    }
                    members.push(shape.clone());
                }
            }
        }
        if members.len() < 2 {
            return Err(LayoutError::InsufficientShapes {
                found: members.len(),
            });
        }
        let floor_id = floors.swap_remove(0);

        let center = centroid(&members);
        let bounds = bounding_box(&members, 0.0);
        let group = Group {
            id: new_id(IdKind::Group),
            name: format!("Group {}", store.groups().len() + 1),
            floor_id: floor_id.clone(),
            shape_ids: members.iter().map(|s| s.id.clone()).collect(),
            rotation_degrees: 0.0,
            center,
            width: Some(bounds.width),
            height: Some(bounds.height),
        };
        let group_id = group.id.clone();

        for member in &members {
            if let Some(shape) = store.shape_mut(&floor_id, &member.id) {
                shape.group_id = Some(group_id.clone());
            }
        }
        tracing::debug!(
            "Created {} with {} shapes on floor {}",
            group_id,
            group.shape_ids.len(),
            floor_id
        );
        store.groups_mut().insert(group_id.clone(), group);
        store.set_selected(vec![SelectionElement::group(group_id.clone(), floor_id)]);
        store.debug_assert_invariants();
        Ok(group_id)
    }

    /// Dissolves the group when `selection` is exactly one group element.
    ///
    /// Members lose their group id and become the new selection. Any other
    /// selection is a no-op returning `false`.
    pub fn ungroup_elements(store: &mut ShapeStore, selection: &[SelectionElement]) -> bool {
        let [only] = selection else {
            return false;
        };
        if only.kind != ElementType::Group {
            return false;
        }
        let Some(group) = store.groups_mut().remove(&only.id) else {
            return false;
        };

        for shape_id in &group.shape_ids {
            if let Some(shape) = store.shape_mut(&group.floor_id, shape_id) {
                shape.group_id = None;
            }
        }
        let members = group
            .shape_ids
            .iter()
            .map(|id| SelectionElement::shape(id.clone(), group.floor_id.clone()))
            .collect();
        store.set_selected(members);
        tracing::debug!("Ungrouped {}", group.id);
        store.debug_assert_invariants();
        true
    }

    /// Rotates a group to the absolute angle `angle_degrees`.
    ///
    /// Each member's top-left corner is rotated about the group center by
    /// the difference between the target angle and that member's current
    /// rotation, then the member's rotation is set to the target.
    pub fn rotate_group(store: &mut ShapeStore, group_id: &str, angle_degrees: f64) -> bool {
        let Some(group) = store.group(group_id).cloned() else {
            return false;
        };

        for shape_id in &group.shape_ids {
            if let Some(shape) = store.shape_mut(&group.floor_id, shape_id) {
                let rotated = rotate_point(
                    shape.position(),
                    group.center,
                    angle_degrees - shape.rotation_degrees,
                );
                shape.x = rotated.x;
                shape.y = rotated.y;
                shape.rotation_degrees = angle_degrees;
            }
        }
        if let Some(group) = store.groups_mut().get_mut(group_id) {
            group.rotation_degrees = angle_degrees;
        }
        true
    }

    /// Translates a group's center and all its members by `(dx, dy)`.
    ///
    /// This is the only way a grouped shape moves.
    pub fn move_group(store: &mut ShapeStore, group_id: &str, dx: f64, dy: f64) -> bool {
        let Some(group) = store.groups_mut().get_mut(group_id) else {
            return false;
        };
        group.center = group.center.offset(dx, dy);
        let group = group.clone();

        for shape_id in &group.shape_ids {
            if let Some(shape) = store.shape_mut(&group.floor_id, shape_id) {
                shape.x += dx;
                shape.y += dy;
            }
        }
        true
    }

    /// Scales a group to `width` x `height` about its center.
    ///
    /// Every member's center offset from the pivot and its own size are
    /// scaled by the same factors, so the members keep their arrangement.
    /// Without a stored size the members' current extent is used. A
    /// missing group, a non-positive target or a degenerate current size is
    /// a no-op.
    pub fn resize_group(store: &mut ShapeStore, group_id: &str, width: f64, height: f64) -> bool {
        let Some(group) = store.group(group_id).cloned() else {
            return false;
        };
        if width <= 0.0 || height <= 0.0 {
            return false;
        }

        let (old_width, old_height) = match (group.width, group.height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                let members = Self::members(store, &group);
                let bounds = bounding_box(&members, 0.0);
                (bounds.width, bounds.height)
            }
        };
        if old_width <= 0.0 || old_height <= 0.0 {
            return false;
        }
        let sx = width / old_width;
        let sy = height / old_height;
        let pivot = group.center;

        for shape_id in &group.shape_ids {
            if let Some(shape) = store.shape_mut(&group.floor_id, shape_id) {
                let center = Point::new(shape.x + shape.width / 2.0, shape.y + shape.height / 2.0);
                let new_center = Point::new(
                    pivot.x + (center.x - pivot.x) * sx,
                    pivot.y + (center.y - pivot.y) * sy,
                );
                shape.width *= sx;
                shape.height *= sy;
                shape.x = new_center.x - shape.width / 2.0;
                shape.y = new_center.y - shape.height / 2.0;
            }
        }
        if let Some(group) = store.groups_mut().get_mut(group_id) {
            group.width = Some(width);
            group.height = Some(height);
        }
        tracing::debug!("Resized {} to {}x{}", group_id, width, height);
        true
    }

    /// Adds a shape to an existing group.
    ///
    /// The shape must exist on the group's floor and not belong to any
    /// group. The group's center and size are left as they are, so the
    /// pivot stays anchored to the original members.
    pub fn add_shape_to_group(store: &mut ShapeStore, shape_id: &str, group_id: &str) -> bool {
        let Some(floor_id) = store.group(group_id).map(|g| g.floor_id.clone()) else {
            return false;
        };
        match store.shape_mut(&floor_id, shape_id) {
            Some(shape) if shape.group_id.is_none() => {
                shape.group_id = Some(group_id.to_string());
            }
            _ => return false,
        }
        if let Some(group) = store.groups_mut().get_mut(group_id) {
            group.shape_ids.push(shape_id.to_string());
        }

        // A selected shape is now reachable only through its group.
        if store
            .selected_elements()
            .iter()
            .any(|el| el.refers_to(ElementType::Shape, shape_id))
        {
            let group_element = SelectionElement::group(group_id, floor_id);
            let mut selected = Vec::with_capacity(store.selected_elements().len());
            for el in store.selected_elements() {
                let el = if el.refers_to(ElementType::Shape, shape_id) {
                    group_element.clone()
                } else {
                    el.clone()
                };
                if !selected.contains(&el) {
                    selected.push(el);
                }
            }
            store.set_selected(selected);
        }
        store.debug_assert_invariants();
        true
    }

    /// Makes the group the only selected element.
    pub fn select_group(store: &mut ShapeStore, group_id: &str) -> bool {
        let Some(floor_id) = store.group(group_id).map(|g| g.floor_id.clone()) else {
            return false;
        };
        store.set_selected(vec![SelectionElement::group(group_id, floor_id)]);
        true
    }

    /// Deletes a group together with all of its member shapes.
    pub fn delete_group(store: &mut ShapeStore, group_id: &str) -> bool {
        let Some(group) = store.groups_mut().remove(group_id) else {
            return false;
        };
        if let Some(floor) = store.floor_mut(&group.floor_id) {
            floor.shapes.retain(|s| !group.contains(&s.id));
        }
        store.selected_mut().retain(|el| {
            !el.refers_to(ElementType::Group, group_id) && !group.contains(&el.id)
        });
        tracing::debug!(
            "Deleted {} and its {} shapes",
            group_id,
            group.shape_ids.len()
        );
        store.debug_assert_invariants();
        true
    }

    /// Current member shapes of a group.
    pub fn members(store: &ShapeStore, group: &Group) -> Vec<Shape> {
        group
            .shape_ids
            .iter()
            .filter_map(|id| store.shape(&group.floor_id, id).cloned())
            .collect()
    }
}
