//! Selection handling with group expansion.
//!
//! The selection list itself lives in the [`ShapeStore`] so it is captured by
//! history snapshots. `SelectionManager` adds the rules on top: grouped
//! shapes select their whole group, and references to deleted entities are
//! dropped.

use crate::model::{ElementType, SelectionElement};
use crate::shape_store::ShapeStore;

/// Applies selection rules to the store's selection list.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    primary: Option<SelectionElement>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a shape, or its group when it is grouped.
    ///
    /// With `additive` the element is appended unless already selected;
    /// otherwise it replaces the selection. Returns the element that was
    /// selected, or `None` when the shape does not exist.
    pub fn select_shape(
        &mut self,
        store: &mut ShapeStore,
        shape_id: &str,
        additive: bool,
    ) -> Option<SelectionElement> {
        let shape = store.find_shape(shape_id)?;
        let element = match &shape.group_id {
            Some(group_id) => SelectionElement::group(group_id.clone(), shape.floor_id.clone()),
            None => SelectionElement::shape(shape.id.clone(), shape.floor_id.clone()),
        };

        if additive {
            if !store.selected_elements().contains(&element) {
                store.selected_mut().push(element.clone());
            }
        } else {
            store.set_selected(vec![element.clone()]);
        }
        self.primary = Some(element.clone());
        Some(element)
    }

    /// Makes a floor the only selected element.
    pub fn select_floor(&mut self, store: &mut ShapeStore, floor_id: &str) -> bool {
        if store.floor(floor_id).is_none() {
            return false;
        }
        let element = SelectionElement::floor(floor_id);
        store.set_selected(vec![element.clone()]);
        self.primary = Some(element);
        true
    }

    /// Replaces the selection. Elements that do not exist are dropped, as
    /// are duplicates. A grouped shape is replaced by its group.
    pub fn set_selected_elements(
        &mut self,
        store: &mut ShapeStore,
        elements: Vec<SelectionElement>,
    ) {
        let mut selected: Vec<SelectionElement> = Vec::with_capacity(elements.len());
        for element in elements {
            if !store.element_exists(&element) {
                continue;
            }
            let element = Self::group_of(store, element);
            if !selected.contains(&element) {
                selected.push(element);
            }
        }
        self.primary = selected.first().cloned();
        store.set_selected(selected);
    }

    fn group_of(store: &ShapeStore, element: SelectionElement) -> SelectionElement {
        if element.kind != ElementType::Shape {
            return element;
        }
        match store
            .find_shape(&element.id)
            .and_then(|shape| Some((shape.group_id.clone()?, shape.floor_id.clone())))
        {
            Some((group_id, floor_id)) => SelectionElement::group(group_id, floor_id),
            None => element,
        }
    }

    /// Selects nothing.
    pub fn clear(&mut self, store: &mut ShapeStore) {
        self.primary = None;
        store.set_selected(Vec::new());
    }

    /// Removes dangling references from the selection and the primary
    /// element.
    pub fn prune(&mut self, store: &mut ShapeStore) {
        store.prune_selection();
        if self
            .primary
            .as_ref()
            .is_some_and(|el| !store.element_exists(el))
        {
            self.primary = None;
        }
    }

    /// The element selected last, used as the anchor for property edits.
    pub fn primary(&self) -> Option<&SelectionElement> {
        self.primary.as_ref()
    }

    /// Forgets the primary element without touching the selection.
    pub fn reset_primary(&mut self) {
        self.primary = None;
    }

    pub fn selected_count(store: &ShapeStore) -> usize {
        store.selected_elements().len()
    }

    pub fn is_selected(store: &ShapeStore, kind: ElementType, id: &str) -> bool {
        store
            .selected_elements()
            .iter()
            .any(|el| el.refers_to(kind, id))
    }
}
