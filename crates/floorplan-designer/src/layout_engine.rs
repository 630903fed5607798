//! Engine facade used by UI glue.
//!
//! `LayoutEngine` owns the one [`ShapeStore`] together with the selection
//! rules, the undo history and the configuration. Each completed action
//! records exactly one history snapshot. Gestures (drag, live rotation)
//! update the store without recording and are closed with [`commit`].
//!
//! [`commit`]: LayoutEngine::commit

use anyhow::Result;
use floorplan_core::error::LayoutError;
use floorplan_core::geometry::{Bounded, Rect};
use floorplan_core::ids::{new_id, IdKind};
use floorplan_settings::Config;
use std::collections::HashMap;
use std::path::Path;

use crate::group_manager::GroupManager;
use crate::history::HistoryManager;
use crate::model::{ElementType, Floor, ReservationPatch, SelectionElement, Shape};
use crate::selection_manager::SelectionManager;
use crate::serialization::PlanFile;
use crate::shape_store::ShapeStore;

/// Single entry point for editing a floor plan.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    store: ShapeStore,
    selection: SelectionManager,
    history: HistoryManager,
    config: Config,
    clipboard: Vec<Shape>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Creates an empty engine with default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty engine. The empty state is the first history
    /// snapshot, so the first action can be undone.
    pub fn with_config(config: Config) -> Self {
        let store = ShapeStore::new();
        let mut history = HistoryManager::new(config.history.max_depth);
        history.add_to_history(&store);
        Self {
            store,
            selection: SelectionManager::new(),
            history,
            config,
            clipboard: Vec::new(),
        }
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selected_elements(&self) -> &[SelectionElement] {
        self.store.selected_elements()
    }

    fn record(&mut self) {
        self.history.add_to_history(&self.store);
    }

    /// Records a snapshot when `changed` is true, passing it through.
    fn record_if(&mut self, changed: bool) -> bool {
        if changed {
            self.record();
        }
        changed
    }

    // Floors

    pub fn add_floor(&mut self) -> String {
        let id = self.store.add_floor(&self.config.floor);
        self.record();
        id
    }

    pub fn update_floor(&mut self, floor_id: &str, floor: Floor) -> bool {
        let changed = self.store.update_floor(floor_id, floor);
        self.record_if(changed)
    }

    pub fn delete_floor(&mut self, floor_id: &str) -> bool {
        let changed = self.store.delete_floor(floor_id);
        self.selection.prune(&mut self.store);
        self.record_if(changed)
    }

    pub fn duplicate_floor(&mut self, floor_id: &str) -> Option<String> {
        let id = self.store.duplicate_floor(floor_id, &self.config.floor)?;
        self.record();
        Some(id)
    }

    pub fn bring_floor_to_front(&mut self, floor_id: &str) -> bool {
        let changed = self.store.bring_floor_to_front(floor_id);
        self.record_if(changed)
    }

    pub fn send_floor_to_back(&mut self, floor_id: &str) -> bool {
        let changed = self.store.send_floor_to_back(floor_id);
        self.record_if(changed)
    }

    // Shapes

    pub fn add_shape(&mut self, shape: Shape) -> Option<String> {
        let id = self.store.add_shape(shape)?;
        self.record();
        Some(id)
    }

    pub fn update_shape(&mut self, floor_id: &str, shape_id: &str, shape: Shape) -> bool {
        let changed = self.store.update_shape(floor_id, shape_id, shape);
        self.record_if(changed)
    }

    pub fn delete_shape(&mut self, floor_id: &str, shape_id: &str) -> bool {
        let changed = self.store.delete_shape(floor_id, shape_id);
        self.selection.prune(&mut self.store);
        self.record_if(changed)
    }

    /// Moves a shape (or its whole group) and records the result.
    pub fn move_shape(&mut self, floor_id: &str, shape_id: &str, x: f64, y: f64) -> bool {
        let changed = self.store.move_shape(floor_id, shape_id, x, y);
        self.record_if(changed)
    }

    pub fn rotate_shape(&mut self, floor_id: &str, shape_id: &str, angle_degrees: f64) -> bool {
        let changed = self.store.rotate_shape(floor_id, shape_id, angle_degrees);
        self.record_if(changed)
    }

    // Groups

    /// Groups the given selection. Nothing is recorded on rejection.
    pub fn create_group(
        &mut self,
        selection: &[SelectionElement],
    ) -> std::result::Result<String, LayoutError> {
        let id = GroupManager::create_group(&mut self.store, selection)?;
        let selected = self.store.selected_elements().to_vec();
        self.selection.set_selected_elements(&mut self.store, selected);
        self.record();
        Ok(id)
    }

    /// Groups whatever is currently selected.
    pub fn group_selection(&mut self) -> std::result::Result<String, LayoutError> {
        let selection = self.store.selected_elements().to_vec();
        self.create_group(&selection)
    }

    pub fn ungroup_elements(&mut self, selection: &[SelectionElement]) -> bool {
        let changed = GroupManager::ungroup_elements(&mut self.store, selection);
        if changed {
            self.selection.reset_primary();
        }
        self.record_if(changed)
    }

    /// Ungroups the current selection when it is a single group.
    pub fn ungroup_selection(&mut self) -> bool {
        let selection = self.store.selected_elements().to_vec();
        self.ungroup_elements(&selection)
    }

    pub fn rotate_group(&mut self, group_id: &str, angle_degrees: f64) -> bool {
        let changed = GroupManager::rotate_group(&mut self.store, group_id, angle_degrees);
        self.record_if(changed)
    }

    pub fn move_group(&mut self, group_id: &str, dx: f64, dy: f64) -> bool {
        let changed = GroupManager::move_group(&mut self.store, group_id, dx, dy);
        self.record_if(changed)
    }

    pub fn resize_group(&mut self, group_id: &str, width: f64, height: f64) -> bool {
        let changed = GroupManager::resize_group(&mut self.store, group_id, width, height);
        self.record_if(changed)
    }

    pub fn add_shape_to_group(&mut self, shape_id: &str, group_id: &str) -> bool {
        let changed = GroupManager::add_shape_to_group(&mut self.store, shape_id, group_id);
        if changed {
            let selected = self.store.selected_elements().to_vec();
            self.selection.set_selected_elements(&mut self.store, selected);
        }
        self.record_if(changed)
    }

    pub fn delete_group(&mut self, group_id: &str) -> bool {
        let changed = GroupManager::delete_group(&mut self.store, group_id);
        self.selection.prune(&mut self.store);
        self.record_if(changed)
    }

    // Selection. Selection changes alone are not recorded.

    pub fn select_shape(&mut self, shape_id: &str, additive: bool) -> Option<SelectionElement> {
        self.selection.select_shape(&mut self.store, shape_id, additive)
    }

    pub fn select_floor(&mut self, floor_id: &str) -> bool {
        self.selection.select_floor(&mut self.store, floor_id)
    }

    pub fn select_group(&mut self, group_id: &str) -> bool {
        GroupManager::select_group(&mut self.store, group_id)
    }

    pub fn set_selected_elements(&mut self, elements: Vec<SelectionElement>) {
        self.selection.set_selected_elements(&mut self.store, elements);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.store);
    }

    // Reservations

    pub fn reserve_table(
        &mut self,
        floor_id: &str,
        table_id: &str,
        party_size: Option<u32>,
    ) -> Option<String> {
        let id = self.store.reserve_table(floor_id, table_id, party_size)?;
        self.record();
        Some(id)
    }

    pub fn unreserve_table(&mut self, floor_id: &str, table_id: &str) -> bool {
        let changed = self.store.unreserve_table(floor_id, table_id);
        self.record_if(changed)
    }

    pub fn update_reservation(
        &mut self,
        floor_id: &str,
        table_id: &str,
        patch: ReservationPatch,
    ) -> bool {
        let changed = self.store.update_reservation(floor_id, table_id, patch);
        self.record_if(changed)
    }

    // Gestures: transient updates, closed by `commit`.

    /// Moves a shape during a drag without recording history.
    pub fn drag_shape(&mut self, floor_id: &str, shape_id: &str, x: f64, y: f64) -> bool {
        self.store.move_shape(floor_id, shape_id, x, y)
    }

    /// Moves a group during a drag without recording history.
    pub fn drag_group(&mut self, group_id: &str, dx: f64, dy: f64) -> bool {
        GroupManager::move_group(&mut self.store, group_id, dx, dy)
    }

    /// Rotates a group during a rotation gesture without recording history.
    pub fn rotate_group_live(&mut self, group_id: &str, angle_degrees: f64) -> bool {
        GroupManager::rotate_group(&mut self.store, group_id, angle_degrees)
    }

    /// Records the state reached by a finished gesture.
    pub fn commit(&mut self) {
        self.record();
    }

    // Clipboard

    /// Copies the selected shapes, expanding selected groups into their
    /// members. Returns the number of shapes copied.
    pub fn copy_selection(&mut self) -> usize {
        let mut copied: Vec<Shape> = Vec::new();
        for el in self.store.selected_elements() {
            let shapes = match el.kind {
                ElementType::Shape => self
                    .store
                    .shape(&el.floor_id, &el.id)
                    .cloned()
                    .into_iter()
                    .collect(),
                ElementType::Group => match self.store.group(&el.id) {
                    Some(group) => GroupManager::members(&self.store, group),
                    None => Vec::new(),
                },
                ElementType::Floor => Vec::new(),
            };
            for shape in shapes {
                if !copied.iter().any(|s| s.id == shape.id) {
                    copied.push(shape);
                }
            }
        }
        self.clipboard = copied;
        tracing::debug!("Copied {} shape(s)", self.clipboard.len());
        self.clipboard.len()
    }

    /// Pastes the clipboard onto `floor_id` at the first collision-free
    /// offset and selects the copies.
    ///
    /// Copies get fresh ids and no group membership or reservation. Chairs
    /// pasted together with their table are linked to the table's copy.
    pub fn paste(&mut self, floor_id: &str) -> Vec<String> {
        if self.clipboard.is_empty() || self.store.floor(floor_id).is_none() {
            return Vec::new();
        }
        let rects: Vec<Rect> = self.clipboard.iter().map(Bounded::rect).collect();
        let offset = self
            .store
            .find_free_offset(floor_id, &rects, &self.config.placement);

        let id_map: HashMap<String, String> = self
            .clipboard
            .iter()
            .map(|s| (s.id.clone(), new_id(IdKind::Shape)))
            .collect();

        let mut pasted = Vec::with_capacity(self.clipboard.len());
        for shape in &self.clipboard {
            let mut copy = shape.clone();
            copy.id = id_map[&shape.id].clone();
            copy.x += offset.x;
            copy.y += offset.y;
            copy.group_id = None;
            copy.reservation = None;
            if let Some(table_id) = copy.table_id.as_ref().and_then(|t| id_map.get(t)) {
                copy.table_id = Some(table_id.clone());
            }
            if let Some(id) = self.store.add_shape_to_floor(floor_id, copy) {
                pasted.push(id);
            }
        }

        let selection = pasted
            .iter()
            .map(|id| SelectionElement::shape(id.clone(), floor_id))
            .collect();
        self.selection.set_selected_elements(&mut self.store, selection);
        self.record();
        tracing::debug!("Pasted {} shape(s) onto floor {}", pasted.len(), floor_id);
        pasted
    }

    // History

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.store);
        if changed {
            self.selection.reset_primary();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.store);
        if changed {
            self.selection.reset_primary();
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Persistence

    /// Captures the current floors and groups as a named plan.
    pub fn plan(&self, name: impl Into<String>) -> PlanFile {
        PlanFile::capture(name, &self.store)
    }

    pub fn save_plan(&self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        self.plan(name).save_to_file(path)
    }

    /// Replaces the whole state with `plan`.
    ///
    /// The selection is cleared and the history restarts from the loaded
    /// state. An inconsistent plan is rejected and leaves the engine as it
    /// was.
    pub fn load_plan(&mut self, plan: PlanFile) -> Result<()> {
        self.store = plan.into_store()?;
        self.selection.clear(&mut self.store);
        self.clipboard.clear();
        self.history.clear();
        self.record();
        Ok(())
    }

    pub fn load_plan_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let plan = PlanFile::load_from_file(path)?;
        self.load_plan(plan)
    }
}
