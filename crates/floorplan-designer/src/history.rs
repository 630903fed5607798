//! Linear undo/redo over full-state snapshots.
//!
//! Every logically complete action pushes one [`HistorySnapshot`]. Undo and
//! redo move an index over the snapshot list and restore the snapshot it
//! lands on. Pushing while the index is not at the newest snapshot discards
//! the redo-able future first.

use crate::model::{Floor, Group, SelectionElement};
use crate::shape_store::ShapeStore;
use std::collections::BTreeMap;

/// Deep copy of floors, groups and selection. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    floors: Vec<Floor>,
    groups: BTreeMap<String, Group>,
    selected_elements: Vec<SelectionElement>,
}

impl HistorySnapshot {
    pub fn new(
        floors: Vec<Floor>,
        groups: BTreeMap<String, Group>,
        selected_elements: Vec<SelectionElement>,
    ) -> Self {
        Self {
            floors,
            groups,
            selected_elements,
        }
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    pub fn selected_elements(&self) -> &[SelectionElement] {
        &self.selected_elements
    }
}

/// Snapshot stack with a cursor.
///
/// `index` points at the snapshot matching the live state; `None` means
/// nothing has been recorded yet. When more than `max_depth` snapshots are
/// held the oldest ones are dropped.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<HistorySnapshot>,
    index: Option<usize>,
    max_depth: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Records the current state of `store`.
    pub fn add_to_history(&mut self, store: &ShapeStore) {
        if let Some(index) = self.index {
            self.snapshots.truncate(index + 1);
        }
        self.snapshots.push(store.snapshot());

        let overflow = self.snapshots.len().saturating_sub(self.max_depth);
        if overflow > 0 {
            self.snapshots.drain(..overflow);
        }
        self.index = Some(self.snapshots.len() - 1);
        tracing::debug!(
            "History: {} snapshot(s), at {}",
            self.snapshots.len(),
            self.snapshots.len() - 1
        );
    }

    /// Restores the previous snapshot. No-op at the oldest one.
    pub fn undo(&mut self, store: &mut ShapeStore) -> bool {
        match self.index {
            Some(index) if index > 0 => {
                store.restore(&self.snapshots[index - 1]);
                self.index = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Restores the next snapshot. No-op at the newest one.
    pub fn redo(&mut self, store: &mut ShapeStore) -> bool {
        match self.index {
            Some(index) if index + 1 < self.snapshots.len() => {
                store.restore(&self.snapshots[index + 1]);
                self.index = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.snapshots.len())
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Position of the snapshot matching the live state.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Forgets every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = None;
    }
}
