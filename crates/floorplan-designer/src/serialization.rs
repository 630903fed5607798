//! Saved plan records.
//!
//! A plan is stored as pretty-printed JSON:
//! `{ name, floors, groups, savedAt }`, with `groups` keyed by group id and
//! `savedAt` as an RFC 3339 timestamp. The selection is not part of a plan.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use floorplan_core::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::model::{Floor, Group};
use crate::shape_store::ShapeStore;

/// Complete persisted plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFile {
    pub name: String,
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub groups: BTreeMap<String, Group>,
    pub saved_at: DateTime<Utc>,
}

impl PlanFile {
    /// Captures floors and groups from a store, stamped with the current time.
    pub fn capture(name: impl Into<String>, store: &ShapeStore) -> Self {
        Self {
            name: name.into(),
            floors: store.floors().to_vec(),
            groups: store.groups().clone(),
            saved_at: Utc::now(),
        }
    }

    /// Builds a store from the plan, rejecting plans that reuse a floor id
    /// or whose shapes and groups are inconsistent.
    pub fn into_store(self) -> floorplan_core::Result<ShapeStore> {
        let mut floor_ids = HashSet::new();
        if let Some(floor) = self.floors.iter().find(|f| !floor_ids.insert(f.id.as_str())) {
            return Err(Error::plan(format!(
                "plan '{}' uses floor id {} more than once",
                self.name, floor.id
            )));
        }

        let store = ShapeStore::from_parts(self.floors, self.groups);
        if let Err(violation) = store.check_invariants() {
            tracing::warn!("Plan '{}' is inconsistent: {}", self.name, violation);
            return Err(violation.into());
        }
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize plan")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse plan")
    }

    /// Save plan to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).context("Failed to write plan file")?;
        tracing::info!(
            "Saved plan '{}' ({} floors) to {}",
            self.name,
            self.floors.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load plan from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read plan file")?;
        let plan = Self::from_json(&content)?;
        tracing::info!(
            "Loaded plan '{}' ({} floors) from {}",
            plan.name,
            plan.floors.len(),
            path.as_ref().display()
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;
    use floorplan_core::error::InvariantViolation;
    use floorplan_settings::FloorSettings;

    #[test]
    fn test_json_field_names() {
        let mut store = ShapeStore::new();
        store.add_floor(&FloorSettings::default());
        store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0).with_id("t1"));

        let json = PlanFile::capture("Bistro", &store).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Bistro");
        assert!(value["savedAt"].is_string());
        assert!(value["groups"].is_object());
        assert_eq!(value["floors"][0]["shapes"][0]["id"], "t1");
    }

    #[test]
    fn test_inconsistent_plan_rejected() {
        let mut store = ShapeStore::new();
        store.add_floor(&FloorSettings::default());
        store.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0).with_id("t1"));

        let mut plan = PlanFile::capture("Broken", &store);
        plan.floors[0].shapes[0].group_id = Some("group-missing".to_string());
        assert!(matches!(
            plan.into_store(),
            Err(Error::Invariant(InvariantViolation::MissingGroup { .. }))
        ));
    }

    #[test]
    fn test_repeated_floor_id_rejected() {
        let mut store = ShapeStore::new();
        store.add_floor(&FloorSettings::default());

        let mut plan = PlanFile::capture("Doubled", &store);
        let mut copy = plan.floors[0].clone();
        copy.name = "Terrace".to_string();
        plan.floors.push(copy);

        let err = plan.into_store().unwrap_err();
        assert!(matches!(err, Error::Plan { .. }));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_missing_groups_field_defaults() {
        let json = r#"{"name":"Empty","floors":[],"savedAt":"2024-05-01T12:00:00Z"}"#;
        let plan = PlanFile::from_json(json).unwrap();
        assert!(plan.groups.is_empty());
        assert_eq!(plan.into_store().unwrap().floors().len(), 0);
    }
}
