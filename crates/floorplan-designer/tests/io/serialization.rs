use floorplan_core::error::{Error, InvariantViolation};
use floorplan_designer::{LayoutEngine, PlanFile, SelectionElement, Shape};
use tempfile::tempdir;

fn sample_engine() -> LayoutEngine {
    let mut engine = LayoutEngine::new();
    let floor = engine.add_floor();
    let table = engine
        .add_shape(Shape::table(10.0, 10.0, 80.0, 80.0).with_label("T1"))
        .unwrap();
    engine.add_shape(Shape::chair(100.0, 10.0, 40.0, 40.0, table.clone()).with_id("chair-1"));
    engine.add_shape(Shape::chair(100.0, 60.0, 40.0, 40.0, table.clone()).with_id("chair-2"));
    engine
        .create_group(&[
            SelectionElement::shape("chair-1", floor.clone()),
            SelectionElement::shape("chair-2", floor.clone()),
        ])
        .unwrap();
    engine.reserve_table(&floor, &table, None);
    engine
}

#[test]
fn test_save_and_load_plan() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bistro.json");

    let engine = sample_engine();
    engine.save_plan("Bistro", &path).unwrap();

    let mut loaded = LayoutEngine::new();
    loaded.load_plan_file(&path).unwrap();

    assert_eq!(loaded.store().floors(), engine.store().floors());
    assert_eq!(loaded.store().groups(), engine.store().groups());
    assert!(loaded.selected_elements().is_empty());
    assert!(!loaded.can_undo());

    let plan = PlanFile::load_from_file(&path).unwrap();
    assert_eq!(plan.name, "Bistro");
    let table = &plan.floors[0].shapes[0];
    assert_eq!(table.reservation.as_ref().unwrap().party_size, 2);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let mut engine = LayoutEngine::new();
    assert!(engine
        .load_plan_file(dir.path().join("missing.json"))
        .is_err());
    assert!(engine.store().floors().is_empty());
}

#[test]
fn test_load_rejects_broken_group() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");

    let mut plan = sample_engine().plan("Broken");
    let group = plan.groups.values_mut().next().unwrap();
    group.shape_ids.push("ghost".to_string());
    plan.save_to_file(&path).unwrap();

    let mut engine = sample_engine();
    let before = engine.store().clone();
    let err = engine.load_plan_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Invariant(InvariantViolation::MemberNotOnFloor { .. }))
    ));
    assert_eq!(engine.store(), &before);
}

#[test]
fn test_plan_json_round_trip() {
    let plan = sample_engine().plan("Terrace");
    let json = plan.to_json().unwrap();
    let parsed = PlanFile::from_json(&json).unwrap();
    assert_eq!(parsed, plan);
}
