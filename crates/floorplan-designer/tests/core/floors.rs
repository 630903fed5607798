use floorplan_designer::{GroupManager, LayoutEngine, SelectionElement, Shape};

#[test]
fn test_delete_floor_cascades() {
    let mut engine = LayoutEngine::new();
    let keep = engine.add_floor();
    let doomed = engine.add_floor();

    engine.select_floor(&doomed);
    let a = engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0)).unwrap();
    let b = engine.add_shape(Shape::table(20.0, 0.0, 10.0, 10.0)).unwrap();
    let gid = engine
        .create_group(&[
            SelectionElement::shape(a, doomed.clone()),
            SelectionElement::shape(b, doomed.clone()),
        ])
        .unwrap();

    assert!(engine.delete_floor(&doomed));
    assert_eq!(engine.store().floors().len(), 1);
    assert_eq!(engine.store().floors()[0].id, keep);
    assert!(engine.store().group(&gid).is_none());
    assert!(engine.selected_elements().is_empty());
    assert!(engine.store().check_invariants().is_ok());
}

#[test]
fn test_duplicate_floor_rewrites_ids() {
    let mut engine = LayoutEngine::new();
    let floor = engine.add_floor();
    let table = engine.add_shape(Shape::table(0.0, 0.0, 80.0, 80.0)).unwrap();
    engine.add_shape(Shape::chair(90.0, 0.0, 40.0, 40.0, table.clone()));

    let copy = engine.duplicate_floor(&floor).unwrap();
    let source = engine.store().floor(&floor).unwrap();
    let duplicate = engine.store().floor(&copy).unwrap();

    assert_eq!(duplicate.name, format!("{} (Copy)", source.name));
    assert_eq!(duplicate.x, source.x + 20.0);
    assert_eq!(duplicate.z_index, 2);
    assert_eq!(duplicate.shapes.len(), 2);
    for shape in &duplicate.shapes {
        assert!(source.shape(&shape.id).is_none());
        assert_eq!(shape.floor_id, copy);
    }

    // The copied chair follows the copied table.
    let copied_table = &duplicate.shapes[0];
    assert_eq!(
        engine.store().chairs_for_table(&copy, &copied_table.id).len(),
        1
    );
    assert!(engine.store().check_invariants().is_ok());
}

#[test]
fn test_shapes_go_to_selected_floor() {
    let mut engine = LayoutEngine::new();
    let first = engine.add_floor();
    let second = engine.add_floor();

    let on_first = engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0)).unwrap();
    engine.select_floor(&second);
    let on_second = engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert!(engine.store().shape(&first, &on_first).is_some());
    assert!(engine.store().shape(&second, &on_second).is_some());
}

#[test]
fn test_delete_group_removes_members() {
    let mut engine = LayoutEngine::new();
    let floor = engine.add_floor();
    engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0).with_id("a"));
    engine.add_shape(Shape::table(20.0, 0.0, 10.0, 10.0).with_id("b"));
    engine.add_shape(Shape::table(40.0, 0.0, 10.0, 10.0).with_id("c"));
    let gid = engine
        .create_group(&[
            SelectionElement::shape("a", floor.clone()),
            SelectionElement::shape("b", floor.clone()),
        ])
        .unwrap();

    assert!(engine.delete_group(&gid));
    let remaining: Vec<&str> = engine.store().floors()[0]
        .shapes
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(remaining, vec!["c"]);

    assert!(engine.undo());
    assert_eq!(engine.store().shape_count(), 3);
    assert_eq!(
        GroupManager::members(engine.store(), engine.store().group(&gid).unwrap()).len(),
        2
    );
}
