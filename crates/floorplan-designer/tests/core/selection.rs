use floorplan_designer::{ElementType, LayoutEngine, SelectionElement, SelectionManager, Shape};

fn engine() -> (LayoutEngine, String) {
    let mut engine = LayoutEngine::new();
    let floor = engine.add_floor();
    engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0).with_id("a"));
    engine.add_shape(Shape::table(20.0, 0.0, 10.0, 10.0).with_id("b"));
    engine.add_shape(Shape::chair(40.0, 0.0, 5.0, 5.0, "a").with_id("c"));
    (engine, floor)
}

#[test]
fn test_selecting_grouped_shape_selects_group() {
    let (mut engine, floor) = engine();
    let gid = engine
        .create_group(&[
            SelectionElement::shape("a", floor.clone()),
            SelectionElement::shape("b", floor.clone()),
        ])
        .unwrap();
    engine.clear_selection();

    for member in ["a", "b"] {
        engine.select_shape(member, false);
        assert_eq!(
            engine.selected_elements(),
            &[SelectionElement::group(gid.clone(), floor.clone())]
        );
    }
    assert!(!SelectionManager::is_selected(
        engine.store(),
        ElementType::Shape,
        "a"
    ));
}

#[test]
fn test_additive_mixes_groups_and_shapes() {
    let (mut engine, floor) = engine();
    let gid = engine
        .create_group(&[
            SelectionElement::shape("a", floor.clone()),
            SelectionElement::shape("b", floor.clone()),
        ])
        .unwrap();

    engine.select_shape("c", true);
    assert_eq!(
        engine.selected_elements(),
        &[
            SelectionElement::group(gid, floor.clone()),
            SelectionElement::shape("c", floor),
        ]
    );
}

#[test]
fn test_deleting_selected_shape_prunes_selection() {
    let (mut engine, floor) = engine();
    engine.select_shape("a", false);
    engine.select_shape("c", true);

    assert!(engine.delete_shape(&floor, "a"));
    assert_eq!(
        engine.selected_elements(),
        &[SelectionElement::shape("c", floor)]
    );
    assert!(engine.selection().primary().is_some());
}

#[test]
fn test_select_none() {
    let (mut engine, _) = engine();
    engine.select_shape("a", false);
    engine.set_selected_elements(Vec::new());
    assert!(engine.selected_elements().is_empty());
    assert!(engine.selection().primary().is_none());
}

#[test]
fn test_joining_group_moves_selection_to_group() {
    let (mut engine, floor) = engine();
    let gid = engine
        .create_group(&[
            SelectionElement::shape("a", floor.clone()),
            SelectionElement::shape("b", floor.clone()),
        ])
        .unwrap();
    engine.select_shape("c", false);

    assert!(engine.add_shape_to_group("c", &gid));
    assert_eq!(
        engine.selected_elements(),
        &[SelectionElement::group(gid.clone(), floor.clone())]
    );
    assert!(!SelectionManager::is_selected(
        engine.store(),
        ElementType::Shape,
        "c"
    ));
    assert!(engine.store().check_invariants().is_ok());

    assert!(engine.undo());
    assert!(engine.store().find_shape("c").unwrap().group_id.is_none());
    assert_eq!(engine.store().group(&gid).unwrap().shape_ids.len(), 2);
    assert!(engine.store().check_invariants().is_ok());
}

#[test]
fn test_explicit_selection_of_member_selects_group() {
    let (mut engine, floor) = engine();
    let gid = engine
        .create_group(&[
            SelectionElement::shape("a", floor.clone()),
            SelectionElement::shape("b", floor.clone()),
        ])
        .unwrap();

    engine.set_selected_elements(vec![SelectionElement::shape("b", floor.clone())]);
    assert_eq!(
        engine.selected_elements(),
        &[SelectionElement::group(gid, floor)]
    );
    assert!(engine.store().check_invariants().is_ok());
}
