use floorplan_designer::{HistoryManager, LayoutEngine, SelectionElement, Shape, ShapeStore};
use floorplan_settings::{Config, FloorSettings};

#[test]
fn test_undo_at_start_leaves_state() {
    let mut engine = LayoutEngine::new();
    let before = engine.store().clone();

    assert!(!engine.undo());
    assert_eq!(engine.store(), &before);
    assert_eq!(engine.history().index(), Some(0));
}

#[test]
fn test_round_trip_over_actions() {
    let mut engine = LayoutEngine::new();
    let floor = engine.add_floor();
    engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0).with_id("a"));
    engine.add_shape(Shape::table(20.0, 0.0, 10.0, 10.0).with_id("b"));
    let gid = engine
        .create_group(&[
            SelectionElement::shape("a", floor.clone()),
            SelectionElement::shape("b", floor.clone()),
        ])
        .unwrap();
    engine.rotate_group(&gid, 45.0);
    engine.move_group(&gid, 12.0, -4.0);
    let final_state = engine.store().clone();

    let mut undone = 0;
    while engine.undo() {
        undone += 1;
    }
    assert_eq!(undone, 6);
    assert!(engine.store().floors().is_empty());

    while engine.redo() {}
    assert_eq!(engine.store(), &final_state);
}

#[test]
fn test_new_action_after_undo_drops_redo() {
    let mut engine = LayoutEngine::new();
    engine.add_floor();
    engine.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0));

    assert!(engine.undo());
    assert!(engine.can_redo());
    engine.add_shape(Shape::table(50.0, 50.0, 10.0, 10.0));
    assert!(!engine.can_redo());
    assert!(!engine.redo());
}

#[test]
fn test_history_depth_from_config() {
    let mut config = Config::default();
    config.history.max_depth = 3;
    let mut engine = LayoutEngine::with_config(config);
    for _ in 0..5 {
        engine.add_floor();
    }

    assert_eq!(engine.history().len(), 3);
    while engine.undo() {}
    assert_eq!(engine.store().floors().len(), 3);
}

#[test]
fn test_manager_standalone() {
    let mut store = ShapeStore::new();
    let mut history = HistoryManager::new(10);
    history.add_to_history(&store);
    store.add_floor(&FloorSettings::default());
    history.add_to_history(&store);

    assert!(history.can_undo());
    assert!(history.undo(&mut store));
    assert!(store.floors().is_empty());
    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.index(), None);
}
