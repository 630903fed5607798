use floorplan_core::error::LayoutError;
use floorplan_core::geometry::{rotate_point, Point};
use floorplan_designer::{GroupManager, SelectionElement, Shape, ShapeStore};
use floorplan_settings::FloorSettings;

fn scenario() -> (ShapeStore, String) {
    let mut store = ShapeStore::new();
    let floor = store.add_floor(&FloorSettings::default());
    store.add_shape(Shape::table(0.0, 0.0, 10.0, 10.0).with_id("A"));
    store.add_shape(Shape::table(20.0, 0.0, 10.0, 10.0).with_id("B"));
    (store, floor)
}

fn group_ab(store: &mut ShapeStore, floor: &str) -> String {
    let selection = vec![
        SelectionElement::shape("A", floor),
        SelectionElement::shape("B", floor),
    ];
    GroupManager::create_group(store, &selection).unwrap()
}

#[test]
fn test_scenario_group_and_rotate_half_turn() {
    let (mut store, floor) = scenario();
    let gid = group_ab(&mut store, &floor);
    let center = store.group(&gid).unwrap().center;
    assert_eq!(center, Point::new(15.0, 5.0));

    assert!(GroupManager::rotate_group(&mut store, &gid, 180.0));

    let a = store.find_shape("A").unwrap();
    let b = store.find_shape("B").unwrap();
    assert_eq!(a.position(), rotate_point(Point::new(0.0, 0.0), center, 180.0));
    assert_eq!(b.position(), rotate_point(Point::new(20.0, 0.0), center, 180.0));
    assert_eq!(a.rotation_degrees, 180.0);
    assert_eq!(b.rotation_degrees, 180.0);
    assert_eq!(store.group(&gid).unwrap().rotation_degrees, 180.0);
}

#[test]
fn test_rotation_respects_prior_member_rotation() {
    let (mut store, floor) = scenario();
    assert!(store.rotate_shape(&floor, "A", 30.0));
    let gid = group_ab(&mut store, &floor);
    let center = store.group(&gid).unwrap().center;

    assert!(GroupManager::rotate_group(&mut store, &gid, 90.0));

    let a = store.find_shape("A").unwrap();
    let b = store.find_shape("B").unwrap();
    assert_eq!(a.position(), rotate_point(Point::new(0.0, 0.0), center, 60.0));
    assert_eq!(b.position(), rotate_point(Point::new(20.0, 0.0), center, 90.0));
    assert_eq!(a.rotation_degrees, 90.0);
    assert_eq!(b.rotation_degrees, 90.0);
}

#[test]
fn test_grouped_shape_cannot_rotate_alone() {
    let (mut store, floor) = scenario();
    group_ab(&mut store, &floor);
    assert!(!store.rotate_shape(&floor, "A", 45.0));
    assert_eq!(store.find_shape("A").unwrap().rotation_degrees, 0.0);
}

#[test]
fn test_cross_floor_grouping_is_rejected_without_mutation() {
    let (mut store, floor) = scenario();
    let before = store.clone();
    let selection = vec![
        SelectionElement::shape("A", floor.clone()),
        SelectionElement::shape("B", "floor-elsewhere"),
    ];

    let err = GroupManager::create_group(&mut store, &selection).unwrap_err();
    assert!(matches!(err, LayoutError::CrossFloorGrouping { .. }));
    assert_eq!(store, before);
}

#[test]
fn test_missing_group_operations_are_noops() {
    let (mut store, _) = scenario();
    let before = store.clone();
    assert!(!GroupManager::rotate_group(&mut store, "nope", 90.0));
    assert!(!GroupManager::move_group(&mut store, "nope", 1.0, 1.0));
    assert!(!GroupManager::resize_group(&mut store, "nope", 10.0, 10.0));
    assert!(!GroupManager::select_group(&mut store, "nope"));
    assert!(!GroupManager::delete_group(&mut store, "nope"));
    assert!(!GroupManager::add_shape_to_group(&mut store, "A", "nope"));
    assert_eq!(store, before);
}

#[test]
fn test_deleting_member_leaves_single_member_group() {
    let (mut store, floor) = scenario();
    let gid = group_ab(&mut store, &floor);

    assert!(store.delete_shape(&floor, "B"));
    let group = store.group(&gid).unwrap();
    assert_eq!(group.shape_ids.len(), 1);
    assert_eq!(group.shape_ids[0], "A");
    assert_eq!(
        store.find_shape("A").unwrap().group_id.as_deref(),
        Some(gid.as_str())
    );
    assert!(store.check_invariants().is_ok());
}

#[test]
fn test_ungroup_then_regroup_restores_center() {
    let (mut store, floor) = scenario();
    let gid = group_ab(&mut store, &floor);
    let original = store.group(&gid).unwrap().clone();

    let selected = store.selected_elements().to_vec();
    assert!(GroupManager::ungroup_elements(&mut store, &selected));
    let members = store.selected_elements().to_vec();
    let regrouped = GroupManager::create_group(&mut store, &members).unwrap();

    let group = store.group(&regrouped).unwrap();
    assert_eq!(group.shape_ids, original.shape_ids);
    assert_eq!(group.center, original.center);
    assert_eq!(group.width, original.width);
    assert_eq!(group.height, original.height);
}

#[test]
fn test_duplicate_floor_copies_groups() {
    let (mut store, floor) = scenario();
    let gid = group_ab(&mut store, &floor);

    let copy = store
        .duplicate_floor(&floor, &FloorSettings::default())
        .unwrap();
    assert_eq!(store.groups().len(), 2);

    let copied_group = store
        .groups()
        .values()
        .find(|g| g.floor_id == copy)
        .unwrap();
    assert_ne!(copied_group.id, gid);
    assert_eq!(copied_group.center, Point::new(15.0, 5.0));
    for shape_id in &copied_group.shape_ids {
        let shape = store.shape(&copy, shape_id).unwrap();
        assert_eq!(shape.group_id.as_deref(), Some(copied_group.id.as_str()));
    }
    assert!(store.check_invariants().is_ok());
}
