//! Integration tests for the placement tree

use refgraph_foundation::{ErrorKind, Handle};
use refgraph_model::{EntityHandle, Placement, PlacementHandle, create_entity};

#[test]
fn children_in_creation_order() {
    let root = create_entity("test", None);
    let placement = root.placement().unwrap();
    let names = ["child 1", "child 2", "child 3"];
    for name in names {
        let _ = create_entity(name, Some(&placement));
    }

    assert_eq!(placement.child_count(), 3);
    for (i, name) in names.iter().enumerate() {
        let child = placement.child(i).unwrap();
        assert_eq!(child.entity().unwrap().name(), *name);
        assert!(child.parent().unwrap().ptr_eq(&placement));
    }
}

#[test]
fn child_index_out_of_range() {
    let root = create_entity("test", None);
    let err = root.placement().unwrap().child(0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IndexOutOfBounds { index: 0, length: 0 }));
}

#[test]
fn reparenting_is_append_only() {
    let a = create_entity("a", None);
    let b = create_entity("b", None);
    let a_placement = a.placement().unwrap();
    let b_placement = b.placement().unwrap();

    a_placement.add_child(&b_placement).unwrap();
    a.check_consistency().unwrap();

    let c = create_entity("c", None);
    let err = c.placement().unwrap().add_child(&b_placement).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Inconsistent(_)));
}

#[test]
fn set_child_keeps_tree_consistent() {
    let root = create_entity("root", None);
    let placement = root.placement().unwrap();
    let old = create_entity("old", Some(&placement));
    let new = create_entity("new", None);

    placement.set_child(0, &new.placement().unwrap()).unwrap();
    root.check_consistency().unwrap();
    assert!(old.placement().unwrap().parent().is_none());
    assert_eq!(placement.child(0).unwrap().entity().unwrap().name(), "new");
}

#[test]
fn bare_placement_has_no_entity() {
    let placement = Handle::new(Placement::default());
    assert!(placement.entity().is_none());
    assert!(placement.parent().is_none());
    assert_eq!(placement.children().len(), 0);
    assert!((placement.x()).abs() < f64::EPSILON);
}
