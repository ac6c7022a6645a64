//! Integration tests for entities and parts

use refgraph_foundation::{ErrorKind, Handle, Value};
use refgraph_model::{
    Collider, ENTITY_FIELD, Entity, EntityHandle, Part, Placement, Sprite,
    create_entity, registry,
};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_entity_has_only_a_placement() {
    let entity = create_entity("test", None);
    let parts = entity.parts();
    assert_eq!(parts.len(), 1);
    assert!(parts[0].is::<Placement>());
    entity.check_consistency().unwrap();
}

#[test]
fn rename() {
    let entity = create_entity("before", None);
    entity.set_name("after");
    assert_eq!(entity.name(), "after");
    assert_eq!(entity.borrow().to_string(), "Entity after");
}

// =============================================================================
// Parts
// =============================================================================

#[test]
fn parts_keep_attachment_order() {
    let entity = create_entity("ordered", None);
    entity.add_part::<Sprite>();
    entity.add_part::<Collider>();
    let names: Vec<_> = entity.parts().iter().map(|p| p.type_name()).collect();
    assert_eq!(names, ["Placement", "Sprite", "CircleCollider"]);
}

#[test]
fn parts_point_back_through_their_field() {
    let entity = create_entity("owner", None);
    let sprite = entity.add_part::<Sprite>();
    let back = sprite
        .obj()
        .fields()
        .into_iter()
        .find(|(name, _)| *name == ENTITY_FIELD)
        .map(|(_, value)| value)
        .unwrap();
    assert_eq!(back, Value::from(entity.clone()));
    assert!(sprite.borrow().entity().unwrap().ptr_eq(&entity));
}

#[test]
fn missing_part() {
    let entity = create_entity("plain", None);
    let err = entity.get_part::<Collider>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::PartNotFound { .. }));
    assert!(err.to_string().contains("CircleCollider"));
}

// =============================================================================
// Consistency
// =============================================================================

#[test]
fn detached_part_is_inconsistent() {
    let entity = create_entity("e", None);
    let collider = entity.add_part::<Collider>();
    collider.borrow_mut().set_entity(None);
    let err = entity.check_consistency().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Inconsistent(_)));
}

#[test]
fn inconsistency_deep_in_the_tree_is_found() {
    let root = create_entity("root", None);
    let mid = create_entity("mid", Some(&root.placement().unwrap()));
    let leaf = create_entity("leaf", Some(&mid.placement().unwrap()));
    root.check_consistency().unwrap();

    leaf.placement().unwrap().borrow_mut().set_parent(None);
    let err = root.check_consistency().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Inconsistent(ref m) if m.contains("mid")));
}

#[test]
fn registry_built_entity_needs_a_placement() {
    let obj = registry().construct("Entity").unwrap();
    let entity = Handle::<Entity>::from_obj(obj).unwrap();
    assert!(entity.check_consistency().is_err());
    entity.add_part::<Placement>();
    entity.check_consistency().unwrap();
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn destroy_clears_the_whole_subtree() {
    let root = create_entity("root", None);
    let child = create_entity("child", Some(&root.placement().unwrap()));
    let grandchild = create_entity("grandchild", Some(&child.placement().unwrap()));
    let sprite = grandchild.add_part::<Sprite>();

    root.destroy().unwrap();

    for entity in [&root, &child, &grandchild] {
        assert!(entity.parts().is_empty());
    }
    assert!(sprite.borrow().entity().is_none());
}
