//! Integration tests for Value types
//!
//! Tests Value variants, equality, display, and the coercions field setters use.

use refgraph_foundation::{ErrorKind, Field, Handle, Obj, Reflect, Type, Value};

#[derive(Default)]
struct Node {
    label: String,
}

impl Reflect for Node {
    const TYPE_NAME: &'static str = "Node";
    const FIELDS: &'static [Field<Self>] = &[Field {
        name: "label",
        get: |n| Value::from(n.label.clone()),
        set: |n, v| {
            n.label = v.to_string_value()?;
            Ok(())
        },
    }];
}

#[derive(Default)]
struct Leaf;

impl Reflect for Leaf {
    const TYPE_NAME: &'static str = "Leaf";
    const FIELDS: &'static [Field<Self>] = &[];
}

// =============================================================================
// Value Construction
// =============================================================================

#[test]
fn value_types() {
    assert_eq!(Value::Null.value_type(), Type::Null);
    assert_eq!(Value::Bool(true).value_type(), Type::Bool);
    assert_eq!(Value::Int(1).value_type(), Type::Int);
    assert_eq!(Value::Float(1.0).value_type(), Type::Float);
    assert_eq!(Value::from("s").value_type(), Type::String);
    assert_eq!(Value::List(vec![]).value_type(), Type::list(Type::Any));
    assert_eq!(Value::from(Obj::new(Leaf)).value_type(), Type::Object);
}

#[test]
fn value_from_rust_types() {
    assert_eq!(Value::from(3i32), Value::Int(3));
    assert_eq!(Value::from(0.5f32), Value::Float(0.5));
    assert_eq!(Value::from(Some("x")), Value::from("x"));
    assert_eq!(Value::from(None::<String>), Value::Null);
    assert_eq!(
        Value::from(vec!["a", "b"]),
        Value::List(vec![Value::from("a"), Value::from("b")])
    );
}

#[test]
fn value_default_is_null() {
    assert!(Value::default().is_null());
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn int_and_float_are_distinct() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

#[test]
fn float_equality_is_bitwise() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_ne!(Value::Float(0.0), Value::Float(-0.0));
}

#[test]
fn objects_compare_by_identity() {
    let a = Obj::new(Node::default());
    let b = Obj::new(Node::default());
    assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
    assert_ne!(Value::from(a), Value::from(b));
}

#[test]
fn lists_compare_elementwise() {
    let shared = Obj::new(Leaf);
    let a = Value::List(vec![Value::Int(1), Value::from(shared.clone())]);
    let b = Value::List(vec![Value::Int(1), Value::from(shared)]);
    assert_eq!(a, b);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(
        Value::List(vec![Value::Int(1), Value::from("a"), Value::Null]).to_string(),
        "[1, a, null]"
    );
    assert_eq!(Value::from(Obj::new(Leaf)).to_string(), "<Leaf>");
}

// =============================================================================
// Coercions
// =============================================================================

#[test]
fn to_float_widens() {
    assert!((Value::Int(200).to_float().unwrap() - 200.0).abs() < f64::EPSILON);
    assert!(Value::Int(1).to_int().is_ok());
    assert!(Value::Float(1.0).to_int().is_err());
}

#[test]
fn optional_string() {
    assert_eq!(Value::Null.to_optional_string().unwrap(), None);
    assert_eq!(
        Value::from("a").to_optional_string().unwrap().as_deref(),
        Some("a")
    );
    assert!(Value::Bool(true).to_optional_string().is_err());
}

#[test]
fn object_list_rejects_primitives() {
    let list = Value::List(vec![Value::from(Obj::new(Leaf)), Value::Int(2)]);
    let err = list.to_object_list().unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: Type::Object,
            actual: Type::Int
        }
    ));
}

#[test]
fn typed_handles() {
    let node = Obj::new(Node::default());
    let value = Value::from(node.clone());

    let handle = value.to_handle::<Node>().unwrap().unwrap();
    assert!(handle.obj().ptr_eq(&node));
    assert!(Value::Null.to_handle::<Node>().unwrap().is_none());

    let err = value.to_handle::<Leaf>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ObjectTypeMismatch { .. }));
}

#[test]
fn typed_handle_lists() {
    let a = Handle::new(Node::default());
    let b = Handle::new(Node::default());
    let value = Value::from(vec![a.clone(), b.clone()]);

    let handles = value.to_handle_list::<Node>().unwrap();
    assert_eq!(handles, vec![a, b]);

    let mixed = Value::List(vec![Value::from(Obj::new(Node::default())), Value::from(Obj::new(Leaf))]);
    assert!(mixed.to_handle_list::<Node>().is_err());
}
