//! Integration tests for primitive values and lists

use refgraph_codec::{WriterConfig, from_str, to_string, to_string_with};
use refgraph_foundation::{TypeRegistry, Value};

fn roundtrip(value: &Value) -> Value {
    let text = to_string(value).unwrap();
    from_str(&text, &TypeRegistry::new()).unwrap()
}

#[test]
fn serialize_literals() {
    assert_eq!(to_string(&Value::Int(1)).unwrap(), "1");
    assert_eq!(to_string(&Value::Float(1.5)).unwrap(), "1.5");
    assert_eq!(to_string(&Value::from("foo")).unwrap(), "\"foo\"");
    assert_eq!(to_string(&Value::Bool(true)).unwrap(), "True");
    assert_eq!(to_string(&Value::Null).unwrap(), "null");
}

#[test]
fn literals_roundtrip() {
    for value in [
        Value::Int(1),
        Value::Int(-1),
        Value::Int(i64::MAX),
        Value::Float(1.5),
        Value::Float(-1234.0625),
        Value::Float(f64::MIN_POSITIVE),
        Value::Float(f64::MAX),
        Value::from("foo"),
        Value::from("with spaces, commas: and [brackets]"),
        Value::Bool(true),
        Value::Bool(false),
        Value::Null,
    ] {
        assert_eq!(roundtrip(&value), value);
    }
}

#[test]
fn integral_float_stays_float() {
    let text = to_string(&Value::Float(100.0)).unwrap();
    assert_eq!(text, "100.0");
    assert_eq!(roundtrip(&Value::Float(100.0)), Value::Float(100.0));
}

#[test]
fn heterogeneous_lists() {
    let value = Value::List(vec![
        Value::Int(1),
        Value::List(vec![]),
        Value::List(vec![Value::from("x"), Value::Bool(false)]),
        Value::Float(2.25),
    ]);
    assert_eq!(roundtrip(&value), value);
    assert_eq!(
        to_string_with(&value, &WriterConfig::compact()).unwrap(),
        "[1,[],[\"x\",False],2.25]"
    );
}

#[test]
fn pretty_list_layout() {
    let value = Value::List(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(to_string(&value).unwrap(), "[ \n    1, 2\n ]");
    assert_eq!(to_string(&Value::List(vec![])).unwrap(), "[ ]");
}
