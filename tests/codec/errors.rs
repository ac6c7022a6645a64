//! Integration tests for reader and writer failures

use refgraph_codec::{ReaderConfig, WriterConfig, from_str, from_str_with, to_string_with};
use refgraph_foundation::{ErrorKind, Value};

use crate::registry;

fn read_err(text: &str) -> ErrorKind {
    from_str(text, &registry()).unwrap_err().kind
}

#[test]
fn end_of_stream() {
    assert!(matches!(read_err("[1, 2"), ErrorKind::EndOfStream(_)));
    assert!(matches!(read_err("\"unterminated"), ErrorKind::EndOfStream(_)));
    assert!(matches!(read_err("#0{type:\"Bag\", count: 1"), ErrorKind::EndOfStream(_)));
}

#[test]
fn format_errors() {
    assert!(matches!(read_err("?"), ErrorKind::Format(_)));
    assert!(matches!(read_err("1.2.3"), ErrorKind::Format(_)));
    assert!(matches!(read_err("[1 2]"), ErrorKind::Format(_)));
}

#[test]
fn unknown_names() {
    assert!(matches!(read_err("maybe"), ErrorKind::UnknownToken(_)));
    assert!(matches!(read_err("#0{type:\"Nope\"}"), ErrorKind::UnknownType(_)));
    assert!(matches!(
        read_err("#0{type:\"Bag\",colour:1}"),
        ErrorKind::UnknownField { .. }
    ));
}

#[test]
fn errors_report_enclosing_object_and_position() {
    let err = from_str("#0{type:\"Bag\",\n  items: [#1{type:\"Bag\",\n    count: x}]}", &registry())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownToken(ref t) if t == "x"));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.object_id, Some(1));
    assert_eq!(ctx.line, Some(3));
}

#[test]
fn depth_limits() {
    let deep = "[[[[1]]]]";
    let err = from_str_with(deep, &registry(), &ReaderConfig::default().with_max_depth(3)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded { limit: 3 }));

    let value = from_str(deep, &registry()).unwrap();
    let err = to_string_with(&value, &WriterConfig::pretty().with_max_depth(3)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded { limit: 3 }));
}

#[test]
fn non_finite_floats_are_unsupported() {
    let err = to_string_with(&Value::Float(f64::NAN), &WriterConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedValue(_)));
}
