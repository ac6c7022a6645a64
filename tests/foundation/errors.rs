//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use refgraph_foundation::{Error, ErrorContext, ErrorKind, Type};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(Type::Float, Type::String);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("float"));
    assert!(msg.contains("string"));
}

#[test]
fn error_unknown_type() {
    let err = Error::unknown_type("Teapot");
    assert!(matches!(err.kind, ErrorKind::UnknownType(ref n) if n == "Teapot"));
    assert!(format!("{err}").contains("Teapot"));
}

#[test]
fn error_unknown_field() {
    let err = Error::unknown_field("Placement", "z");
    let msg = format!("{err}");
    assert!(msg.contains("Placement"));
    assert!(msg.contains('z'));
}

#[test]
fn error_part_not_found() {
    let err = Error::part_not_found("hero", "Sprite");
    assert!(matches!(err.kind, ErrorKind::PartNotFound { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("hero"));
    assert!(msg.contains("Sprite"));
}

#[test]
fn error_index_out_of_bounds() {
    let err = Error::index_out_of_bounds(5, 2);
    let msg = format!("{err}");
    assert!(msg.contains('5'));
    assert!(msg.contains('2'));
}

#[test]
fn error_limit_exceeded() {
    let err = Error::limit_exceeded(64);
    assert!(matches!(err.kind, ErrorKind::LimitExceeded { limit: 64 }));
    assert!(format!("{err}").contains("64"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_names_object_field_and_position() {
    let err = Error::format("bad number \"1.2.3\"").with_context(
        ErrorContext::new()
            .with_object(4)
            .with_field("x")
            .with_position(3, 12),
    );
    let msg = format!("{err}");
    assert!(msg.contains("in object #4"), "{msg}");
    assert!(msg.contains("field x"), "{msg}");
    assert!(msg.contains("3:12"), "{msg}");
}

#[test]
fn context_at_top_level() {
    let err = Error::end_of_stream("a list").with_context(ErrorContext::new().with_position(1, 5));
    assert_eq!(
        format!("{err}"),
        "unexpected end of stream while reading a list (at top level, at 1:5)"
    );
}

#[test]
fn first_context_is_kept() {
    let err = Error::unknown_token("nil")
        .with_context(ErrorContext::new().with_object(2))
        .with_context(ErrorContext::new().with_object(1));
    assert_eq!(err.context.unwrap().object_id, Some(2));
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::io("disk on fire"));
}
