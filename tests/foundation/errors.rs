//! Integration tests for Error types
//!
//! Tests error construction, display, context, and the error families.

use trellis_foundation::{ContainerId, Error, ErrorContext, ErrorKind, Type};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(Type::list(Type::Text), Type::Int);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(format!("{err}"), "type mismatch: expected list<text>, got int");
}

#[test]
fn error_name_not_found() {
    let err = Error::name_not_found("report");
    assert!(matches!(err.kind, ErrorKind::NameNotFound(_)));
    assert!(format!("{err}").contains("report"));
}

#[test]
fn error_position_not_found() {
    let err = Error::position_not_found(-3);
    assert!(matches!(err.kind, ErrorKind::PositionNotFound(-3)));
    assert!(format!("{err}").contains("-3"));
}

#[test]
fn error_incompatible_key_set() {
    let err = Error::incompatible_key_set(4, 2);
    let msg = format!("{err}");
    assert!(msg.contains('4'));
    assert!(msg.contains('2'));
}

#[test]
fn error_container_not_found() {
    let err = Error::container_not_found(ContainerId::new(42, 1));
    assert!(format!("{err}").contains("42"));
}

// =============================================================================
// Error Families
// =============================================================================

#[test]
fn lookup_failures_are_not_found() {
    let id = ContainerId::new(1, 0);
    for err in [
        Error::name_not_found("x"),
        Error::position_not_found(7),
        Error::new(ErrorKind::EmptyOrder),
        Error::container_not_found(id),
        Error::stale_container(id),
        Error::new(ErrorKind::ContentTypeNotFound("doc".into())),
    ] {
        assert!(err.is_not_found(), "{err}");
        assert!(!err.is_invalid(), "{err}");
    }
}

#[test]
fn containment_rejections_are_invalid() {
    let item = Error::new(ErrorKind::InvalidItemType {
        container: ContainerId::new(1, 0),
        item: "image".into(),
        allowed: vec!["document".into()],
        name: "pic".into(),
    });
    let container = Error::new(ErrorKind::InvalidContainerType {
        container_type: "site".into(),
        allowed: vec!["folder".into()],
    });

    assert!(item.is_invalid());
    assert!(container.is_invalid());
    assert!(!item.is_not_found());
}

#[test]
fn input_errors_are_neither() {
    let err = Error::incompatible_key_set(2, 3);
    assert!(!err.is_not_found());
    assert!(!err.is_invalid());
    assert!(!Error::invalid_name("bad").is_invalid());
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_with_context() {
    let context = ErrorContext::new()
        .with_container(ContainerId::new(3, 0))
        .with_frame("update_order")
        .with_frame("reorder form");
    let err = Error::incompatible_key_set(1, 2).with_context(context);

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.container, Some(ContainerId::new(3, 0)));
    assert_eq!(context.stack, vec!["update_order", "reorder form"]);
    assert!(format!("{context}").contains("in update_order"));
}

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::internal("boom"));
}
