//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use vacheck_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_input_shape() {
    let err = Error::input_shape(354, 353);
    assert!(matches!(
        err.kind,
        ErrorKind::InputShape {
            expected: 354,
            actual: 353
        }
    ));
    assert_eq!(format!("{err}"), "input must have 354 elements, got 353");
    assert!(err.is_input_error());
    assert!(!err.is_resource_error());
}

#[test]
fn error_input_domain() {
    let err = Error::input_domain(7, "33");
    assert!(matches!(err.kind, ErrorKind::InputDomain { position: 7, .. }));
    let msg = format!("{err}");
    assert!(msg.contains("\"33\""));
    assert!(msg.contains("position 7"));
}

#[test]
fn error_input_identifier() {
    let err = Error::input_identifier("record identifier is empty");
    assert!(matches!(err.kind, ErrorKind::InputIdentifier(_)));
    assert!(err.is_input_error());
}

#[test]
fn error_resource() {
    let err = Error::resource("probbase not found");
    assert!(err.is_resource_error());
    assert!(!err.is_input_error());
    assert_eq!(format!("{err}"), "resource error: probbase not found");
}

#[test]
fn runtime_errors_are_neither_input_nor_resource() {
    for err in [Error::io("disk full"), Error::serialization("bad marker")] {
        assert!(!err.is_input_error());
        assert!(!err.is_resource_error());
    }
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_with_full_context() {
    let err = Error::input_domain(2, "x").with_context(
        ErrorContext::new()
            .with_source("records.csv")
            .with_line(3)
            .with_column("i019a"),
    );
    let msg = format!("{err}");
    assert!(msg.starts_with("input value"));
    assert!(msg.contains("records.csv:3"));
    assert!(msg.contains("i019a"));
}

#[test]
fn empty_context_not_rendered() {
    let err = Error::resource("x").with_context(ErrorContext::new());
    assert_eq!(format!("{err}"), "resource error: x");
}

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::resource("x"));
}
