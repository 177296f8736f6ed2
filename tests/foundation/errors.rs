//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use rubric_foundation::{Error, ErrorContext, ErrorKind, Type};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn unknown_directive() {
    let err = Error::unknown_directive("Email");
    assert!(matches!(err.kind, ErrorKind::UnknownDirective(ref n) if n == "Email"));
    assert!(format!("{err}").contains("Email"));
}

#[test]
fn missing_attribute() {
    let err = Error::missing_attribute("LengthMax", "value");
    let msg = format!("{err}");
    assert!(msg.contains("LengthMax"));
    assert!(msg.contains("value"));
}

#[test]
fn override_type_mismatch_display() {
    let err = Error::new(ErrorKind::OverrideTypeMismatch {
        composite: "Username".to_string(),
        rule: "maxLength".to_string(),
        target: "LengthMax".to_string(),
        attribute: "value".to_string(),
        expected: Type::Int,
        actual: Type::String,
    });
    let msg = format!("{err}");
    assert!(msg.contains("LengthMax.value"));
    assert!(msg.contains("int"));
    assert!(msg.contains("string"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_lists_every_part() {
    let err = Error::unknown_attribute("LengthMax", "limit").with_context(
        ErrorContext::new()
            .with_field("Person#name")
            .with_source("schema.json")
            .with_frame("Outer")
            .with_frame("Username"),
    );
    let msg = format!("{err}");
    assert!(msg.contains("field Person#name"));
    assert!(msg.contains("in schema.json"));
    assert!(msg.contains("expanding Outer > Username"));
}

#[test]
fn error_without_context_has_no_suffix() {
    let err = Error::new(ErrorKind::NotRepeatable("Required".to_string()));
    assert!(!format!("{err}").contains('('));
    assert!(err.is_configuration_fault());
}

#[test]
fn io_is_not_configuration_fault() {
    assert!(!Error::new(ErrorKind::IoError("gone".to_string())).is_configuration_fault());
}
