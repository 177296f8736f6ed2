//! Integration tests for Value and Type

use rubric_foundation::{Type, Value};

// =============================================================================
// Type Compatibility
// =============================================================================

#[test]
fn float_accepts_int() {
    assert!(Type::Float.accepts(&Type::Int));
    assert!(!Type::Int.accepts(&Type::Float));
}

#[test]
fn any_accepts_everything() {
    for ty in [Type::Bool, Type::String, Type::list(Type::Symbol)] {
        assert!(Type::Any.accepts(&ty));
    }
}

#[test]
fn list_types() {
    let symbols = Type::list(Type::Symbol);
    assert!(symbols.accepts(&Type::list(Type::Symbol)));
    assert!(symbols.accepts(&Type::list(Type::Any)));
    assert!(!symbols.accepts(&Type::list(Type::String)));
    assert_eq!(symbols.to_string(), "list<symbol>");
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn group_lists() {
    let groups = Value::symbols(["Default", "Signup"]);
    assert_eq!(groups.value_type(), Type::list(Type::Symbol));
    assert!(groups.conforms_to(&Type::list(Type::Symbol)));
    assert!(!groups.conforms_to(&Type::list(Type::String)));
    assert_eq!(groups.as_list().map(|l| l.len()), Some(2));
}

#[test]
fn empty_values() {
    assert!(Value::from("").is_empty());
    assert!(Value::empty_list().is_empty());
    assert!(!Value::Int(0).is_empty());
}

#[test]
fn display_forms() {
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::symbol("Read").to_string(), "Read");
    assert_eq!(Value::from("x").to_string(), "\"x\"");
}

#[test]
fn list_from_vec() {
    let v: Value = vec![1i64, 2, 3].into();
    assert!(v.conforms_to(&Type::list(Type::Int)));
    assert!(v.conforms_to(&Type::list(Type::Float)));
}
