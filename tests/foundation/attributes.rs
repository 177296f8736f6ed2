//! Integration tests for origin-tagged attribute maps

use rubric_foundation::{AttrSlot, Attributes, Origin, Value};

#[test]
fn collect_from_slots() {
    let attrs: Attributes = [
        ("value", AttrSlot::explicit(Value::Int(10))),
        ("order", AttrSlot::default_value(Value::Int(0))),
    ]
    .into_iter()
    .collect();

    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.origin("value"), Some(Origin::Explicit));
    assert_eq!(attrs.origin("order"), Some(Origin::Default));
    assert!(Origin::Explicit.is_explicit());
    assert!(!Origin::Propagated.is_explicit());
}

#[test]
fn overwrite_changes_origin() {
    let mut attrs = Attributes::new().insert("message", Value::from(""), Origin::Default);
    attrs.set("message", Value::from("too long"), Origin::Propagated);
    assert_eq!(attrs.get("message"), Some(&Value::from("too long")));
    assert_eq!(attrs.origin("message"), Some(Origin::Propagated));
    assert_eq!(attrs.explicit().count(), 0);
}

#[test]
fn persistent_insert_leaves_original() {
    let base = Attributes::new().insert("value", Value::Int(1), Origin::Explicit);
    let derived = base.insert("value", Value::Int(2), Origin::Overridden);
    assert_eq!(base.get("value"), Some(&Value::Int(1)));
    assert_eq!(derived.get("value"), Some(&Value::Int(2)));
    assert_ne!(base, derived);
}
