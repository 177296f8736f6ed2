//! Integration tests for registry building and declaration

use rubric_foundation::{ErrorKind, Origin, Type, Value};
use rubric_schema::{
    AttributeDescriptor, Category, DirectiveRegistry, DirectiveSpec, DirectiveType, Occurrence,
    OverrideRule,
};

fn pattern() -> DirectiveType {
    DirectiveType::atomic("Pattern", Category::Constraint)
        .repeatable()
        .with_attribute(AttributeDescriptor::required("regex", Type::String))
        .with_attribute(AttributeDescriptor::optional("message", Type::String, ""))
}

fn email() -> DirectiveType {
    DirectiveType::composite("Email", Category::Constraint)
        .with_attribute(AttributeDescriptor::optional("message", Type::String, ""))
        .with_nested(DirectiveSpec::new("Pattern").with("regex", ".+@.+"))
        .with_nested(DirectiveSpec::new("Pattern").with("regex", "^[^ ]+$"))
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn build_and_lookup() {
    let registry = DirectiveRegistry::builder()
        .register(pattern())
        .register(email())
        .build()
        .unwrap();

    assert!(registry.contains("Email"));
    assert!(registry.lookup("Email").unwrap().is_composite());
    assert!(matches!(
        registry.lookup("Phone").unwrap_err().kind,
        ErrorKind::UnknownDirective(_)
    ));

    let template = registry.template("Email").unwrap();
    let indices: Vec<_> = template.nested.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn composite_nesting_composite() {
    let registry = DirectiveRegistry::builder()
        .register(pattern())
        .register(email())
        .register(
            DirectiveType::composite("WorkEmail", Category::Constraint)
                .with_nested(DirectiveSpec::new("Email").with("message", "work address"))
                .with_nested(DirectiveSpec::new("Pattern").with("regex", "@corp$")),
        )
        .build()
        .unwrap();

    let template = registry.template("WorkEmail").unwrap();
    assert_eq!(template.nested[0].name(), "Email");
    assert_eq!(
        template.nested[0].attributes.origin("message"),
        Some(Origin::Explicit)
    );
}

#[test]
fn self_nesting_is_a_cycle() {
    let err = DirectiveRegistry::builder()
        .register(DirectiveType::composite("Loop", Category::Constraint).with_nested(DirectiveSpec::new("Loop")))
        .build()
        .unwrap_err();
    match err.kind {
        ErrorKind::CompositeCycle(path) => assert_eq!(path, vec!["Loop", "Loop"]),
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn rule_target_must_be_registered() {
    let err = DirectiveRegistry::builder()
        .register(pattern())
        .register(email().with_override(OverrideRule::new("message", "Regex")))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDirective(ref n) if n == "Regex"));
}

#[test]
fn nested_type_mismatch() {
    let err = DirectiveRegistry::builder()
        .register(pattern())
        .register(
            DirectiveType::composite("Digits", Category::Constraint)
                .with_nested(DirectiveSpec::new("Pattern").with("regex", 7)),
        )
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

// =============================================================================
// Declaration
// =============================================================================

#[test]
fn declare_tracks_same_type_positions() {
    let registry = DirectiveRegistry::builder()
        .register(pattern())
        .register(DirectiveType::atomic("Trim", Category::Conversion))
        .build()
        .unwrap();

    let list = registry
        .declare(&[
            DirectiveSpec::new("Pattern").with("regex", "a"),
            DirectiveSpec::new("Trim"),
            DirectiveSpec::new("Pattern").with("regex", "b"),
        ])
        .unwrap();

    let positions: Vec<_> = list.iter().map(|i| (i.name(), i.index)).collect();
    assert_eq!(positions, vec![("Pattern", 0), ("Trim", 0), ("Pattern", 1)]);
    assert_eq!(list[2].get("regex"), Some(&Value::from("b")));
    assert_eq!(list[2].attributes.origin("message"), Some(Origin::Default));
}

#[test]
fn declare_rejects_repeated_non_repeatable() {
    let registry = DirectiveRegistry::builder()
        .register(DirectiveType::atomic("Trim", Category::Conversion))
        .build()
        .unwrap();
    let err = registry
        .declare(&[DirectiveSpec::new("Trim"), DirectiveSpec::new("Trim")])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotRepeatable(_)));
}

#[test]
fn rule_defaults() {
    let rule = OverrideRule::new("message", "Pattern");
    assert_eq!(rule.occurrence, Occurrence::Index(0));
    assert_eq!(rule.target_attribute(), "message");
}
