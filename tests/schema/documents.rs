//! Integration tests for JSON schema and field documents

use std::path::PathBuf;

use rubric_foundation::{ErrorKind, Value};
use rubric_schema::{Category, DirectiveRegistry, FieldDocument, Occurrence, SchemaDocument};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn fixture_schema_builds() {
    let registry = DirectiveRegistry::from_json(&fixture("schema.json")).unwrap();
    assert_eq!(registry.len(), 8);

    let required = registry.get("Required").unwrap();
    assert_eq!(
        required.attribute("order").and_then(|a| a.default.clone()),
        Some(Value::Int(i64::MIN))
    );
    assert_eq!(registry.get("Trim").unwrap().category, Category::Conversion);
    assert_eq!(registry.get("Composition").unwrap().category, Category::Marker);

    let email = registry.get("Email").unwrap();
    assert_eq!(email.overrides()[0].occurrence, Occurrence::Index(1));
    assert_eq!(email.overrides()[0].target_attribute(), "message");

    let account = registry.template("AccountName").unwrap();
    assert_eq!(account.nested[1].get("maxLength"), Some(&Value::Int(32)));
}

#[test]
fn schema_document_round_trips_through_serde() {
    let doc = SchemaDocument::from_json(&fixture("schema.json")).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(SchemaDocument::from_json(&json).unwrap(), doc);
}

#[test]
fn fixture_fields_declare() {
    let registry = DirectiveRegistry::from_json(&fixture("schema.json")).unwrap();
    let fields = FieldDocument::from_json(&fixture("person.json"))
        .unwrap()
        .declare(&registry)
        .unwrap();

    let names: Vec<_> = fields.iter().map(|f| f.qualified_name()).collect();
    assert_eq!(
        names,
        vec![
            "example.Person#login",
            "example.Person#email",
            "example.Person#account",
            "example.Person#nickname",
        ]
    );
    assert_eq!(
        fields[0].directives[0].get("groups"),
        Some(&Value::symbols(["Signup"]))
    );
    assert!(fields[3].directives.is_empty());
}

#[test]
fn unknown_attribute_in_field() {
    let registry = DirectiveRegistry::from_json(&fixture("schema.json")).unwrap();
    let err = FieldDocument::from_json(
        r#"{ "declaring_type": "T", "fields": [
            { "name": "f", "directives": [{ "type": "Trim", "attributes": { "limit": 1 } }] }
        ] }"#,
    )
    .unwrap()
    .declare(&registry)
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAttribute { .. }));
    assert_eq!(err.context.unwrap().field.as_deref(), Some("T#f"));
}

#[test]
fn unknown_nested_attribute_in_schema() {
    let err = DirectiveRegistry::from_json(
        r#"{ "directives": [
            { "name": "Trim" },
            { "name": "Wrap", "nested": [{ "type": "Trim", "attributes": { "x": [1, 2] } }] }
        ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAttribute { .. }));
}
