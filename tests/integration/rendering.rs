//! Rendering of expanded fixture documents

use rubric_runtime::{Session, load_fields, load_registry, render_json, render_tree};

use crate::fixture;

#[test]
fn tree_shows_nesting() {
    let registry = load_registry(fixture("schema.json")).unwrap();
    let document = load_fields(fixture("person.json")).unwrap();
    let fields = Session::new(registry).expand_document(&document).unwrap();

    let text = render_tree(&fields[0]);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "example.Person#login");
    assert!(lines[1].starts_with("+ Username[0]"));
    assert!(lines[2].trim_start().starts_with("Required[0]"));
    assert!(lines[4].contains("LengthMax[1]") && lines[4].contains("value=20"));
    assert_eq!(lines.len(), 6);
}

#[test]
fn json_records_origins() {
    let registry = load_registry(fixture("schema.json")).unwrap();
    let document = load_fields(fixture("person.json")).unwrap();
    let fields = Session::new(registry).expand_document(&document).unwrap();

    let json = render_json(fields.iter().map(|field| &**field)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.as_array().map(Vec::len), Some(4));
    let username = &parsed[0]["directives"][0];
    assert_eq!(username["directive"], "Username");
    assert_eq!(username["composed"], true);
    let strict = &username["children"][2]["attributes"]["value"];
    assert_eq!(strict["origin"], "overridden");
    assert!(parsed[3]["directives"].as_array().unwrap().is_empty());
}
