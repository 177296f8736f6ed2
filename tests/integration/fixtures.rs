//! End-to-end expansion of the fixture documents

use std::sync::Arc;

use rubric_expand::{ExpandedNode, FieldDirectives};
use rubric_foundation::{ErrorKind, Origin, Value};
use rubric_runtime::{Session, load_fields, load_registry};

use crate::fixture;

fn expand_person() -> Vec<Arc<FieldDirectives>> {
    let registry = load_registry(fixture("schema.json")).unwrap();
    let document = load_fields(fixture("person.json")).unwrap();
    Session::new(registry).expand_document(&document).unwrap()
}

fn names(nodes: &[ExpandedNode]) -> Vec<&str> {
    nodes.iter().map(ExpandedNode::name).collect()
}

#[test]
fn every_field_is_expanded_in_order() {
    let fields = expand_person();
    let names: Vec<_> = fields.iter().map(|f| f.field()).collect();
    assert_eq!(
        names,
        vec![
            "example.Person#login",
            "example.Person#email",
            "example.Person#account",
            "example.Person#nickname",
        ]
    );
    assert!(fields[3].is_empty());
}

#[test]
fn login_overrides_and_propagates() {
    let fields = expand_person();
    let username = &fields[0].nodes()[0];

    assert_eq!(
        names(&username.children),
        vec!["Required", "LengthMax", "LengthMax", "Composition"]
    );
    assert_eq!(username.children[1].get("value"), Some(&Value::Int(10)));
    assert_eq!(username.children[2].get("value"), Some(&Value::Int(20)));

    let signup = Value::symbols(["Signup"]);
    for child in &username.children[..3] {
        assert_eq!(child.get("groups"), Some(&signup));
        assert_eq!(child.instance.attributes.origin("groups"), Some(Origin::Propagated));
        // empty shared values stay at the child's own default
        assert_eq!(child.instance.attributes.origin("message"), Some(Origin::Default));
    }
}

#[test]
fn email_orders_by_priority_then_name() {
    let fields = expand_person();
    let email = &fields[1];

    assert_eq!(names(email.nodes()), vec!["Email", "Trim"]);

    let patterns = &email.nodes()[0].children;
    assert_eq!(names(patterns), vec!["Pattern", "Pattern", "Composition"]);

    let strict = &patterns[0];
    assert_eq!(strict.index, 1);
    assert_eq!(strict.get("message"), Some(&Value::from("not an address")));
    assert_eq!(strict.instance.attributes.origin("message"), Some(Origin::Overridden));

    let loose = &patterns[1];
    assert_eq!(loose.index, 0);
    assert_eq!(loose.get("message"), Some(&Value::from("invalid email")));
    assert_eq!(loose.instance.attributes.origin("message"), Some(Origin::Propagated));
}

#[test]
fn account_reaches_grandchildren() {
    let fields = expand_person();
    let account = &fields[2].nodes()[0];
    assert_eq!(names(&account.children), vec!["Trim", "Username"]);

    let trim = &account.children[0];
    assert_eq!(trim.get("cases"), Some(&Value::symbols(["Read"])));
    assert_eq!(trim.instance.attributes.origin("cases"), Some(Origin::Propagated));

    let username = &account.children[1];
    assert_eq!(username.get("message"), Some(&Value::from("bad account")));
    assert_eq!(username.children[2].get("value"), Some(&Value::Int(32)));
    for child in &username.children[..3] {
        assert_eq!(child.get("message"), Some(&Value::from("bad account")));
    }

    assert_eq!(account.depth(), 3);
    assert_eq!(fields[2].all("LengthMax").len(), 2);
}

#[test]
fn repeated_documents_hit_the_cache() {
    let registry = load_registry(fixture("schema.json")).unwrap();
    let document = load_fields(fixture("person.json")).unwrap();
    let session = Session::new(registry);

    let first = session.expand_document(&document).unwrap();
    let second = session.expand_document(&document).unwrap();

    assert_eq!(session.cache().len(), 4);
    assert!(first.iter().zip(&second).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_registry(fixture("absent.json")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
    assert!(!err.is_configuration_fault());
}
