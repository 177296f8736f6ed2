//! Integration tests for the expansion cache

use std::sync::Arc;

use rubric_expand::{ExpansionCache, Expander, FieldKey};
use rubric_foundation::{Type, Value};
use rubric_schema::{
    AttributeDescriptor, Category, DirectiveRegistry, DirectiveSpec, DirectiveType, OverrideRule,
};

fn registry() -> DirectiveRegistry {
    DirectiveRegistry::builder()
        .register(
            DirectiveType::atomic("LengthMax", Category::Constraint)
                .with_attribute(AttributeDescriptor::required("value", Type::Int)),
        )
        .register(
            DirectiveType::composite("Short", Category::Constraint)
                .with_attribute(AttributeDescriptor::optional("max", Type::Int, 8))
                .with_nested(DirectiveSpec::new("LengthMax").with("value", 100))
                .with_override(OverrideRule::new("max", "LengthMax").attribute("value")),
        )
        .build()
        .unwrap()
}

#[test]
fn cached_result_is_shared() {
    let registry = registry();
    let expander = Expander::new(&registry);
    let cache = ExpansionCache::new();
    let list = registry.declare(&[DirectiveSpec::new("Short")]).unwrap();
    let key = FieldKey::new("Person", "code");

    let first = cache.expand(&expander, key.clone(), &list).unwrap();
    let second = cache.expand(&expander, key.clone(), &list).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.field(), "Person#code");
    assert_eq!(
        first.get("LengthMax").and_then(|n| n.get("value")),
        Some(&Value::Int(8))
    );
    assert!(cache.get(&key).is_some());
}

#[test]
fn distinct_fields_get_distinct_entries() {
    let registry = registry();
    let expander = Expander::new(&registry);
    let cache = ExpansionCache::new();
    let short = registry
        .declare(&[DirectiveSpec::new("Short").with("max", 3)])
        .unwrap();

    cache.expand(&expander, FieldKey::new("Person", "a"), &short).unwrap();
    cache.expand(&expander, FieldKey::new("Person", "b"), &[]).unwrap();
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn threads_see_one_result() {
    let registry = registry();
    let expander = Expander::new(&registry);
    let cache = ExpansionCache::new();
    let list = registry.declare(&[DirectiveSpec::new("Short")]).unwrap();
    let key = FieldKey::new("Person", "code");

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.expand(&expander, key.clone(), &list).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.len(), 1);
}
