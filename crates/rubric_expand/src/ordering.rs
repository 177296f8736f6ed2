//! Deterministic ordering of sibling directives.
//!
//! The order of an expanded list is the order downstream conversion and
//! validation steps run in, so it must be total and reproducible.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rubric_foundation::Value;
use rubric_schema::DirectiveInstance;

/// A total order over directive instances.
pub trait DirectiveOrdering: fmt::Debug + Send + Sync {
    /// Compares two sibling instances.
    fn compare(&self, a: &DirectiveInstance, b: &DirectiveInstance) -> Ordering;
}

/// Orders by a numeric priority attribute, then by qualified type name.
///
/// - Instances whose type declares the priority attribute come first,
///   ascending by its value.
/// - Instances without it come last.
/// - Ties are broken by type name, then by declaration index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorityOrdering {
    attribute: Arc<str>,
}

impl Default for PriorityOrdering {
    fn default() -> Self {
        Self::new("order")
    }
}

impl PriorityOrdering {
    /// Creates an ordering keyed on the given attribute.
    #[must_use]
    pub fn new(attribute: impl Into<Arc<str>>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    /// Returns the priority attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    fn priority<'a>(&self, instance: &'a DirectiveInstance) -> Option<&'a Value> {
        instance
            .get(&self.attribute)
            .filter(|value| value.as_number().is_some())
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        _ => {
            let x = a.as_number().unwrap_or(f64::INFINITY);
            let y = b.as_number().unwrap_or(f64::INFINITY);
            x.total_cmp(&y)
        }
    }
}

impl DirectiveOrdering for PriorityOrdering {
    fn compare(&self, a: &DirectiveInstance, b: &DirectiveInstance) -> Ordering {
        let primary = match (self.priority(a), self.priority(b)) {
            (Some(x), Some(y)) => compare_numbers(x, y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        primary
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.index.cmp(&b.index))
    }
}

/// Sorts instances in place. The sort is stable.
pub fn sort_instances(ordering: &dyn DirectiveOrdering, instances: &mut [DirectiveInstance]) {
    instances.sort_by(|a, b| ordering.compare(a, b));
}
