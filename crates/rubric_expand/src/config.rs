//! Configuration for directive expansion.

use std::sync::Arc;

use rubric_schema::SharedAttributeSet;

/// Configuration for the expander.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpanderConfig {
    /// Name of the numeric attribute that orders siblings.
    pub priority_attribute: Arc<str>,

    /// Attribute names forwarded from a composite to its nested directives.
    pub shared_attributes: SharedAttributeSet,

    /// Forward shared values that are empty strings or empty lists.
    pub propagate_empty_shared: bool,

    /// Fail when an override rule's occurrence index matches no child.
    pub strict_occurrences: bool,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            priority_attribute: "order".into(),
            shared_attributes: SharedAttributeSet::default(),
            propagate_empty_shared: false,
            strict_occurrences: false,
        }
    }
}

impl ExpanderConfig {
    /// Creates a configuration that also rejects override rules addressing
    /// an occurrence no child has.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_occurrences: true,
            ..Self::default()
        }
    }

    /// Builder method to set the priority attribute name.
    #[must_use]
    pub fn with_priority_attribute(mut self, name: impl Into<Arc<str>>) -> Self {
        self.priority_attribute = name.into();
        self
    }

    /// Builder method to set the shared attribute names.
    #[must_use]
    pub fn with_shared_attributes(mut self, shared: SharedAttributeSet) -> Self {
        self.shared_attributes = shared;
        self
    }

    /// Builder method to enable/disable forwarding of empty shared values.
    #[must_use]
    pub fn with_propagate_empty_shared(mut self, propagate: bool) -> Self {
        self.propagate_empty_shared = propagate;
        self
    }

    /// Builder method to enable/disable strict occurrence checking.
    #[must_use]
    pub fn with_strict_occurrences(mut self, strict: bool) -> Self {
        self.strict_occurrences = strict;
        self
    }
}
