//! Queries over a field's expanded directive tree.

use std::sync::Arc;

use crate::node::{ExpandedNode, Walk};

/// The expanded directives of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDirectives {
    field: Arc<str>,
    nodes: Vec<ExpandedNode>,
}

impl FieldDirectives {
    /// Wraps an expanded tree.
    #[must_use]
    pub fn new(field: impl Into<Arc<str>>, nodes: Vec<ExpandedNode>) -> Self {
        Self {
            field: field.into(),
            nodes,
        }
    }

    /// Returns the field's qualified name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the top-level nodes in order.
    #[must_use]
    pub fn nodes(&self) -> &[ExpandedNode] {
        &self.nodes
    }

    /// Returns the number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the field carries no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates every node depth-first, pre-order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::forest(&self.nodes)
    }

    /// Returns the first node of the given type, searching into composites.
    #[must_use]
    pub fn get(&self, directive: &str) -> Option<&ExpandedNode> {
        self.walk().find(|node| node.name() == directive)
    }

    /// Returns every node of the given type, in walk order.
    #[must_use]
    pub fn all(&self, directive: &str) -> Vec<&ExpandedNode> {
        self.walk().filter(|node| node.name() == directive).collect()
    }

    /// Returns true if any node has the given type.
    #[must_use]
    pub fn has(&self, directive: &str) -> bool {
        self.get(directive).is_some()
    }

    /// Returns the non-composite nodes in walk order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&ExpandedNode> {
        self.walk().filter(|node| !node.composed).collect()
    }
}
