//! The expanded directive tree.

use rubric_foundation::Value;
use rubric_schema::DirectiveInstance;

/// One node of an expanded directive tree.
///
/// Composite nodes carry their sorted domain children followed by the
/// composite type's structural directives. Atomic nodes have no children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedNode {
    /// The finalized instance.
    pub instance: DirectiveInstance,
    /// Declaration index among same-type siblings.
    pub index: usize,
    /// True if the instance's type is composite.
    pub composed: bool,
    /// Ordered children (empty for atomic nodes).
    pub children: Vec<ExpandedNode>,
}

impl ExpandedNode {
    /// Creates an atomic leaf.
    #[must_use]
    pub fn leaf(instance: DirectiveInstance) -> Self {
        Self {
            index: instance.index,
            instance,
            composed: false,
            children: Vec::new(),
        }
    }

    /// Creates a composite node.
    #[must_use]
    pub fn composite(instance: DirectiveInstance, children: Vec<ExpandedNode>) -> Self {
        Self {
            index: instance.index,
            instance,
            composed: true,
            children,
        }
    }

    /// Returns the qualified type name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.instance.name()
    }

    /// Gets a finalized attribute value.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.instance.get(attribute)
    }

    /// Iterates this node and its descendants depth-first, pre-order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Returns the non-composite nodes below (or at) this node, in order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&ExpandedNode> {
        self.walk().filter(|node| !node.composed).collect()
    }

    /// Returns the depth of the subtree (1 for a leaf).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ExpandedNode::depth).max().unwrap_or(0)
    }
}

/// Depth-first pre-order iterator over a tree.
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a ExpandedNode>,
}

impl<'a> Walk<'a> {
    /// Walks a forest in order.
    #[must_use]
    pub fn forest(nodes: &'a [ExpandedNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ExpandedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
