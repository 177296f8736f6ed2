//! Attribute names forwarded from a composite to its nested directives.

use std::sync::Arc;

/// Message template attribute.
pub const MESSAGE: &str = "message";
/// Applicability groups attribute.
pub const GROUPS: &str = "groups";
/// Read/write phase attribute.
pub const CASES: &str = "cases";

/// The set of attribute names propagated by name from a composite instance
/// to every child declaring an attribute of the same name.
///
/// Order is preserved so propagation is applied deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedAttributeSet {
    names: Vec<Arc<str>>,
}

impl Default for SharedAttributeSet {
    fn default() -> Self {
        Self::new([MESSAGE, GROUPS, CASES])
    }
}

impl SharedAttributeSet {
    /// Creates a set from the given names. Duplicates are dropped.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.insert(name);
        }
        set
    }

    /// Creates an empty set, disabling propagation.
    #[must_use]
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Adds a name if not already present.
    pub fn insert(&mut self, name: impl Into<Arc<str>>) {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
    }

    /// Returns a new set with the name added.
    #[must_use]
    pub fn with(mut self, name: impl Into<Arc<str>>) -> Self {
        self.insert(name);
        self
    }

    /// Returns true if the name is shared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.as_ref() == name)
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is shared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }
}
