//! Override rules declared on composite directive attributes.

use std::fmt;
use std::sync::Arc;

/// Which same-type child occurrence an override rule addresses.
///
/// Occurrences are counted by declaration index, so a rule keeps addressing
/// the same child no matter how the expanded siblings are later sorted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occurrence {
    /// The child with this declaration index among its same-type siblings.
    Index(usize),
    /// Every child of the target type.
    All,
}

impl Default for Occurrence {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl Occurrence {
    /// Returns true if a child with declaration index `index` is addressed.
    #[must_use]
    pub const fn matches(self, index: usize) -> bool {
        match self {
            Self::Index(i) => i == index,
            Self::All => true,
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::All => write!(f, "*"),
        }
    }
}

/// Maps one of a composite type's own attributes onto an attribute of a
/// nested child.
///
/// When the composite is expanded, the composite instance's resolved value
/// for `source` is written into `target_attribute()` of each addressed child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverrideRule {
    /// The composite's own attribute carrying the value.
    pub source: Arc<str>,
    /// Qualified name of the targeted child directive type.
    pub target: Arc<str>,
    /// Target attribute name; `None` means the same name as `source`.
    pub attribute: Option<Arc<str>>,
    /// Which occurrence of the target type is addressed.
    pub occurrence: Occurrence,
}

impl OverrideRule {
    /// Creates a rule addressing occurrence 0 of `target`, with the target
    /// attribute named like the source.
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>, target: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attribute: None,
            occurrence: Occurrence::default(),
        }
    }

    /// Sets the target attribute name.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<Arc<str>>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    /// Addresses the child with the given declaration index.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.occurrence = Occurrence::Index(index);
        self
    }

    /// Addresses every child of the target type.
    #[must_use]
    pub fn all(mut self) -> Self {
        self.occurrence = Occurrence::All;
        self
    }

    /// Returns the effective target attribute name.
    #[must_use]
    pub fn target_attribute(&self) -> &str {
        self.attribute.as_deref().unwrap_or(&self.source)
    }

    /// Returns true if the rule addresses a child of type `directive` with
    /// declaration index `index`.
    #[must_use]
    pub fn matches(&self, directive: &str, index: usize) -> bool {
        self.target.as_ref() == directive && self.occurrence.matches(index)
    }
}

impl fmt::Display for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}[{}].{}",
            self.source,
            self.target,
            self.occurrence,
            self.target_attribute()
        )
    }
}
