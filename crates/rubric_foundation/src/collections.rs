//! Persistent collections with structural sharing.
//!
//! These are thin wrappers around the `im` crate's persistent data structures.
//! Cloning an [`Attributes`] map is O(1), which is what lets every expansion
//! work on its own copy of a composite's nested directives without ever
//! touching the shared schema.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::sync::Arc;

use crate::value::Value;

/// Persistent vector with structural sharing.
///
/// Cloning is O(1). Modifications return a new vector sharing structure
/// with the original.
#[derive(Clone, Default)]
pub struct LtVec<T>(im::Vector<T>)
where
    T: Clone;

impl<T: Clone> LtVec<T> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets an element by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Returns a new vector with the element appended.
    #[must_use]
    pub fn push_back(&self, value: T) -> Self {
        let mut new = self.0.clone();
        new.push_back(value);
        Self(new)
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Returns the first element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.0.front()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for LtVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + PartialEq> PartialEq for LtVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Clone + Eq> Eq for LtVec<T> {}

impl<T: Clone + Hash> Hash for LtVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: Clone> FromIterator<T> for LtVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(im::Vector::from_iter(iter))
    }
}

impl<'a, T: Clone> IntoIterator for &'a LtVec<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Attribute Maps
// =============================================================================

/// Where a resolved attribute value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Origin {
    /// Written at the use site.
    Explicit,
    /// Taken from the directive type's declared default.
    Default,
    /// Copied from an enclosing composite through a shared attribute name.
    Propagated,
    /// Written by an enclosing composite's override rule.
    Overridden,
}

impl Origin {
    /// Returns true for values written at the use site.
    #[must_use]
    pub const fn is_explicit(self) -> bool {
        matches!(self, Self::Explicit)
    }
}

/// A resolved attribute value tagged with its origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrSlot {
    /// The resolved value.
    pub value: Value,
    /// Where the value came from.
    pub origin: Origin,
}

impl AttrSlot {
    /// Creates a slot holding an explicit use-site value.
    #[must_use]
    pub fn explicit(value: Value) -> Self {
        Self {
            value,
            origin: Origin::Explicit,
        }
    }

    /// Creates a slot holding a type default.
    #[must_use]
    pub fn default_value(value: Value) -> Self {
        Self {
            value,
            origin: Origin::Default,
        }
    }
}

/// Persistent, name-ordered map of resolved attribute values.
///
/// Iteration order is by attribute name, so two maps with the same contents
/// always print and compare identically.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Attributes(im::OrdMap<Arc<str>, AttrSlot>);

impl Attributes {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Gets an attribute's value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).map(|slot| &slot.value)
    }

    /// Gets an attribute's slot (value and origin) by name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&AttrSlot> {
        self.0.get(name)
    }

    /// Gets an attribute's origin by name.
    #[must_use]
    pub fn origin(&self, name: &str) -> Option<Origin> {
        self.0.get(name).map(|slot| slot.origin)
    }

    /// Sets an attribute in place.
    pub fn set(&mut self, name: impl Into<Arc<str>>, value: Value, origin: Origin) {
        self.0.insert(name.into(), AttrSlot { value, origin });
    }

    /// Returns a new map with the attribute set.
    #[must_use]
    pub fn insert(&self, name: impl Into<Arc<str>>, value: Value, origin: Origin) -> Self {
        let mut new = self.clone();
        new.set(name, value, origin);
        new
    }

    /// Returns an iterator over `(name, slot)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrSlot)> {
        self.0.iter().map(|(name, slot)| (name.as_ref(), slot))
    }

    /// Returns an iterator over attribute names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(AsRef::as_ref)
    }

    /// Returns an iterator over the attributes that were written explicitly.
    pub fn explicit(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter()
            .filter(|(_, slot)| slot.origin.is_explicit())
            .map(|(name, slot)| (name, &slot.value))
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(name, slot)| (name, &slot.value)))
            .finish()
    }
}

impl<N: Into<Arc<str>>> FromIterator<(N, AttrSlot)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, AttrSlot)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, slot)| (name.into(), slot))
                .collect(),
        )
    }
}
