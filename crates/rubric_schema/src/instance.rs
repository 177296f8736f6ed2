//! Concrete directive occurrences.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rubric_foundation::{Attributes, Error, ErrorKind, Origin, Result, Value};

use crate::directive::DirectiveType;

/// A directive occurrence with fully resolved attributes.
///
/// `index` is the occurrence's position among same-type siblings as
/// declared. It is fixed when the list is declared and never renumbered.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectiveInstance {
    /// The directive type.
    pub directive: Arc<DirectiveType>,
    /// Resolved attribute values, each tagged with its origin.
    pub attributes: Attributes,
    /// Declaration index among same-type siblings.
    pub index: usize,
}

impl DirectiveInstance {
    /// Creates an instance from already resolved attributes, with index 0.
    #[must_use]
    pub fn new(directive: Arc<DirectiveType>, attributes: Attributes) -> Self {
        Self {
            directive,
            attributes,
            index: 0,
        }
    }

    /// Resolves explicit values against the type's descriptors.
    ///
    /// Explicit values are tagged [`Origin::Explicit`]; every other
    /// descriptor with a default contributes an [`Origin::Default`] slot.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit attribute is not declared, has the
    /// wrong type, or a required attribute is missing.
    pub fn resolve(directive: Arc<DirectiveType>, explicit: &[(Arc<str>, Value)]) -> Result<Self> {
        let attributes = resolve_attributes(&directive, explicit)?;
        Ok(Self::new(directive, attributes))
    }

    /// Sets the declaration index.
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Returns the qualified type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.directive.name
    }

    /// Gets a resolved attribute value.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Returns true if the type is composite.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.directive.is_composite()
    }
}

impl fmt::Debug for DirectiveInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {:?}", self.directive.name, self.index, self.attributes)
    }
}

impl fmt::Display for DirectiveInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.directive.name, self.index)?;
        if self.attributes.is_empty() {
            return Ok(());
        }
        write!(f, " {{")?;
        for (i, (name, slot)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={}", slot.value)?;
        }
        write!(f, "}}")
    }
}

fn resolve_attributes(directive: &DirectiveType, explicit: &[(Arc<str>, Value)]) -> Result<Attributes> {
    let mut attributes = Attributes::new();

    for (name, value) in explicit {
        let descriptor = directive
            .attribute(name)
            .ok_or_else(|| Error::unknown_attribute(directive.name.as_ref(), name.as_ref()))?;
        if !value.conforms_to(&descriptor.ty) {
            return Err(Error::type_mismatch(
                format!("{}.{name}", directive.name),
                descriptor.ty.clone(),
                value.value_type(),
            ));
        }
        attributes.set(name.clone(), value.clone(), Origin::Explicit);
    }

    for descriptor in &directive.attributes {
        if attributes.contains(&descriptor.name) {
            continue;
        }
        match &descriptor.default {
            Some(default) => {
                attributes.set(descriptor.name.clone(), default.clone(), Origin::Default);
            }
            None => {
                return Err(Error::missing_attribute(
                    directive.name.as_ref(),
                    descriptor.name.as_ref(),
                ));
            }
        }
    }

    Ok(attributes)
}

/// Assigns declaration indices to a list in declaration order.
///
/// Each instance gets its position among the preceding instances of the
/// same type.
///
/// # Errors
///
/// Returns [`ErrorKind::NotRepeatable`] if a non-repeatable type occurs
/// more than once.
pub fn assign_indices(instances: &mut [DirectiveInstance]) -> Result<()> {
    let mut seen: HashMap<Arc<str>, usize> = HashMap::new();
    for instance in instances.iter_mut() {
        let count = seen.entry(instance.directive.name.clone()).or_insert(0);
        if *count > 0 && !instance.directive.repeatable {
            return Err(Error::new(ErrorKind::NotRepeatable(
                instance.directive.name.to_string(),
            )));
        }
        instance.index = *count;
        *count += 1;
    }
    Ok(())
}
