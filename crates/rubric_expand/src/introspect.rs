//! Directive introspection.
//!
//! Reports what the expander needs to know about one instance: its type,
//! its resolved attributes, and, for composites, a fresh working copy of
//! the nested directives together with the type's override rules.

use std::sync::Arc;

use rubric_foundation::{Attributes, Value};
use rubric_schema::{DirectiveInstance, DirectiveRegistry, DirectiveType, OverrideRule};

/// The nested content of one composite use site.
#[derive(Clone, Debug)]
pub struct CompositeParts {
    /// Working copy of the nested domain directives, in declaration order.
    pub nested: Vec<DirectiveInstance>,
    /// Working copy of the structural directives, in declaration order.
    pub markers: Vec<DirectiveInstance>,
    /// Override rules declared on the composite type.
    pub overrides: Vec<OverrideRule>,
}

/// What introspecting one instance reports.
#[derive(Clone, Debug)]
pub struct Introspection {
    /// The directive type.
    pub directive: Arc<DirectiveType>,
    /// Resolved attributes (explicit, else the type default).
    pub attributes: Attributes,
    /// Nested content; `None` for atomic types.
    pub composite: Option<CompositeParts>,
}

impl Introspection {
    /// Returns true if the instance's type is composite.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.directive.is_composite()
    }

    /// Returns the explicitly written attributes.
    pub fn explicit(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.explicit()
    }
}

/// Reads directive metadata from a registry.
///
/// Introspection is pure and never fails. A composite whose type is not the
/// registered definition of that name reports `composite: None`; the
/// caller decides whether that is an error.
#[derive(Clone, Copy, Debug)]
pub struct Introspector<'r> {
    registry: &'r DirectiveRegistry,
}

impl<'r> Introspector<'r> {
    /// Creates an introspector over the registry.
    #[must_use]
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry's entry for `directive` if it is the same
    /// definition, not merely the same name.
    fn registered(&self, directive: &Arc<DirectiveType>) -> Option<&'r Arc<DirectiveType>> {
        self.registry
            .get(&directive.name)
            .filter(|registered| Arc::ptr_eq(registered, directive) || ***registered == **directive)
    }

    /// Introspects one instance.
    ///
    /// Every call returns independent copies of the nested directives, so
    /// two use sites of the same composite never share state.
    #[must_use]
    pub fn introspect(&self, instance: &DirectiveInstance) -> Introspection {
        let composite = self
            .registered(&instance.directive)
            .and_then(|registered| {
                let def = registered.composite_def()?;
                let template = self.registry.template(&registered.name)?;
                Some(CompositeParts {
                    nested: template.nested.clone(),
                    markers: template.markers.clone(),
                    overrides: def.overrides.clone(),
                })
            });

        Introspection {
            directive: instance.directive.clone(),
            attributes: instance.attributes.clone(),
            composite,
        }
    }
}
