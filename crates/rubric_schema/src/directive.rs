//! Directive type definitions.
//!
//! A [`DirectiveType`] is the schema of a directive: its qualified name, its
//! ordered attribute descriptors, and whether it is atomic or composite.
//! Composite types carry the directives they statically nest and the
//! [`OverrideRule`]s declared on their own attributes.

use std::sync::Arc;

use rubric_foundation::{Type, Value};
use serde::{Deserialize, Serialize};

use crate::rule::OverrideRule;

/// Broad role of a directive type.
///
/// Only domain directives (constraints, conversions, formats) take part in
/// override rules and shared attribute propagation. Markers are structural
/// metadata that ride along with a composite's expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Validates a value.
    #[default]
    Constraint,
    /// Transforms a value before validation or after formatting.
    Conversion,
    /// Parses or prints a value.
    Format,
    /// Structural metadata with no runtime effect of its own.
    Marker,
}

impl Category {
    /// Returns true for constraints, conversions, and formats.
    #[must_use]
    pub const fn is_domain(self) -> bool {
        !matches!(self, Self::Marker)
    }
}

/// Schema definition for a directive attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Attribute name.
    pub name: Arc<str>,
    /// Attribute type.
    pub ty: Type,
    /// Default value if not provided at the use site.
    ///
    /// Attributes without a default must be written explicitly.
    pub default: Option<Value>,
}

impl AttributeDescriptor {
    /// Creates an attribute that must be written explicitly.
    #[must_use]
    pub fn required(name: impl Into<Arc<str>>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Creates an attribute with a default value.
    #[must_use]
    pub fn optional(name: impl Into<Arc<str>>, ty: Type, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default.into()),
        }
    }

    /// Returns true if the attribute has no default.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A statically written directive occurrence: a type name plus the
/// attribute values written at that site.
///
/// Specs are unresolved; the registry turns them into
/// [`DirectiveInstance`](crate::DirectiveInstance)s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveSpec {
    /// Qualified name of the directive type.
    pub directive: Arc<str>,
    /// Explicitly written attribute values, in writing order.
    pub attributes: Vec<(Arc<str>, Value)>,
}

impl DirectiveSpec {
    /// Creates a spec with no explicit attributes.
    #[must_use]
    pub fn new(directive: impl Into<Arc<str>>) -> Self {
        Self {
            directive: directive.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an explicit attribute value.
    #[must_use]
    pub fn with(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Nested content of a composite directive type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositeDef {
    /// Domain directives the composite expands into, in declaration order.
    pub nested: Vec<DirectiveSpec>,
    /// Structural directives carried by the composite type itself.
    pub markers: Vec<DirectiveSpec>,
    /// Override rules declared on the composite's own attributes.
    pub overrides: Vec<OverrideRule>,
}

/// Whether a directive type is atomic or composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Expresses a single rule.
    Atomic,
    /// Bundles nested directives.
    Composite(CompositeDef),
}

/// Schema definition for a directive type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveType {
    /// Qualified name (e.g. `rubric.constraint.LengthMax`).
    pub name: Arc<str>,
    /// Broad role of the directive.
    pub category: Category,
    /// If true, the directive may occur several times in one list.
    pub repeatable: bool,
    /// Attribute descriptors, in declaration order.
    pub attributes: Vec<AttributeDescriptor>,
    /// Atomic or composite.
    pub kind: DirectiveKind,
}

impl DirectiveType {
    /// Creates an atomic directive type.
    #[must_use]
    pub fn atomic(name: impl Into<Arc<str>>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            repeatable: false,
            attributes: Vec::new(),
            kind: DirectiveKind::Atomic,
        }
    }

    /// Creates a structural marker type.
    #[must_use]
    pub fn marker(name: impl Into<Arc<str>>) -> Self {
        Self::atomic(name, Category::Marker)
    }

    /// Creates a composite directive type with nothing nested yet.
    #[must_use]
    pub fn composite(name: impl Into<Arc<str>>, category: Category) -> Self {
        Self {
            kind: DirectiveKind::Composite(CompositeDef::default()),
            ..Self::atomic(name, category)
        }
    }

    /// Marks the directive as repeatable.
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Adds an attribute descriptor.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a nested directive. Turns an atomic type into a composite.
    #[must_use]
    pub fn with_nested(self, spec: DirectiveSpec) -> Self {
        self.edit_composite(|def| def.nested.push(spec))
    }

    /// Adds a structural marker directive. Turns an atomic type into a composite.
    #[must_use]
    pub fn with_marker(self, spec: DirectiveSpec) -> Self {
        self.edit_composite(|def| def.markers.push(spec))
    }

    /// Adds an override rule. Turns an atomic type into a composite.
    #[must_use]
    pub fn with_override(self, rule: OverrideRule) -> Self {
        self.edit_composite(|def| def.overrides.push(rule))
    }

    fn edit_composite(mut self, edit: impl FnOnce(&mut CompositeDef)) -> Self {
        let mut def = match std::mem::replace(&mut self.kind, DirectiveKind::Atomic) {
            DirectiveKind::Composite(def) => def,
            DirectiveKind::Atomic => CompositeDef::default(),
        };
        edit(&mut def);
        self.kind = DirectiveKind::Composite(def);
        self
    }

    /// Returns the attribute descriptor by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name.as_ref() == name)
    }

    /// Returns true if the type declares the attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns true for composite types.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, DirectiveKind::Composite(_))
    }

    /// Returns the composite definition, if any.
    #[must_use]
    pub fn composite_def(&self) -> Option<&CompositeDef> {
        match &self.kind {
            DirectiveKind::Composite(def) => Some(def),
            DirectiveKind::Atomic => None,
        }
    }

    /// Returns the override rules declared on this type (empty for atomics).
    #[must_use]
    pub fn overrides(&self) -> &[OverrideRule] {
        self.composite_def().map_or(&[], |def| def.overrides.as_slice())
    }
}
