//! Directive types, override rules, and the directive registry for Rubric.
//!
//! This crate provides:
//! - [`DirectiveType`] - Directive schemas (atomic or composite)
//! - [`OverrideRule`] - Composite attribute to nested attribute mappings
//! - [`SharedAttributeSet`] - Attribute names forwarded to nested directives
//! - [`DirectiveInstance`] - Resolved directive occurrences
//! - [`DirectiveRegistry`] - Validated, immutable type registry
//! - [`SchemaDocument`] / [`FieldDocument`] - JSON descriptions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod directive;
pub mod document;
pub mod instance;
pub mod registry;
pub mod rule;
pub mod shared;

pub use directive::{
    AttributeDescriptor, Category, CompositeDef, DirectiveKind, DirectiveSpec, DirectiveType,
};
pub use document::{DeclaredField, FieldDocument, SchemaDocument};
pub use instance::{DirectiveInstance, assign_indices};
pub use registry::{CompositeTemplate, DirectiveRegistry, RegistryBuilder};
pub use rule::{Occurrence, OverrideRule};
pub use shared::SharedAttributeSet;
