//! Composite directive expansion for Rubric.
//!
//! This crate provides:
//! - [`Expander`] - Recursive expansion with overrides and shared attributes
//! - [`ExpandedNode`] - The resolved, ordered directive tree
//! - [`DirectiveOrdering`] / [`PriorityOrdering`] - Sibling ordering
//! - [`Introspector`] - Per-instance metadata and working copies
//! - [`FieldDirectives`] - Tree queries for one field
//! - [`ExpansionCache`] - At-most-once expansion per field

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod config;
pub mod expander;
pub mod field;
pub mod introspect;
pub mod node;
pub mod ordering;

pub use cache::{ExpansionCache, FieldKey};
pub use config::ExpanderConfig;
pub use expander::Expander;
pub use field::FieldDirectives;
pub use introspect::{CompositeParts, Introspection, Introspector};
pub use node::{ExpandedNode, Walk};
pub use ordering::{DirectiveOrdering, PriorityOrdering, sort_instances};
