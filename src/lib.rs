//! Rubric - Composite directive expansion for declarative field bindings
//!
//! This crate re-exports all layers of the Rubric system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: rubric_runtime    - Document loading, rendering, CLI
//! Layer 2: rubric_expand     - Expansion engine, ordering, cache
//! Layer 1: rubric_schema     - Directive types, override rules, registry
//! Layer 0: rubric_foundation - Core types (Value, Type, Attributes, Error)
//! ```

pub use rubric_expand as expand;
pub use rubric_foundation as foundation;
pub use rubric_runtime as runtime;
pub use rubric_schema as schema;
