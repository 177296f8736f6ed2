//! Core values, attribute types, and errors for Rubric.
//!
//! This crate provides:
//! - [`Value`] - Attribute values carried by directive instances
//! - [`Type`] - Attribute value type descriptors
//! - [`Attributes`] - Persistent attribute maps with origin-tagged slots
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod types;
pub mod value;

pub use collections::{AttrSlot, Attributes, LtVec, Origin};
pub use error::{Error, ErrorContext, ErrorKind};
pub use types::Type;
pub use value::Value;

/// Result type alias using Rubric's Error type.
pub type Result<T> = std::result::Result<T, Error>;
