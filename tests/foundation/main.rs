//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Type, Attributes, and Error.

mod attributes;
mod errors;
mod values;
