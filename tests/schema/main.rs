//! Integration tests for Layer 1: Schema
//!
//! Tests for directive types, the registry builder, and JSON documents.

mod documents;
mod registry;
