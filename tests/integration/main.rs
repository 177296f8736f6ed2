//! Integration tests across all layers
//!
//! Loads the fixture schema and field documents from disk and checks the
//! expanded trees end to end.

mod fixtures;
mod rendering;

use std::path::PathBuf;

/// Path to a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}
