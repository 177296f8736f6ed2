//! Loading schema and field documents from disk.

use std::fs;
use std::path::Path;

use rubric_foundation::{Error, ErrorKind, Result};
use rubric_schema::{DirectiveRegistry, FieldDocument};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })
}

fn in_file(path: &Path) -> impl Fn(Error) -> Error + '_ {
    move |err| {
        let context = err
            .context
            .clone()
            .unwrap_or_default()
            .with_source(path.display().to_string());
        err.with_context(context)
    }
}

/// Loads and validates a directive registry from a JSON schema file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is malformed, or fails
/// registry validation. Errors name the file.
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<DirectiveRegistry> {
    let path = path.as_ref();
    let text = read(path)?;
    let registry = DirectiveRegistry::from_json(&text).map_err(in_file(path))?;
    tracing::info!(path = %path.display(), types = registry.len(), "loaded schema");
    Ok(registry)
}

/// Loads a field document from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load_fields<P: AsRef<Path>>(path: P) -> Result<FieldDocument> {
    let path = path.as_ref();
    let text = read(path)?;
    FieldDocument::from_json(&text).map_err(in_file(path))
}
