//! Schema loading, tree rendering, and the `rubric` command line tool.
//!
//! This crate provides:
//! - [`load_registry`] / [`load_fields`] - JSON documents from disk
//! - [`Session`] - Cached expansion of field documents
//! - [`render_tree`] / [`render_json`] - Output formats
//! - [`init_logging`] - `tracing` subscriber setup for binaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod load;
pub mod render;
pub mod session;

pub use load::{load_fields, load_registry};
pub use render::{render_json, render_tree};
pub use session::Session;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "RUBRIC_LOG";

/// Installs a stderr `tracing` subscriber.
///
/// The filter comes from [`LOG_ENV`] when set; otherwise `verbose` selects
/// `debug` and the default is `warn`. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
