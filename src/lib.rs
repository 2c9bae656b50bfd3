//! # Camera Sorter
//!
//! Sorts a flat folder of photos into `<camera>/<year>/Q<quarter>` folders
//! using the EXIF metadata embedded in each file.
//!
//! ## Architecture
//! - `core` - Extraction, classification, path layout and relocation
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SorterError};

/// Initialize tracing for the library
///
/// `RUST_LOG` wins when set; otherwise `warn`, so skipped files show up
/// (`debug` when verbose, which also logs every relocation).
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
