//! # Core Module
//!
//! The presentation-agnostic sorting engine.
//!
//! ## Modules
//! - `metadata` - Extracts camera model and capture time from photos
//! - `classify` - Maps capture months to calendar quarters
//! - `layout` - Composes `<model>/<year>/Q<n>` destination paths
//! - `relocate` - Copies or moves files, optionally with their siblings
//! - `sorter` - Walks the source folder and drives the per-file pipeline

pub mod classify;
pub mod layout;
pub mod metadata;
pub mod relocate;
pub mod sorter;

// Re-export commonly used types
pub use classify::{Clock, Quarter, YearSource};
pub use metadata::{CaptureMetadata, MetadataExtractor};
pub use relocate::{RelocateMode, Relocation, SiblingMatch};
pub use sorter::{PhotoSorter, SortConfig, SortReport};
