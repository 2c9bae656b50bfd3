//! Sorting driver.
//!
//! Lists the top level of a source folder and runs every regular file
//! through Extract → Classify → Build Path → Relocate, one at a time.

mod executor;
mod types;
mod walker;

pub use executor::{PhotoSorter, SorterBuilder};
pub use types::*;
pub use walker::{list_source, SourceListing};
