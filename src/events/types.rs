//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while sorting a folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory listing events
    Scan(ScanEvent),
    /// Per-file pipeline events
    File(FileEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events while listing the source directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Listing has started
    Started { source: PathBuf },
    /// Listing finished; `total_files` files will be processed
    Completed {
        total_files: usize,
        directories_skipped: usize,
    },
}

/// Events for individual files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileEvent {
    /// A file is about to go through the pipeline
    Progress(FileProgress),
    /// A file (primary or sibling) reached its destination
    Relocated {
        source: PathBuf,
        destination: PathBuf,
    },
    /// A file was left in place because of an error
    Skipped { path: PathBuf, message: String },
}

/// Position within the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProgress {
    /// Files handled so far, including the current one
    pub completed: usize,
    /// Files found by the listing
    pub total: usize,
    /// File being processed
    pub current_path: PathBuf,
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// Run has started
    Started,
    /// Run finished (individual files may still have failed)
    Completed { summary: RunSummary },
    /// The source directory could not be listed
    Error { message: String },
}

/// Totals for a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Regular files found in the source directory
    pub files_seen: usize,
    /// Files relocated, siblings included
    pub relocated: usize,
    /// Files skipped because of an error
    pub skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::File(FileEvent::Relocated {
            source: PathBuf::from("/inbox/IMG_01.JPG"),
            destination: PathBuf::from("/photos/Canon/2024/Q1/IMG_01.JPG"),
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::File(FileEvent::Relocated { destination, .. }) => {
                assert!(destination.ends_with("Q1/IMG_01.JPG"));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn run_summary_is_serializable() {
        let summary = RunSummary {
            files_seen: 120,
            relocated: 118,
            skipped: 2,
            duration_ms: 5000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"skipped\":2"));
    }
}
