//! # Error Module
//!
//! Error types for the camera sorter.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - every per-file error carries the offending path
//! - **One bad file never stops the run** - only source directory errors are fatal

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SorterError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that abort the whole run (the source directory itself is unusable)
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that skip a single file
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode EXIF data from {path}: {reason}")]
    MetadataDecode { path: PathBuf, reason: String },

    #[error("Missing {tag} tag in {path}")]
    MissingTag { path: PathBuf, tag: &'static str },

    #[error("Unparseable capture date {value:?} in {path} (expected YYYY:MM:DD HH:MM:SS)")]
    TimestampParse { path: PathBuf, value: String },

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list siblings in {path}: {source}")]
    ListSiblings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} has no file name to relocate")]
    NoFileName { path: PathBuf },

    #[error("{path} was not found among its own siblings")]
    PrimaryNotListed { path: PathBuf },

    #[error("Failed to relocate {from} to {to}: {source}")]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// The file this error is about
    pub fn path(&self) -> &PathBuf {
        match self {
            ProcessError::FileOpen { path, .. }
            | ProcessError::MetadataDecode { path, .. }
            | ProcessError::MissingTag { path, .. }
            | ProcessError::TimestampParse { path, .. }
            | ProcessError::DirectoryCreate { path, .. }
            | ProcessError::ListSiblings { path, .. }
            | ProcessError::NoFileName { path }
            | ProcessError::PrimaryNotListed { path } => path,
            ProcessError::Relocate { from, .. } => from,
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SorterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/photos/inbox"),
        };
        assert!(error.to_string().contains("/photos/inbox"));
    }

    #[test]
    fn timestamp_error_includes_value_and_path() {
        let error = ProcessError::TimestampParse {
            path: PathBuf::from("/photos/IMG_01.JPG"),
            value: "2024-01-15".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/IMG_01.JPG"));
        assert!(message.contains("2024-01-15"));
    }

    #[test]
    fn relocate_error_reports_source_path() {
        let error = ProcessError::Relocate {
            from: PathBuf::from("/a/IMG_01.CR2"),
            to: PathBuf::from("/b/IMG_01.CR2"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "cross-device link"),
        };
        assert_eq!(error.path(), &PathBuf::from("/a/IMG_01.CR2"));
        assert!(error.to_string().contains("cross-device link"));
    }

    #[test]
    fn sibling_errors_name_the_primary() {
        let error = ProcessError::PrimaryNotListed {
            path: PathBuf::from("/card/IMG_01.CR2"),
        };
        assert_eq!(error.path(), &PathBuf::from("/card/IMG_01.CR2"));
        assert!(error.to_string().contains("/card/IMG_01.CR2"));
    }

    #[test]
    fn scan_error_converts_to_top_level() {
        let error: SorterError = ScanError::DirectoryNotFound {
            path: PathBuf::from("/missing"),
        }
        .into();
        assert!(error.to_string().starts_with("Scanning error"));
    }
}
