//! Types for the sorter.

use crate::core::classify::YearSource;
use crate::core::layout::DEFAULT_UNKNOWN_MODEL;
use crate::core::relocate::{Relocation, RelocateMode, SiblingMatch};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A regular file found at the top level of the source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFile {
    /// Absolute path
    pub path: PathBuf,
    /// File name without extension (lossy, for display and logs)
    pub base_name: String,
    /// Extension without the dot, if any
    pub extension: Option<String>,
}

impl PhotoFile {
    pub fn from_path(path: PathBuf) -> Self {
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned());

        Self {
            path,
            base_name,
            extension,
        }
    }
}

/// Configuration for a sort run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    /// Flat folder of photos to sort
    pub source: PathBuf,
    /// Root of the `<model>/<year>/Q<n>` tree
    pub destination: PathBuf,
    pub mode: RelocateMode,
    pub sibling_match: SiblingMatch,
    pub year_source: YearSource,
    /// Folder name for photos without a usable camera model
    pub unknown_model: String,
    /// Compute destinations without touching the filesystem
    pub dry_run: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            destination: default_destination(),
            mode: RelocateMode::default(),
            sibling_match: SiblingMatch::default(),
            year_source: YearSource::default(),
            unknown_model: DEFAULT_UNKNOWN_MODEL.to_string(),
            dry_run: false,
        }
    }
}

/// The user's pictures folder, or `~/Pictures` when the platform has none
pub fn default_destination() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("Pictures"))
}

/// A file left in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a sort run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: RelocateMode,
    pub dry_run: bool,
    /// Regular files found in the source directory
    pub files_seen: usize,
    /// Subdirectories that were ignored
    pub directories_skipped: usize,
    /// Files that reached (or, in a dry run, would reach) their destination
    pub relocated: Vec<Relocation>,
    pub skipped: Vec<SkippedFile>,
    pub duration_ms: u64,
}

impl SortReport {
    /// Find where a source file went
    pub fn destination_of(&self, source: &Path) -> Option<&Path> {
        self.relocated
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.destination.as_path())
    }

    /// Whether any file failed
    pub fn has_errors(&self) -> bool {
        !self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_file_splits_name() {
        let file = PhotoFile::from_path(PathBuf::from("/inbox/IMG_01.CR2"));
        assert_eq!(file.base_name, "IMG_01");
        assert_eq!(file.extension.as_deref(), Some("CR2"));
    }

    #[test]
    fn photo_file_without_extension() {
        let file = PhotoFile::from_path(PathBuf::from("/inbox/README"));
        assert_eq!(file.base_name, "README");
        assert_eq!(file.extension, None);
    }

    #[test]
    fn default_config_copies_with_stem_matching() {
        let config = SortConfig::default();
        assert_eq!(config.mode, RelocateMode::Copy);
        assert_eq!(config.sibling_match, SiblingMatch::Stem);
        assert_eq!(config.year_source, YearSource::Current);
        assert_eq!(config.unknown_model, "Unknown Camera");
        assert!(!config.dry_run);
    }
}
