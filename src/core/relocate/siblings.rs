//! Sibling discovery: files in the same folder that share a base name
//! (RAW + JPEG pairs, sidecars, previews).

use crate::error::ProcessError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How a file name is compared against a base name
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SiblingMatch {
    /// File name without extension equals the base name
    #[default]
    Stem,
    /// File name starts with the base name (`IMG_001` also matches `IMG_0010.JPG`)
    Prefix,
}

impl SiblingMatch {
    /// Check whether `path` belongs to the group named `base_name`
    ///
    /// Compares raw OS strings, so names that are not valid UTF-8 still match.
    pub fn matches(&self, path: &Path, base_name: impl AsRef<OsStr>) -> bool {
        let base_name = base_name.as_ref();
        match self {
            SiblingMatch::Stem => path.file_stem() == Some(base_name),
            SiblingMatch::Prefix => path
                .file_name()
                .map(|name| {
                    name.as_encoded_bytes()
                        .starts_with(base_name.as_encoded_bytes())
                })
                .unwrap_or(false),
        }
    }
}

/// List the non-directory entries of `dir` matching `base_name`, sorted by name
///
/// Only the top level of `dir` is listed.
pub fn find_siblings(
    dir: &Path,
    base_name: impl AsRef<OsStr>,
    sibling_match: SiblingMatch,
) -> Result<Vec<PathBuf>, ProcessError> {
    let base_name = base_name.as_ref();
    let mut siblings = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ProcessError::ListSiblings {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;

        if entry.path().is_dir() {
            continue;
        }

        if sibling_match.matches(entry.path(), base_name) {
            siblings.push(entry.into_path());
        }
    }

    Ok(siblings)
}
