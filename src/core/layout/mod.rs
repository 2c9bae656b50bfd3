//! Destination path layout: `<base>/<model>/<year>/Q<quarter>`.

use crate::core::classify::Quarter;
use crate::error::ProcessError;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder name used when a photo has no usable camera model
pub const DEFAULT_UNKNOWN_MODEL: &str = "Unknown Camera";

/// Compose the destination directory. Pure; touches no files.
///
/// `model` is used verbatim, run it through [`sanitize_model`] first.
pub fn build_path(base: &Path, model: &str, year: i32, quarter: Quarter) -> PathBuf {
    base.join(model)
        .join(year.to_string())
        .join(format!("Q{}", quarter.number()))
}

/// Make a camera model safe to use as a single folder name
///
/// Separators, reserved characters and control characters become `_`.
/// Returns None when nothing usable is left (empty, `.` or `..`).
pub fn sanitize_model(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => None,
        _ => Some(cleaned.to_string()),
    }
}

/// Pick the folder name for a model, falling back to `unknown`
pub fn model_folder(model: Option<&str>, unknown: &str) -> String {
    model
        .and_then(sanitize_model)
        .unwrap_or_else(|| unknown.to_string())
}

/// Create `dir` and all parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<(), ProcessError> {
    fs::create_dir_all(dir).map_err(|e| ProcessError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })
}
