//! Flat listing of the source directory using walkdir.

use super::PhotoFile;
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Top-level contents of the source directory
#[derive(Debug, Default)]
pub struct SourceListing {
    /// Absolute source directory
    pub root: PathBuf,
    /// Regular files, sorted by name
    pub files: Vec<PhotoFile>,
    /// Subdirectories that were ignored
    pub directories_skipped: usize,
}

/// List the regular files directly inside `source`
///
/// Fails only when the directory itself cannot be resolved or read; a single
/// unreadable entry is logged and left out.
pub fn list_source(source: &Path) -> Result<SourceListing, ScanError> {
    let root = source.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::DirectoryNotFound {
            path: source.to_path_buf(),
        },
        _ => ScanError::ReadDirectory {
            path: source.to_path_buf(),
            source: e,
        },
    })?;

    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound { path: root });
    }

    let mut listing = SourceListing {
        root: root.clone(),
        ..Default::default()
    };

    for entry_result in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::ReadDirectory {
                    path: root,
                    source: e.into(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping directory");
            listing.directories_skipped += 1;
            continue;
        }

        listing.files.push(PhotoFile::from_path(entry.into_path()));
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_top_level_files_in_name_order() {
        let temp = TempDir::new().unwrap();
        for name in ["b.jpg", "a.jpg", "c.CR2"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }

        let listing = list_source(temp.path()).unwrap();
        let names: Vec<_> = listing.files.iter().map(|f| f.base_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(listing.root.is_absolute());
    }

    #[test]
    fn skips_subdirectories_and_their_contents() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top.jpg"), b"x").unwrap();
        fs::create_dir_all(temp.path().join("album")).unwrap();
        fs::write(temp.path().join("album").join("inner.jpg"), b"x").unwrap();

        let listing = list_source(temp.path()).unwrap();
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].base_name, "top");
        assert_eq!(listing.directories_skipped, 1);
    }

    #[test]
    fn missing_source_is_not_found() {
        let result = list_source(Path::new("/nonexistent/inbox"));
        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }

    #[test]
    fn file_as_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("photo.jpg");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            list_source(&file),
            Err(ScanError::DirectoryNotFound { .. })
        ));
    }
}
