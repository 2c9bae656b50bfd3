//! File relocation: copy, move, or move together with sibling files.
//!
//! Nothing here rolls back. A failed copy may leave a partial destination
//! file, and a failed sibling does not undo the siblings already moved.

mod siblings;

pub use siblings::{find_siblings, SiblingMatch};

use crate::error::ProcessError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// How files reach their destination
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelocateMode {
    /// Copy files to destination (keep originals)
    #[default]
    Copy,
    /// Rename files into the destination
    Move,
    /// Rename the file and every sibling sharing its base name
    MoveWithSiblings,
}

/// One file that reached its destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Stream `src` into `dest`, creating or truncating it. Returns bytes copied.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, ProcessError> {
    let to_error = |source: io::Error| ProcessError::Relocate {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    let mut source_file = File::open(src).map_err(to_error)?;
    let mut dest_file = File::create(dest).map_err(to_error)?;
    io::copy(&mut source_file, &mut dest_file).map_err(to_error)
}

/// Rename `src` to `dest`. Cross-volume renames fail and are reported as is.
pub fn move_file(src: &Path, dest: &Path) -> Result<(), ProcessError> {
    fs::rename(src, dest).map_err(|e| ProcessError::Relocate {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })
}

/// Relocate `src` into `dest_dir`, keeping its file name
///
/// Returns one result per file touched: exactly one for copy and move,
/// one per sibling for [`RelocateMode::MoveWithSiblings`].
pub fn relocate(
    src: &Path,
    dest_dir: &Path,
    mode: RelocateMode,
    sibling_match: SiblingMatch,
) -> Vec<Result<Relocation, ProcessError>> {
    match mode {
        RelocateMode::Copy => vec![copy_one(src, dest_dir)],
        RelocateMode::Move => vec![move_one(src, dest_dir)],
        RelocateMode::MoveWithSiblings => move_with_siblings(src, dest_dir, sibling_match),
    }
}

/// Move `primary` and every sibling in its directory into `dest_dir`
///
/// Each file is renamed independently; one failure does not stop the rest.
pub fn move_with_siblings(
    primary: &Path,
    dest_dir: &Path,
    sibling_match: SiblingMatch,
) -> Vec<Result<Relocation, ProcessError>> {
    let siblings = match sibling_set(primary, sibling_match) {
        Ok(siblings) => siblings,
        Err(e) => return vec![Err(e)],
    };

    siblings
        .iter()
        .map(|sibling| {
            let result = move_one(sibling, dest_dir);
            match &result {
                Ok(r) => tracing::debug!(
                    source = %r.source.display(),
                    destination = %r.destination.display(),
                    "moved sibling"
                ),
                Err(e) => tracing::warn!(error = %e, "sibling move failed"),
            }
            result
        })
        .collect()
}

/// `primary` plus every file in its directory sharing its base name
///
/// The primary is always part of the set; if the listing does not contain
/// it (e.g. it vanished meanwhile) that is an error, never an empty set.
pub fn sibling_set(
    primary: &Path,
    sibling_match: SiblingMatch,
) -> Result<Vec<PathBuf>, ProcessError> {
    let source_dir = primary.parent().unwrap_or(Path::new("."));
    let base_name = primary.file_stem().ok_or_else(|| ProcessError::NoFileName {
        path: primary.to_path_buf(),
    })?;

    let siblings = find_siblings(source_dir, base_name, sibling_match)?;
    if !siblings.iter().any(|s| s.file_name() == primary.file_name()) {
        return Err(ProcessError::PrimaryNotListed {
            path: primary.to_path_buf(),
        });
    }

    Ok(siblings)
}

fn copy_one(src: &Path, dest_dir: &Path) -> Result<Relocation, ProcessError> {
    let dest = destination_for(src, dest_dir)?;
    copy_file(src, &dest)?;
    Ok(Relocation {
        source: src.to_path_buf(),
        destination: dest,
    })
}

fn move_one(src: &Path, dest_dir: &Path) -> Result<Relocation, ProcessError> {
    let dest = destination_for(src, dest_dir)?;
    move_file(src, &dest)?;
    Ok(Relocation {
        source: src.to_path_buf(),
        destination: dest,
    })
}

/// `dest_dir/<original file name>`
///
/// Paths ending in `..` or a root have no file name and are rejected.
pub fn destination_for(src: &Path, dest_dir: &Path) -> Result<PathBuf, ProcessError> {
    src.file_name()
        .map(|name| dest_dir.join(name))
        .ok_or_else(|| ProcessError::NoFileName {
            path: src.to_path_buf(),
        })
}
