//! # Metadata Module
//!
//! Extracts the capture metadata the sorter needs from photo files.
//!
//! ## Consumed Tags
//! - `Model` - camera model, becomes the top-level folder
//! - `DateTime` - capture timestamp in `YYYY:MM:DD HH:MM:SS`
//!
//! Decoding is behind the [`MetadataExtractor`] trait so the sorter can be
//! driven by something other than EXIF (tests use a plain-text fake).

use crate::error::ProcessError;
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

/// Camera model tag name
pub const TAG_MODEL: &str = "Model";
/// Capture timestamp tag name
pub const TAG_DATE_TIME: &str = "DateTime";

/// EXIF timestamp layout
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// A readable, seekable handle positioned at the start of a file
pub trait ReadSeek: BufRead + Seek {}

impl<T: BufRead + Seek> ReadSeek for T {}

/// Named tag values decoded from a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    values: BTreeMap<String, String>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tag value. NUL padding and surrounding whitespace are dropped.
    pub fn insert(&mut self, tag: &str, value: &str) {
        let trimmed = value.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        self.values.insert(tag.to_string(), trimmed.to_string());
    }

    /// Builder-style [`TagSet::insert`]
    pub fn with(mut self, tag: &str, value: &str) -> Self {
        self.insert(tag, value);
        self
    }

    /// Look up a tag; empty values count as absent
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.values
            .get(tag)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Decodes embedded metadata from an open file
///
/// Implement this trait to plug in another decoder (e.g., for testing).
pub trait MetadataExtractor: Send + Sync {
    /// Decode the tags of one file. The error string is the decoder's reason.
    fn read_tags(&self, reader: &mut dyn ReadSeek) -> Result<TagSet, String>;
}

/// EXIF extractor backed by kamadak-exif
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifExtractor;

impl MetadataExtractor for ExifExtractor {
    fn read_tags(&self, reader: &mut dyn ReadSeek) -> Result<TagSet, String> {
        let mut reader = reader;
        let exif = Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| e.to_string())?;

        let mut tags = TagSet::new();
        for (tag, name) in [(Tag::Model, TAG_MODEL), (Tag::DateTime, TAG_DATE_TIME)] {
            if let Some(field) = exif.get_field(tag, In::PRIMARY) {
                if let Some(value) = get_string_value(&field.value) {
                    tags.insert(name, &value);
                }
            }
        }

        Ok(tags)
    }
}

/// Metadata the sorter needs from one photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMetadata {
    /// Camera model as recorded (None when the tag is absent or empty)
    pub model: Option<String>,
    /// Capture timestamp
    pub captured_at: NaiveDateTime,
}

impl CaptureMetadata {
    /// Interpret decoded tags. A missing or malformed timestamp is an error;
    /// a missing model is not.
    pub fn from_tags(path: &Path, tags: &TagSet) -> Result<Self, ProcessError> {
        let raw_date = tags.get(TAG_DATE_TIME).ok_or_else(|| ProcessError::MissingTag {
            path: path.to_path_buf(),
            tag: TAG_DATE_TIME,
        })?;

        let captured_at =
            parse_capture_timestamp(raw_date).ok_or_else(|| ProcessError::TimestampParse {
                path: path.to_path_buf(),
                value: raw_date.to_string(),
            })?;

        Ok(Self {
            model: tags.get(TAG_MODEL).map(str::to_string),
            captured_at,
        })
    }
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` timestamp
pub fn parse_capture_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), EXIF_DATETIME_FORMAT).ok()
}

/// Open a file and extract its capture metadata
pub fn read_capture_metadata(
    path: &Path,
    extractor: &dyn MetadataExtractor,
) -> Result<CaptureMetadata, ProcessError> {
    let file = File::open(path).map_err(|e| ProcessError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = BufReader::new(file);
    let tags = extractor
        .read_tags(&mut reader)
        .map_err(|reason| ProcessError::MetadataDecode {
            path: path.to_path_buf(),
            reason,
        })?;

    CaptureMetadata::from_tags(path, &tags)
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                return Some(s.to_string());
            }
        }
    }
    None
}
