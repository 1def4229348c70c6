//! # Metadata Module
//!
//! Reads EXIF metadata from image files for display.
//!
//! ## Outcomes
//! - `Ok(tags)` with entries - the container carries an EXIF block
//! - `Ok(empty)` - no EXIF block, or a format with no EXIF reader (GIF, BMP)
//! - `Err(_)` - the file could not be opened or its metadata is malformed
//!
//! ## Supported Formats
//! EXIF is read from JPEG, PNG (`eXIf` chunk) and TIFF containers.

use crate::core::scanner::ImageFormat;
use crate::error::MetadataError;
use exif::{Field, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One displayable metadata entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifEntry {
    /// Human-readable tag name, or the numeric id for unknown tags
    pub name: String,
    /// Rendered value
    pub value: String,
}

/// EXIF entries of the primary image, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifTags {
    entries: Vec<ExifEntry>,
}

impl ExifTags {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExifEntry> {
        self.entries.iter()
    }

    /// Value of the first entry with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }
}

impl FromIterator<ExifEntry> for ExifTags {
    fn from_iter<I: IntoIterator<Item = ExifEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Read the EXIF entries of a file
pub fn read_exif(path: &Path) -> Result<ExifTags, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if !ImageFormat::from_path(path).is_some_and(ImageFormat::carries_exif) {
        return Ok(ExifTags::default());
    }

    let mut bufreader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(ExifTags::default()),
        Err(exif::Error::Io(source)) => {
            return Err(MetadataError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(e) => {
            return Err(MetadataError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    Ok(exif
        .fields()
        .filter(|field| field.ifd_num == In::PRIMARY)
        .map(to_entry)
        .collect())
}

fn to_entry(field: &Field) -> ExifEntry {
    ExifEntry {
        name: tag_name(field.tag),
        value: render_value(field.tag, &field.value),
    }
}

/// Known tags render by name (`Make`), unknown ones by context and id
pub fn tag_name(tag: Tag) -> String {
    tag.to_string()
}

/// Render a value for display.
///
/// Byte-like values are decoded as UTF-8 when valid, otherwise shown as a
/// byte list. Everything else uses the tag-aware display of kamadak-exif.
pub fn render_value(tag: Tag, value: &Value) -> String {
    match value {
        Value::Ascii(parts) => parts
            .iter()
            .map(|part| decode_bytes(part))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Byte(bytes) | Value::Undefined(bytes, _) => decode_bytes(bytes),
        other => other.display_as(tag).to_string(),
    }
}

/// UTF-8 text with trailing NULs trimmed, or the raw byte list
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim_end_matches('\0').to_string(),
        Err(_) => format!("{:?}", bytes),
    }
}
