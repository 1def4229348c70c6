//! Extension allow-list filtering.

use super::{DATASET_EXTENSIONS, STRIP_EXTENSIONS};
use std::collections::HashSet;
use std::path::Path;

/// Decides which files count as images for a tool
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Lowercase file extensions to include
    extensions: HashSet<String>,
}

impl ImageFilter {
    /// Create a filter accepting exactly the given extensions
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// png, jpg and jpeg
    pub fn dataset() -> Self {
        Self::new(DATASET_EXTENSIONS)
    }

    /// The wider set handled by the EXIF stripper
    pub fn strip() -> Self {
        Self::new(STRIP_EXTENSIONS)
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::dataset()
    }
}
