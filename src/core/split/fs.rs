//! File-system seam for the splitter.
//!
//! The splitter only needs four primitives. Putting them behind a trait
//! lets the partitioning run against an in-memory tree in tests.

use crate::core::scanner::{self, ImageFile, ImageFilter};
use crate::error::ScanError;
use std::fs;
use std::io;
use std::path::Path;

/// File operations used by the dataset splitter
pub trait DatasetFs {
    /// Non-recursive listing of images in `dir`, sorted by file name
    fn list_images(&self, dir: &Path, filter: &ImageFilter) -> Result<Vec<ImageFile>, ScanError>;

    /// Create a directory and its parents. Must succeed if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy a file, overwriting the destination
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DatasetFs for LocalFs {
    fn list_images(&self, dir: &Path, filter: &ImageFilter) -> Result<Vec<ImageFile>, ScanError> {
        scanner::list_images(dir, filter)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
