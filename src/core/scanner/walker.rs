//! Directory listing and walking using walkdir.

use super::{filter::ImageFilter, ImageFile};
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// List the images directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Symlinks to files count as files. Sorting makes the listing stable
/// so a seeded shuffle is reproducible.
pub fn list_images(dir: &Path, filter: &ImageFilter) -> Result<Vec<ImageFile>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut images = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| to_scan_error(dir, e))?;
        if !is_file(&entry) || !filter.should_include(entry.path()) {
            continue;
        }

        images.push(ImageFile {
            path: entry.path().to_path_buf(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
        });
    }

    tracing::debug!(dir = %dir.display(), count = images.len(), "listed images");
    Ok(images)
}

/// An entry produced by [`walk_tree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// A directory, including the root itself (relative path is empty)
    Directory { relative: PathBuf },
    /// A regular file
    File { path: PathBuf, relative: PathBuf },
}

/// Walk `root` recursively. Every directory is yielded before anything
/// inside it. Symlinked files are yielded; symlinked directories are not
/// descended into.
pub fn walk_tree(root: &Path) -> impl Iterator<Item = Result<TreeEntry, ScanError>> + '_ {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => classify(root, &entry).map(Ok),
            Err(e) => Some(Err(to_scan_error(root, e))),
        })
}

fn classify(root: &Path, entry: &DirEntry) -> Option<TreeEntry> {
    let relative = entry
        .path()
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_default();

    if entry.file_type().is_dir() {
        Some(TreeEntry::Directory { relative })
    } else if is_file(entry) {
        Some(TreeEntry::File {
            path: entry.path().to_path_buf(),
            relative,
        })
    } else {
        None
    }
}

/// Regular file, or a symlink resolving to one
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn to_scan_error(fallback: &Path, e: walkdir::Error) -> ScanError {
    let path = e
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    ScanError::ReadDirectory { path, source }
}
