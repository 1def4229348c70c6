//! In-memory [`DatasetFs`] for exercising the splitter without a disk.

use super::fs::DatasetFs;
use crate::core::scanner::{ImageFile, ImageFilter};
use crate::error::ScanError;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory file system
///
/// Useful for testing partitioning without touching disk. Destinations
/// registered with [`MemoryFs::deny_writes_to`] fail with
/// `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    denied: RwLock<HashSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content. Its parent directory is created.
    pub fn with_file(self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.mkdirs(parent);
        }
        if let Ok(mut files) = self.files.write() {
            files.insert(path, content.to_vec());
        }
        self
    }

    /// Make copies to `path` fail
    pub fn deny_writes_to(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut denied) = self.denied.write() {
            denied.insert(path.into());
        }
        self
    }

    /// Content of a file, if present
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// Whether a directory was created or implied by a file
    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs
            .read()
            .map(|dirs| dirs.contains(path))
            .unwrap_or(false)
    }

    /// All file paths under `dir` (recursive)
    pub fn files_under(&self, dir: &Path) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| {
                files
                    .keys()
                    .filter(|p| p.starts_with(dir))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn mkdirs(&self, path: &Path) {
        if let Ok(mut dirs) = self.dirs.write() {
            for ancestor in path.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "memory fs lock poisoned")
}

impl DatasetFs for MemoryFs {
    fn list_images(&self, dir: &Path, filter: &ImageFilter) -> Result<Vec<ImageFile>, ScanError> {
        if !self.is_dir(dir) {
            return Err(ScanError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let files = self.files.read().map_err(|_| ScanError::ReadDirectory {
            path: dir.to_path_buf(),
            source: poisoned(),
        })?;

        // BTreeMap iteration is already sorted by path
        Ok(files
            .keys()
            .filter(|p| p.parent() == Some(dir) && filter.should_include(p))
            .map(|p| ImageFile {
                path: p.clone(),
                file_name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })
            .collect())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.mkdirs(path);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.denied.read().map_err(|_| poisoned())?.contains(to) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        let parent_exists = to.parent().map(|p| self.is_dir(p)).unwrap_or(true);
        if !parent_exists {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }

        let content = self
            .read(from)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        self.files
            .write()
            .map_err(|_| poisoned())?
            .insert(to.to_path_buf(), content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fs_lists_direct_children_only() {
        let fs = MemoryFs::new()
            .with_file("/data/images/b.jpg", b"b")
            .with_file("/data/images/a.png", b"a")
            .with_file("/data/images/notes.txt", b"n")
            .with_file("/data/images/nested/c.jpg", b"c");

        let images = fs
            .list_images(Path::new("/data/images"), &ImageFilter::dataset())
            .unwrap();
        let names: Vec<_> = images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn memory_fs_copy_requires_parent() {
        let fs = MemoryFs::new().with_file("/src/a.jpg", b"a");
        assert!(fs.copy(Path::new("/src/a.jpg"), Path::new("/dst/a.jpg")).is_err());

        fs.create_dir_all(Path::new("/dst")).unwrap();
        fs.copy(Path::new("/src/a.jpg"), Path::new("/dst/a.jpg")).unwrap();
        assert_eq!(fs.read(Path::new("/dst/a.jpg")), Some(b"a".to_vec()));
    }

    #[test]
    fn memory_fs_create_dir_is_idempotent() {
        let fs = MemoryFs::new();
        fs.create_dir_all(Path::new("/out/images/train")).unwrap();
        fs.create_dir_all(Path::new("/out/images/train")).unwrap();
        assert!(fs.is_dir(Path::new("/out/images")));
    }
}
