//! # Scanner Module
//!
//! Discovers image files in directories.
//!
//! Two discovery modes are provided:
//! - [`list_images`] - the direct children of one directory (splitter and
//!   resizer)
//! - [`walk_tree`] - a recursive pre-order walk yielding directories before
//!   their contents (EXIF stripper)
//!
//! Files are matched purely by extension, case-insensitively. No content
//! sniffing is done.
//!
//! ## Example
//! ```rust,ignore
//! use dataset_prep::core::scanner::{list_images, ImageFilter};
//!
//! let images = list_images(Path::new("dataset/images"), &ImageFilter::dataset())?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{list_images, walk_tree, TreeEntry};

use std::path::{Path, PathBuf};

/// Extensions accepted by the splitter and the letterbox resizer
pub const DATASET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extensions accepted by the EXIF stripper
pub const STRIP_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "tiff", "bmp"];

/// A discovered image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File name, used to name outputs and derive label files
    pub file_name: String,
}

/// Containers the tools read and write, keyed by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
}

impl ImageFormat {
    /// Format named by the extension of `path`, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let format = match ext.as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            "gif" => ImageFormat::Gif,
            "tiff" | "tif" => ImageFormat::Tiff,
            "bmp" => ImageFormat::Bmp,
            _ => return None,
        };
        Some(format)
    }

    /// Whether the container can hold an EXIF block we know how to read
    pub fn carries_exif(self) -> bool {
        matches!(self, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff)
    }
}
