//! # Core Module
//!
//! The file-processing logic behind the three command-line tools.
//!
//! ## Modules
//! - `scanner` - Finds images by extension, listing or walking directories
//! - `decode` - Decodes images by content rather than extension
//! - `report` - Per-file outcomes collected into a batch report
//! - `split` - Partitions images and labels into train / val / test
//! - `letterbox` - Fits images into a fixed gray canvas
//! - `metadata` - Reads EXIF tags for display
//! - `strip` - Re-encodes images without metadata, mirroring a tree

pub mod decode;
pub mod letterbox;
pub mod metadata;
pub mod report;
pub mod scanner;
pub mod split;
pub mod strip;

// Re-export commonly used types
pub use letterbox::{LetterboxConfig, LetterboxGeometry, LetterboxProcessor};
pub use metadata::ExifTags;
pub use report::{BatchReport, FileFailure};
pub use scanner::{ImageFile, ImageFilter, ImageFormat};
pub use split::{DatasetSplitter, Partition, PartitionCounts, SplitConfig, SplitRatios};
pub use strip::{ExifStripper, StripConfig};
