//! # Error Module
//!
//! Error types for the dataset preparation tools.
//!
//! ## Fatal vs per-file
//! [`ConfigError`], [`SplitError`] and [`StripError`] halt a run. A
//! [`ProcessError`] belongs to one file: it is recorded in the batch report
//! and the run moves on. Every variant that touches the disk names the path.

use image::ImageError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DatasetPrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("{0}")]
    Strip(#[from] StripError),
}

/// Invalid tool configuration, detected before any file is touched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ratios must sum to 1.0 (train {train} + val {val} + test {test} = {sum})")]
    RatioSum {
        train: f64,
        val: f64,
        test: f64,
        sum: f64,
    },

    #[error("{name} ratio must be between 0.0 and 1.0, got {value}")]
    RatioRange { name: &'static str, value: f64 },

    #[error("Target size must be non-zero, got {width}x{height}")]
    TargetSize { width: u32, height: u32 },
}

/// Errors that occur while discovering input files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a dataset split. Files copied before the failure stay
/// in place.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure processing a single image. Never fatal to a batch.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to decode image: {reason}")]
    Decode { reason: String },

    #[error("Failed to save image to {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dimensions: {reason}")]
    InvalidDimensions { reason: String },

    #[error("Resize failed: {0}")]
    Resize(String),
}

impl ProcessError {
    /// Map a failure opening or decoding `path`
    pub fn decode(path: &Path, err: ImageError) -> Self {
        match err {
            ImageError::IoError(source) => ProcessError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => ProcessError::Decode {
                reason: other.to_string(),
            },
        }
    }

    /// Map a failure writing `path`
    pub fn encode(path: &Path, err: ImageError) -> Self {
        ProcessError::Encode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Errors reading EXIF metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Could not open {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed metadata in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Fatal errors for the EXIF stripper
#[derive(Error, Debug)]
pub enum StripError {
    #[error("Input directory '{}' not found.", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DatasetPrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_sum_error_mentions_requirement() {
        let error = ConfigError::RatioSum {
            train: 0.8,
            val: 0.3,
            test: 0.1,
            sum: 1.2,
        };
        let message = error.to_string();
        assert!(message.contains("ratios must sum to 1.0"));
        assert!(message.contains("0.3"));
    }

    #[test]
    fn copy_error_includes_both_paths() {
        let error = SplitError::Copy {
            from: PathBuf::from("/data/images/a.jpg"),
            to: PathBuf::from("/out/images/train/a.jpg"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let message = error.to_string();
        assert!(message.contains("/data/images/a.jpg"));
        assert!(message.contains("/out/images/train/a.jpg"));
    }

    #[test]
    fn missing_input_names_directory() {
        let error = StripError::InputNotFound {
            path: PathBuf::from("/photos/raw"),
        };
        assert_eq!(error.to_string(), "Input directory '/photos/raw' not found.");
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let error: DatasetPrepError = ConfigError::TargetSize {
            width: 0,
            height: 640,
        }
        .into();
        assert!(error.to_string().starts_with("Configuration error"));
    }
}
