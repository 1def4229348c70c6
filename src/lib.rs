//! # Dataset Prep
//!
//! Helpers for preparing image datasets for object-detection training.
//!
//! ## Tools
//! - `split-dataset` - Split images and their labels into train / val / test
//! - `letterbox-resize` - Fit images into a fixed-size gray canvas
//! - `strip-exif` - Recursively re-encode images without metadata
//!
//! ## Architecture
//! - `core` - The file-processing logic, one module per tool plus shared
//!   scanning and reporting
//! - `error` - Error types
//! - `cli` - Argument parsing and terminal output for each binary

pub mod cli;
pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{DatasetPrepError, Result};

/// Initialize tracing for the library
///
/// Called once by each binary. Log output is controlled by `RUST_LOG` and
/// only errors are shown by default, so it does not duplicate the progress
/// lines.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber was already set");
    }
}
