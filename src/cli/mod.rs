//! # CLI Module
//!
//! Argument parsing and terminal output for the three binaries.
//!
//! ## Usage
//! ```bash
//! # Split a dataset 80/10/10
//! split-dataset --images-path data/images --labels-path data/labels --output-dir dataset
//!
//! # Letterbox into 640x640
//! letterbox-resize --input-dir raw --output-dir resized
//!
//! # Strip metadata, showing tags before and after
//! strip-exif photos/ clean/ --verbose
//! ```
//!
//! Each tool writes human-readable progress lines to stdout. Logging from
//! the library goes to stderr and is controlled by `RUST_LOG`.

pub mod letterbox;
pub mod split;
pub mod strip;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Bar for loops with a known length
fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb
}

/// Spinner for walks of unknown length
fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}

/// Write a line above the progress bar.
///
/// `suspend` is used rather than `ProgressBar::println`, which drops the
/// line when the bar is hidden (stdout is not a terminal).
fn line(pb: &ProgressBar, term: &Term, text: &str) {
    pb.suspend(|| term.write_line(text).ok());
}

fn warning(term: &Term, text: &str) {
    term.write_line(&format!("{} {}", style("Warning:").yellow().bold(), text))
        .ok();
}

fn error(term: &Term, text: &str) {
    term.write_line(&format!("{} {}", style("Error:").red().bold(), text))
        .ok();
}
