//! # strip-exif
//!
//! ## Usage
//! ```bash
//! strip-exif photos/ clean/ --verbose
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    dataset_prep::cli::strip::run()
}
