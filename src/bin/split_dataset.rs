//! # split-dataset
//!
//! ## Usage
//! ```bash
//! split-dataset --images-path data/images --labels-path data/labels --output-dir dataset --seed 42
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    dataset_prep::cli::split::run()
}
