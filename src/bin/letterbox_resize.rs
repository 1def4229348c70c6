//! # letterbox-resize
//!
//! ## Usage
//! ```bash
//! letterbox-resize --input-dir raw --output-dir resized --target-width 640 --target-height 480
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    dataset_prep::cli::letterbox::run()
}
