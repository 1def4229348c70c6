//! Image decoding shared by the resizer and the stripper.
//!
//! The decoder is chosen from the file's magic bytes, falling back to the
//! extension only when the content is not recognised. A PNG saved as
//! `photo.jpg` decodes as PNG.

use crate::error::ProcessError;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Decode the image at `path`, sniffing its format from the content
pub fn open_image(path: &Path) -> Result<DynamicImage, ProcessError> {
    let io_error = |source| ProcessError::Io {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?
        .decode()
        .map_err(|e| ProcessError::decode(path, e))
}
