//! High-quality RGB resizing.
//!
//! Uses the fast_image_resize crate with a Lanczos3 convolution. SIMD
//! (AVX2/NEON) is picked automatically when available.

use crate::error::ProcessError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

/// Lanczos3 resizer for 8-bit RGB images
///
/// Keeps its internal buffers between calls, so reuse one instance for a
/// whole directory.
pub struct LanczosResizer {
    resizer: Resizer,
}

impl LanczosResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resize `image` to exactly `width` x `height`
    pub fn resize(
        &mut self,
        image: &RgbImage,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, ProcessError> {
        let (src_width, src_height) = image.dimensions();

        if src_width == 0 || src_height == 0 {
            return Err(ProcessError::InvalidDimensions {
                reason: "empty source image".to_string(),
            });
        }

        if width == 0 || height == 0 {
            return Err(ProcessError::InvalidDimensions {
                reason: format!("cannot resize to {}x{}", width, height),
            });
        }

        let src_image = Image::from_vec_u8(
            src_width,
            src_height,
            image.as_raw().clone(),
            PixelType::U8x3,
        )
        .map_err(|e| ProcessError::Resize(format!("invalid source buffer: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8x3);

        let options =
            ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| ProcessError::Resize(e.to_string()))?;

        RgbImage::from_raw(width, height, dst_image.into_vec())
            .ok_or_else(|| ProcessError::Resize("result buffer has wrong length".to_string()))
    }
}

impl Default for LanczosResizer {
    fn default() -> Self {
        Self::new()
    }
}
