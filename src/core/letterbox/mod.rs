//! # Letterbox Module
//!
//! Fits images into a fixed-size canvas without distortion.
//!
//! The image is scaled by the largest factor that keeps both edges inside
//! the target box, resampled with Lanczos3 and copied onto a gray canvas at
//! the top-left corner. The image is not centered: label coordinates
//! downstream rely on the (0, 0) anchor.
//!
//! ```text
//! 1280x960 into 640x640
//! +----------------+
//! |  resized       |  640x480
//! |  content       |
//! +----------------+
//! |  gray fill     |  160 rows of (128, 128, 128)
//! +----------------+
//! ```

mod processor;
mod resize;

pub use processor::{letterbox_image, LetterboxConfig, LetterboxEvent, LetterboxOutcome, LetterboxProcessor};
pub use resize::LanczosResizer;

use crate::error::ProcessError;

/// Fill color of the padded canvas area
pub const PAD_COLOR: [u8; 3] = [128, 128, 128];

/// Default target edge length
pub const DEFAULT_TARGET: u32 = 640;

/// Where a source image lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxGeometry {
    /// Uniform scale factor applied to both edges
    pub scale: f64,
    /// Size of the resampled image, anchored at (0, 0)
    pub resized: (u32, u32),
    /// Size of the output canvas
    pub canvas: (u32, u32),
}

impl LetterboxGeometry {
    /// Compute `scale = min(tw / w, th / h)` and the floored scaled size.
    pub fn compute(source: (u32, u32), target: (u32, u32)) -> Result<Self, ProcessError> {
        let (src_w, src_h) = source;
        let (tgt_w, tgt_h) = target;

        if src_w == 0 || src_h == 0 {
            return Err(ProcessError::InvalidDimensions {
                reason: format!("source image is {}x{}", src_w, src_h),
            });
        }
        if tgt_w == 0 || tgt_h == 0 {
            return Err(ProcessError::InvalidDimensions {
                reason: format!("target size is {}x{}", tgt_w, tgt_h),
            });
        }

        let scale = f64::min(
            tgt_w as f64 / src_w as f64,
            tgt_h as f64 / src_h as f64,
        );
        let new_w = ((src_w as f64 * scale).floor() as u32).min(tgt_w);
        let new_h = ((src_h as f64 * scale).floor() as u32).min(tgt_h);

        if new_w == 0 || new_h == 0 {
            return Err(ProcessError::InvalidDimensions {
                reason: format!(
                    "{}x{} scales to {}x{} inside {}x{}",
                    src_w, src_h, new_w, new_h, tgt_w, tgt_h
                ),
            });
        }

        Ok(Self {
            scale,
            resized: (new_w, new_h),
            canvas: target,
        })
    }

    /// Padded columns on the right and rows at the bottom
    pub fn padding(&self) -> (u32, u32) {
        (
            self.canvas.0 - self.resized.0,
            self.canvas.1 - self.resized.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_into_square() {
        let geometry = LetterboxGeometry::compute((1280, 960), (640, 640)).unwrap();
        assert_eq!(geometry.scale, 0.5);
        assert_eq!(geometry.resized, (640, 480));
        assert_eq!(geometry.padding(), (0, 160));
    }

    #[test]
    fn portrait_into_square() {
        let geometry = LetterboxGeometry::compute((300, 1280), (640, 640)).unwrap();
        assert_eq!(geometry.resized, (150, 640));
        assert_eq!(geometry.padding(), (490, 0));
    }

    #[test]
    fn small_images_are_upscaled() {
        let geometry = LetterboxGeometry::compute((100, 50), (640, 640)).unwrap();
        assert_eq!(geometry.scale, 6.4);
        assert_eq!(geometry.resized, (640, 320));
    }

    #[test]
    fn dimensions_are_floored() {
        // 640 / 1000 = 0.64; 333 * 0.64 = 213.12
        let geometry = LetterboxGeometry::compute((1000, 333), (640, 640)).unwrap();
        assert_eq!(geometry.resized, (640, 213));
    }

    #[test]
    fn non_square_target() {
        let geometry = LetterboxGeometry::compute((1920, 1080), (480, 320)).unwrap();
        assert_eq!(geometry.resized, (480, 270));
        assert_eq!(geometry.canvas, (480, 320));
    }

    #[test]
    fn never_exceeds_target() {
        let sources = [(1, 1), (3, 7), (641, 639), (4000, 3), (7, 9999), (1279, 961)];
        let targets = [(640, 640), (1, 1), (300, 200), (333, 777)];
        for source in sources {
            for target in targets {
                if let Ok(g) = LetterboxGeometry::compute(source, target) {
                    assert!(g.resized.0 <= target.0, "{source:?} -> {target:?}");
                    assert!(g.resized.1 <= target.1, "{source:?} -> {target:?}");
                    // one edge always touches the box, up to flooring
                    assert!(g.resized.0 + 1 >= target.0 || g.resized.1 + 1 >= target.1);
                }
            }
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(LetterboxGeometry::compute((0, 10), (640, 640)).is_err());
        assert!(LetterboxGeometry::compute((10, 10), (640, 0)).is_err());
    }

    #[test]
    fn sliver_that_floors_to_zero_is_rejected() {
        let err = LetterboxGeometry::compute((10_000, 1), (640, 640)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidDimensions { .. }));
    }
}
