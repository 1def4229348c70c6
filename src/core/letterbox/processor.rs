//! Letterboxes every image in a directory.

use super::{LanczosResizer, LetterboxGeometry, DEFAULT_TARGET, PAD_COLOR};
use crate::core::decode::open_image;
use crate::core::report::BatchReport;
use crate::core::scanner::{list_images, ImageFile, ImageFilter};
use crate::error::{ConfigError, ProcessError};
use image::{imageops, DynamicImage, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for letterboxing a directory
#[derive(Debug, Clone)]
pub struct LetterboxConfig {
    /// Directory of source images (not searched recursively)
    pub input_dir: PathBuf,
    /// Where the letterboxed images are written, under the same file names
    pub output_dir: PathBuf,
    /// Canvas width
    pub target_width: u32,
    /// Canvas height
    pub target_height: u32,
}

impl LetterboxConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            target_width: DEFAULT_TARGET,
            target_height: DEFAULT_TARGET,
        }
    }

    /// Set the canvas size
    pub fn target(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }
}

/// Progress events emitted while letterboxing
#[derive(Debug, Clone, PartialEq)]
pub enum LetterboxEvent {
    /// No png/jpg/jpeg files in the input directory
    NoImages { dir: PathBuf },
    /// Processing is about to start
    Started { total: usize },
    /// One image was written
    Resized { file_name: String, output: PathBuf },
    /// One image failed; the rest continue
    Failed { file_name: String, message: String },
}

/// A successfully letterboxed image
#[derive(Debug, Clone, PartialEq)]
pub struct LetterboxOutcome {
    pub file_name: String,
    pub output: PathBuf,
    pub geometry: LetterboxGeometry,
}

/// Scale `image` into a `target` canvas, anchored top-left on gray.
///
/// The input is converted to 8-bit RGB first, so alpha is dropped and
/// palettes are expanded.
pub fn letterbox_image(
    image: &DynamicImage,
    target: (u32, u32),
    resizer: &mut LanczosResizer,
) -> Result<(RgbImage, LetterboxGeometry), ProcessError> {
    let rgb = image.to_rgb8();
    let geometry = LetterboxGeometry::compute(rgb.dimensions(), target)?;

    let (new_w, new_h) = geometry.resized;
    let resized = resizer.resize(&rgb, new_w, new_h)?;

    let mut canvas = RgbImage::from_pixel(target.0, target.1, Rgb(PAD_COLOR));
    imageops::replace(&mut canvas, &resized, 0, 0);

    Ok((canvas, geometry))
}

/// Letterboxes a directory of images one file at a time
pub struct LetterboxProcessor {
    config: LetterboxConfig,
    resizer: LanczosResizer,
}

impl LetterboxProcessor {
    /// Build a processor, rejecting a zero-sized canvas
    pub fn new(config: LetterboxConfig) -> Result<Self, ConfigError> {
        if config.target_width == 0 || config.target_height == 0 {
            return Err(ConfigError::TargetSize {
                width: config.target_width,
                height: config.target_height,
            });
        }
        Ok(Self {
            config,
            resizer: LanczosResizer::new(),
        })
    }

    /// Process every image, reporting each outcome through `on_event`.
    ///
    /// Never fails as a whole: a missing input directory means no images,
    /// and each file's failure is recorded in the report.
    pub fn run<F>(&mut self, mut on_event: F) -> BatchReport<LetterboxOutcome>
    where
        F: FnMut(&LetterboxEvent),
    {
        let mut report = BatchReport::new();

        if let Err(e) = fs::create_dir_all(&self.config.output_dir) {
            warn!(dir = %self.config.output_dir.display(), error = %e, "could not create output directory");
        }

        let images = match list_images(&self.config.input_dir, &ImageFilter::dataset()) {
            Ok(images) => images,
            Err(e) => {
                warn!(error = %e, "could not list input directory");
                Vec::new()
            }
        };

        if images.is_empty() {
            on_event(&LetterboxEvent::NoImages {
                dir: self.config.input_dir.clone(),
            });
            return report;
        }

        info!(total = images.len(), "letterboxing images");
        on_event(&LetterboxEvent::Started {
            total: images.len(),
        });

        for image in &images {
            let result = self.process_file(image);
            match &result {
                Ok(outcome) => on_event(&LetterboxEvent::Resized {
                    file_name: outcome.file_name.clone(),
                    output: outcome.output.clone(),
                }),
                Err(e) => {
                    warn!(file = %image.file_name, error = %e, "failed to letterbox image");
                    on_event(&LetterboxEvent::Failed {
                        file_name: image.file_name.clone(),
                        message: e.to_string(),
                    });
                }
            }
            report.record(&image.path, result);
        }

        report
    }

    fn process_file(&mut self, image: &ImageFile) -> Result<LetterboxOutcome, ProcessError> {
        let decoded = open_image(&image.path)?;
        let (canvas, geometry) = letterbox_image(&decoded, self.config.target_size(), &mut self.resizer)?;

        let output = self.output_path(image);
        canvas
            .save(&output)
            .map_err(|e| ProcessError::encode(&output, e))?;

        debug!(
            file = %image.file_name,
            resized = ?geometry.resized,
            scale = geometry.scale,
            "letterboxed image"
        );

        Ok(LetterboxOutcome {
            file_name: image.file_name.clone(),
            output,
            geometry,
        })
    }

    fn output_path(&self, image: &ImageFile) -> PathBuf {
        match image.path.file_name() {
            Some(name) => self.config.output_dir.join(name),
            None => self.config.output_dir.join(Path::new(&image.file_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn canvas_is_target_sized_with_gray_bottom() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(1280, 960, Rgb([10, 200, 30])));
        let (canvas, geometry) =
            letterbox_image(&source, (640, 640), &mut LanczosResizer::new()).unwrap();

        assert_eq!(canvas.dimensions(), (640, 640));
        assert_eq!(geometry.resized, (640, 480));
        for y in 480..640 {
            for x in 0..640 {
                assert_eq!(canvas.get_pixel(x, y).0, PAD_COLOR, "({x}, {y})");
            }
        }
        let anchor = canvas.get_pixel(0, 0).0;
        assert!((anchor[1] as i16 - 200).abs() <= 1);
    }

    #[test]
    fn content_is_anchored_top_left_not_centered() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 400, Rgb([255, 0, 0])));
        let (canvas, geometry) =
            letterbox_image(&source, (200, 200), &mut LanczosResizer::new()).unwrap();

        assert_eq!(geometry.resized, (50, 200));
        assert_ne!(canvas.get_pixel(0, 100).0, PAD_COLOR);
        assert_eq!(canvas.get_pixel(199, 100).0, PAD_COLOR);
        assert_eq!(canvas.get_pixel(60, 0).0, PAD_COLOR);
    }

    #[test]
    fn alpha_is_dropped() {
        let source = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(20, 20, Rgba([0, 0, 255, 0])));
        let (canvas, _) = letterbox_image(&source, (10, 20), &mut LanczosResizer::new()).unwrap();

        // fully transparent blue still pastes as blue
        let [r, g, b] = canvas.get_pixel(5, 5).0;
        assert!(r <= 1 && g <= 1 && b >= 254, "{:?}", [r, g, b]);
        assert_eq!(canvas.get_pixel(5, 15).0, PAD_COLOR);
    }

    #[test]
    fn zero_target_is_a_config_error() {
        let config = LetterboxConfig::new("/in", "/out").target(0, 640);
        assert!(matches!(
            LetterboxProcessor::new(config),
            Err(ConfigError::TargetSize { width: 0, height: 640 })
        ));
    }

    #[test]
    fn mislabelled_extension_is_decoded_by_content() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("in");
        fs::create_dir(&input).unwrap();
        let mut png = Vec::new();
        RgbImage::from_pixel(40, 20, Rgb([0, 200, 0]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        fs::write(input.join("scraped.jpg"), png).unwrap();

        let config = LetterboxConfig::new(&input, temp.path().join("out")).target(80, 80);
        let report = LetterboxProcessor::new(config).unwrap().run(|_| {});

        assert!(report.failed.is_empty(), "{:?}", report.failed);
        assert_eq!(report.succeeded[0].geometry.resized, (80, 40));
        // the output keeps its name, so it is written as a JPEG
        let written = image::ImageReader::open(temp.path().join("out/scraped.jpg"))
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(written.format(), Some(image::ImageFormat::Jpeg));
    }

    #[test]
    fn missing_input_dir_reports_no_images() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = LetterboxConfig::new(temp.path().join("absent"), temp.path().join("out"));
        let mut events = Vec::new();
        let report = LetterboxProcessor::new(config)
            .unwrap()
            .run(|e| events.push(e.clone()));

        assert!(report.is_empty());
        assert!(matches!(events.as_slice(), [LetterboxEvent::NoImages { .. }]));
    }
}
