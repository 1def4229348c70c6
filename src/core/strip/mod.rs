//! # Strip Module
//!
//! Mirrors a directory tree, re-encoding each image from its raw pixels so
//! that no metadata block reaches the output.
//!
//! Nothing is deleted selectively: the decoded pixel buffer is moved into a
//! brand-new image of the same color type and dimensions, and that image is
//! saved. The new container never received any metadata.

use crate::core::decode::open_image;
use crate::core::metadata::{read_exif, ExifTags};
use crate::core::report::BatchReport;
use crate::core::scanner::{walk_tree, ImageFilter, TreeEntry};
use crate::error::{MetadataError, ProcessError, ScanError, StripError};
use image::{DynamicImage, ImageBuffer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for a strip run
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// Root of the tree to read; must exist
    pub input_dir: PathBuf,
    /// Root of the mirrored output tree; created if absent
    pub output_dir: PathBuf,
    /// Read and report metadata before and after each file
    pub verbose: bool,
}

impl StripConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Progress events emitted while stripping
#[derive(Debug)]
pub enum StripEvent<'a> {
    /// The output root exists and the walk is starting
    Started { input: &'a Path, output: &'a Path },
    /// About to process a file (verbose only)
    Processing { path: &'a Path },
    /// Metadata read before stripping; only emitted when the read succeeded
    MetadataBefore { tags: &'a ExifTags },
    /// Metadata read back from the written file
    MetadataAfter {
        tags: &'a Result<ExifTags, MetadataError>,
    },
    /// A file was stripped and saved
    Stripped { file_name: &'a str },
    /// A file could not be stripped; the walk continues
    Failed { file_name: &'a str, error: &'a ProcessError },
}

/// Move the pixels of `image` into a freshly allocated image of the same
/// color type.
pub fn rebuild_without_metadata(image: DynamicImage) -> Result<DynamicImage, ProcessError> {
    let (width, height) = (image.width(), image.height());
    let mismatch = || ProcessError::InvalidDimensions {
        reason: format!("pixel buffer does not match {}x{}", width, height),
    };

    let rebuilt = match image {
        DynamicImage::ImageLuma8(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageLuma8)
        }
        DynamicImage::ImageLumaA8(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageLumaA8)
        }
        DynamicImage::ImageRgb8(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageRgb8)
        }
        DynamicImage::ImageRgba8(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageRgba8)
        }
        DynamicImage::ImageLuma16(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageLuma16)
        }
        DynamicImage::ImageLumaA16(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageLumaA16)
        }
        DynamicImage::ImageRgb16(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageRgb16)
        }
        DynamicImage::ImageRgba16(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageRgba16)
        }
        DynamicImage::ImageRgb32F(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageRgb32F)
        }
        DynamicImage::ImageRgba32F(buf) => {
            ImageBuffer::from_raw(width, height, buf.into_raw()).map(DynamicImage::ImageRgba32F)
        }
        other => ImageBuffer::from_raw(width, height, other.into_rgba8().into_raw())
            .map(DynamicImage::ImageRgba8),
    };

    rebuilt.ok_or_else(mismatch)
}

/// Decode `input`, rebuild it from raw pixels and save it to `output`
pub fn strip_file(input: &Path, output: &Path) -> Result<(), ProcessError> {
    let decoded = open_image(input)?;
    let clean = rebuild_without_metadata(decoded)?;
    clean
        .save(output)
        .map_err(|e| ProcessError::encode(output, e))
}

/// Strips metadata from every image under a directory tree
pub struct ExifStripper {
    config: StripConfig,
    filter: ImageFilter,
}

impl ExifStripper {
    pub fn new(config: StripConfig) -> Self {
        Self {
            config,
            filter: ImageFilter::strip(),
        }
    }

    /// Walk the input tree and strip each qualifying image.
    ///
    /// Fails only when the input root is missing or the output root cannot
    /// be created. Every per-file problem lands in the returned report.
    pub fn run<F>(&self, mut on_event: F) -> Result<BatchReport<PathBuf>, StripError>
    where
        F: FnMut(StripEvent<'_>),
    {
        let input = self.config.input_dir.as_path();
        let output = self.config.output_dir.as_path();

        if !input.is_dir() {
            return Err(StripError::InputNotFound {
                path: input.to_path_buf(),
            });
        }

        fs::create_dir_all(output).map_err(|source| StripError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;

        info!(input = %input.display(), output = %output.display(), "stripping metadata");
        on_event(StripEvent::Started { input, output });

        let mut report = BatchReport::new();

        for entry in walk_tree(input) {
            match entry {
                Ok(TreeEntry::Directory { relative }) => {
                    let mirrored = output.join(&relative);
                    if let Err(e) = fs::create_dir_all(&mirrored) {
                        warn!(dir = %mirrored.display(), error = %e, "could not mirror directory");
                    }
                }
                Ok(TreeEntry::File { path, relative }) => {
                    if !self.filter.should_include(&path) {
                        continue;
                    }
                    let target = output.join(&relative);
                    let result = self.process_file(&path, &target, &mut on_event);
                    report.record(&path, result.map(|()| target));
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    let (path, source) = match e {
                        ScanError::ReadDirectory { path, source } => (path, source),
                        ScanError::DirectoryNotFound { path } => {
                            (path, std::io::Error::from(std::io::ErrorKind::NotFound))
                        }
                    };
                    let error = ProcessError::Io {
                        path: path.clone(),
                        source,
                    };
                    on_event(StripEvent::Failed {
                        file_name: &display_name(&path),
                        error: &error,
                    });
                    report.record(path, Err::<PathBuf, _>(error));
                }
            }
        }

        Ok(report)
    }

    fn process_file<F>(&self, path: &Path, target: &Path, on_event: &mut F) -> Result<(), ProcessError>
    where
        F: FnMut(StripEvent<'_>),
    {
        let file_name = display_name(path);

        if self.config.verbose {
            on_event(StripEvent::Processing { path });
            match read_exif(path) {
                Ok(tags) => on_event(StripEvent::MetadataBefore { tags: &tags }),
                Err(e) => debug!(file = %file_name, error = %e, "metadata not readable"),
            }
        }

        match strip_file(path, target) {
            Ok(()) => {
                debug!(file = %file_name, "stripped");
                on_event(StripEvent::Stripped {
                    file_name: &file_name,
                });
                if self.config.verbose {
                    let after = read_exif(target);
                    on_event(StripEvent::MetadataAfter { tags: &after });
                }
                Ok(())
            }
            Err(error) => {
                warn!(file = %file_name, error = %error, "failed to strip");
                on_event(StripEvent::Failed {
                    file_name: &file_name,
                    error: &error,
                });
                Err(error)
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn rebuild_keeps_color_type_and_pixels() {
        let rgba = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8, y as u8, 7, 200]));
        let rebuilt = rebuild_without_metadata(DynamicImage::ImageRgba8(rgba.clone())).unwrap();
        assert_eq!(rebuilt.color(), image::ColorType::Rgba8);
        assert_eq!(rebuilt.to_rgba8(), rgba);

        let gray = GrayImage::from_pixel(2, 2, Luma([9]));
        let rebuilt = rebuild_without_metadata(DynamicImage::ImageLuma8(gray.clone())).unwrap();
        assert_eq!(rebuilt.color(), image::ColorType::L8);
        assert_eq!(rebuilt.to_luma8(), gray);
    }

    #[test]
    fn strip_file_round_trips_png_pixels() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("in.png");
        let output = temp.path().join("out.png");
        let original = RgbImage::from_fn(8, 5, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 99]));
        original.save(&input).unwrap();

        strip_file(&input, &output).unwrap();

        let decoded = image::open(&output).unwrap().to_rgb8();
        assert_eq!(decoded, original);
    }

    #[test]
    fn strip_file_accepts_png_named_jpg() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("photo.jpg");
        let output = temp.path().join("clean.jpg");
        let mut png = Vec::new();
        RgbImage::from_pixel(8, 6, Rgb([10, 20, 30]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(&input, png).unwrap();

        strip_file(&input, &output).unwrap();

        let reader = image::ImageReader::open(&output)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(image::ImageFormat::Jpeg));
        assert_eq!(reader.decode().unwrap().width(), 8);
    }

    #[test]
    fn strip_file_reports_decode_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("broken.jpg");
        std::fs::write(&input, b"this is not a valid image file").unwrap();

        let err = strip_file(&input, &temp.path().join("out.jpg")).unwrap_err();
        assert!(matches!(err, ProcessError::Decode { .. }));
    }

    #[test]
    fn missing_input_is_fatal() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = StripConfig::new(temp.path().join("absent"), temp.path().join("out"));
        let err = ExifStripper::new(config).run(|_| {}).unwrap_err();

        assert!(matches!(err, StripError::InputNotFound { .. }));
        assert!(!temp.path().join("out").exists());
    }
}
