//! Executes a dataset split against a [`DatasetFs`].

use super::fs::{DatasetFs, LocalFs};
use super::{label_name_for, plan_split, Partition, PartitionCounts, SplitRatios};
use crate::core::scanner::{ImageFile, ImageFilter};
use crate::error::{ScanError, SplitError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for a dataset split
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Directory holding all images (not searched recursively)
    pub images_path: PathBuf,
    /// Directory holding `<stem>.txt` label files
    pub labels_path: PathBuf,
    /// Root of the `images/` and `labels/` output trees
    pub output_dir: PathBuf,
    /// Already-validated partition ratios
    pub ratios: SplitRatios,
    /// Shuffle seed (None = OS entropy)
    pub seed: Option<u64>,
}

impl SplitConfig {
    pub fn new(
        images_path: impl Into<PathBuf>,
        labels_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            images_path: images_path.into(),
            labels_path: labels_path.into(),
            output_dir: output_dir.into(),
            ratios: SplitRatios::default(),
            seed: None,
        }
    }

    /// Set the partition ratios
    pub fn ratios(mut self, ratios: SplitRatios) -> Self {
        self.ratios = ratios;
        self
    }

    /// Make the shuffle reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// `<output>/images/<partition>`
    pub fn image_output_dir(&self, partition: Partition) -> PathBuf {
        self.output_dir.join("images").join(partition.dir_name())
    }

    /// `<output>/labels/<partition>`
    pub fn label_output_dir(&self, partition: Partition) -> PathBuf {
        self.output_dir.join("labels").join(partition.dir_name())
    }
}

/// Progress events emitted while splitting
#[derive(Debug, Clone, PartialEq)]
pub enum SplitEvent {
    /// The image directory is missing or has no images
    NoImages { dir: PathBuf },
    /// Images were listed and shuffled
    Started { total: usize, ratios: SplitRatios },
    /// An image had no label file at the expected path
    MissingLabel { image: String },
    /// All files for a partition were copied
    PartitionCopied { partition: Partition, count: usize },
}

/// Result of a completed split
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitSummary {
    /// Number of images discovered
    pub total: usize,
    /// Images copied per partition
    pub counts: PartitionCounts,
    /// Images whose label file was missing
    pub missing_labels: Vec<String>,
}

/// Splits an image + label corpus into train / val / test
pub struct DatasetSplitter {
    config: SplitConfig,
}

impl DatasetSplitter {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Run against the real file system, seeding from the config
    pub fn run<F>(&self, on_event: F) -> Result<SplitSummary, SplitError>
    where
        F: FnMut(&SplitEvent),
    {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with(&LocalFs, &mut rng, on_event)
    }

    /// Run with an explicit file system and random source
    pub fn run_with<D, R, F>(
        &self,
        fs: &D,
        rng: &mut R,
        mut on_event: F,
    ) -> Result<SplitSummary, SplitError>
    where
        D: DatasetFs + ?Sized,
        R: Rng + ?Sized,
        F: FnMut(&SplitEvent),
    {
        self.create_output_dirs(fs)?;

        let images = match fs.list_images(&self.config.images_path, &ImageFilter::dataset()) {
            Ok(images) => images,
            Err(ScanError::DirectoryNotFound { path }) => {
                warn!(dir = %path.display(), "image directory not found");
                Vec::new()
            }
            Err(ScanError::ReadDirectory { path, source }) => {
                warn!(dir = %path.display(), error = %source, "could not list image directory");
                Vec::new()
            }
        };

        if images.is_empty() {
            on_event(&SplitEvent::NoImages {
                dir: self.config.images_path.clone(),
            });
            return Ok(SplitSummary::default());
        }

        let total = images.len();
        info!(total, ratios = %self.config.ratios, "splitting dataset");
        on_event(&SplitEvent::Started {
            total,
            ratios: self.config.ratios,
        });

        let plan = plan_split(images, &self.config.ratios, rng);
        let mut missing_labels = Vec::new();

        for partition in Partition::ALL {
            let files = plan.get(partition);
            for image in files {
                if !self.copy_pair(fs, image, partition)? {
                    warn!(image = %image.file_name, "label file not found");
                    on_event(&SplitEvent::MissingLabel {
                        image: image.file_name.clone(),
                    });
                    missing_labels.push(image.file_name.clone());
                }
            }
            on_event(&SplitEvent::PartitionCopied {
                partition,
                count: files.len(),
            });
        }

        Ok(SplitSummary {
            total,
            counts: plan.counts(),
            missing_labels,
        })
    }

    fn create_output_dirs<D: DatasetFs + ?Sized>(&self, fs: &D) -> Result<(), SplitError> {
        for partition in Partition::ALL {
            for dir in [
                self.config.image_output_dir(partition),
                self.config.label_output_dir(partition),
            ] {
                fs.create_dir_all(&dir)
                    .map_err(|source| SplitError::CreateDir { path: dir, source })?;
            }
        }
        Ok(())
    }

    /// Copy an image and, if present, its label. Returns whether the label
    /// existed.
    fn copy_pair<D: DatasetFs + ?Sized>(
        &self,
        fs: &D,
        image: &ImageFile,
        partition: Partition,
    ) -> Result<bool, SplitError> {
        let image_dest = self
            .config
            .image_output_dir(partition)
            .join(image.path.file_name().unwrap_or(OsStr::new(&image.file_name)));
        copy(fs, &image.path, &image_dest)?;
        debug!(image = %image.file_name, %partition, "copied image");

        let label_name = label_name_for(&image.file_name);
        let label_src = self.config.labels_path.join(&label_name);
        if !fs.exists(&label_src) {
            return Ok(false);
        }

        let label_dest = self.config.label_output_dir(partition).join(&label_name);
        copy(fs, &label_src, &label_dest)?;
        Ok(true)
    }
}

fn copy<D: DatasetFs + ?Sized>(fs: &D, from: &Path, to: &Path) -> Result<(), SplitError> {
    fs.copy(from, to).map_err(|source| SplitError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}
