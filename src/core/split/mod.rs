//! # Split Module
//!
//! Partitions an image corpus and its paired label files into
//! train / val / test sets.
//!
//! ## How it works
//! 1. Ratios are validated before anything touches the disk
//! 2. Images directly under the image directory are listed
//! 3. The list is shuffled with an injectable RNG and sliced:
//!    `train = floor(n * train_ratio)`, `val = floor(n * val_ratio)`,
//!    test takes the remainder
//! 4. Each image is copied, along with `<stem>.txt` when it exists
//!
//! Planning ([`PartitionCounts`], [`plan_split`], [`label_name_for`]) is
//! pure. All I/O goes through [`DatasetFs`].

mod executor;
mod fs;
#[cfg(test)]
mod memory;

pub use executor::{DatasetSplitter, SplitConfig, SplitEvent, SplitSummary};
pub use fs::{DatasetFs, LocalFs};
#[cfg(test)]
pub(crate) use memory::MemoryFs;

use crate::error::ConfigError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Allowed deviation of the ratio sum from 1.0
pub const RATIO_SUM_TOLERANCE: f64 = 1e-9;

/// Suffix of label files paired with images
pub const LABEL_EXTENSION: &str = "txt";

/// One of the three output subsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Train,
    Val,
    Test,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Val, Partition::Test];

    /// Directory name under `images/` and `labels/`
    pub fn dir_name(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Val => "val",
            Partition::Test => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Partition::Train => "training",
            Partition::Val => "validation",
            Partition::Test => "test",
        };
        write!(f, "{}", name)
    }
}

/// Validated train / val / test proportions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    train: f64,
    val: f64,
    test: f64,
}

impl SplitRatios {
    /// Validate and build ratios. They must each lie in `[0, 1]` and sum to
    /// 1.0.
    pub fn new(train: f64, val: f64, test: f64) -> Result<Self, ConfigError> {
        for (name, value) in [("train", train), ("val", val), ("test", test)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioRange { name, value });
            }
        }

        let sum = train + val + test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(ConfigError::RatioSum {
                train,
                val,
                test,
                sum,
            });
        }

        Ok(Self { train, val, test })
    }

    pub fn train(&self) -> f64 {
        self.train
    }

    pub fn val(&self) -> f64 {
        self.val
    }

    pub fn test(&self) -> f64 {
        self.test
    }
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            val: 0.1,
            test: 0.1,
        }
    }
}

impl fmt::Display for SplitRatios {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.train, self.val, self.test)
    }
}

/// Number of items assigned to each partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartitionCounts {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl PartitionCounts {
    /// Train and val are floored independently; test absorbs the remainder
    /// and may exceed its nominal share by up to two items.
    pub fn for_total(total: usize, ratios: &SplitRatios) -> Self {
        let train = ((total as f64 * ratios.train).floor() as usize).min(total);
        let val = ((total as f64 * ratios.val).floor() as usize).min(total - train);
        Self {
            train,
            val,
            test: total - train - val,
        }
    }

    pub fn get(&self, partition: Partition) -> usize {
        match partition {
            Partition::Train => self.train,
            Partition::Val => self.val,
            Partition::Test => self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }
}

/// Items assigned to each partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan<T> {
    pub train: Vec<T>,
    pub val: Vec<T>,
    pub test: Vec<T>,
}

impl<T> SplitPlan<T> {
    pub fn get(&self, partition: Partition) -> &[T] {
        match partition {
            Partition::Train => &self.train,
            Partition::Val => &self.val,
            Partition::Test => &self.test,
        }
    }

    pub fn counts(&self) -> PartitionCounts {
        PartitionCounts {
            train: self.train.len(),
            val: self.val.len(),
            test: self.test.len(),
        }
    }
}

/// Shuffle `items` with `rng` and slice them into partitions
pub fn plan_split<T, R>(mut items: Vec<T>, ratios: &SplitRatios, rng: &mut R) -> SplitPlan<T>
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);

    let counts = PartitionCounts::for_total(items.len(), ratios);
    let mut val = items.split_off(counts.train);
    let test = val.split_off(counts.val);

    SplitPlan {
        train: items,
        val,
        test,
    }
}

/// Label file name for an image: everything before the last `.` plus `.txt`
pub fn label_name_for(image_name: &str) -> String {
    let stem = image_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(image_name);
    format!("{}.{}", stem, LABEL_EXTENSION)
}
