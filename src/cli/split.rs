//! `split-dataset`: split an image dataset and its labels for YOLO training.

use super::{error, warning};
use crate::core::split::{DatasetSplitter, SplitConfig, SplitEvent, SplitRatios};
use crate::error::Result;
use clap::Parser;
use console::{style, Term};
use std::path::PathBuf;
use std::process::ExitCode;

/// Splits an image dataset for YOLO training.
#[derive(Parser, Debug)]
#[command(name = "split-dataset")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the directory containing all images
    #[arg(long)]
    pub images_path: PathBuf,

    /// Path to the directory containing all label files
    #[arg(long)]
    pub labels_path: PathBuf,

    /// Path for the output directory to store the split dataset
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Ratio for the training set. The three ratios must sum to 1.0; sums
    /// within 1e-9 of 1.0 are accepted so that e.g. 0.7/0.2/0.1 is valid.
    #[arg(long, default_value_t = 0.8)]
    pub train_ratio: f64,

    /// Ratio for the validation set
    #[arg(long, default_value_t = 0.1)]
    pub val_ratio: f64,

    /// Ratio for the test set
    #[arg(long, default_value_t = 0.1)]
    pub test_ratio: f64,

    /// Seed for a reproducible shuffle (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run the CLI
pub fn run() -> ExitCode {
    crate::init_tracing();
    let args = Args::parse();
    let term = Term::stdout();

    match execute(&args, &term) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error(&term, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Validate the ratios, then split
pub fn execute(args: &Args, term: &Term) -> Result<()> {
    let ratios = SplitRatios::new(args.train_ratio, args.val_ratio, args.test_ratio)?;

    let mut config = SplitConfig::new(&args.images_path, &args.labels_path, &args.output_dir)
        .ratios(ratios);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let summary = DatasetSplitter::new(config).run(|event| match event {
        SplitEvent::NoImages { dir } => {
            term.write_line(&format!("No image files found in '{}'.", dir.display()))
                .ok();
        }
        SplitEvent::Started { total, ratios } => {
            term.write_line(&format!(
                "Splitting {} images with ratios: {}",
                style(total).cyan(),
                ratios
            ))
            .ok();
        }
        SplitEvent::MissingLabel { image } => {
            warning(term, &format!("Label file for {} not found.", image));
        }
        SplitEvent::PartitionCopied { partition, count } => {
            term.write_line(&format!(
                "Copied {} files to the {} set.",
                style(count).cyan(),
                partition
            ))
            .ok();
        }
    })?;

    if !summary.missing_labels.is_empty() {
        term.write_line(&format!(
            "{}",
            style(format!(
                "{} of {} images had no label file.",
                summary.missing_labels.len(),
                summary.total
            ))
            .dim()
        ))
        .ok();
    }

    Ok(())
}
