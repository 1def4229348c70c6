//! `strip-exif`: recursively strip EXIF data from images in a directory.

use super::{line, spinner};
use crate::core::metadata::ExifTags;
use crate::core::strip::{ExifStripper, StripConfig, StripEvent};
use crate::error::Result;
use clap::Parser;
use console::{style, Term};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::process::ExitCode;

/// Recursively strips EXIF data from images in a directory and saves them
/// to an output directory.
#[derive(Parser, Debug)]
#[command(name = "strip-exif")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The path to the input directory containing images to process
    pub input_dir: PathBuf,

    /// The path to the output directory where EXIF-stripped images will be
    /// saved. The directory structure is replicated.
    pub output_dir: PathBuf,

    /// Display EXIF data before and after stripping for each image
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI. Exits with 1 only when the input directory is missing.
pub fn run() -> ExitCode {
    crate::init_tracing();
    let args = Args::parse();
    let term = Term::stdout();

    match execute(&args, &term) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            super::error(&term, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

pub fn execute(args: &Args, term: &Term) -> Result<()> {
    let config = StripConfig::new(&args.input_dir, &args.output_dir).verbose(args.verbose);

    // Verbose output is multi-line per file; the spinner would only flicker
    let pb = if args.verbose {
        ProgressBar::hidden()
    } else {
        spinner()
    };

    let report = ExifStripper::new(config).run(|event| match event {
        StripEvent::Started { input, output } => {
            line(
                &pb,
                term,
                &format!(
                    "Processing images from '{}' and saving to '{}'...",
                    input.display(),
                    output.display()
                ),
            );
        }
        StripEvent::Processing { path } => {
            line(&pb, term, &format!("\nProcessing '{}'...", path.display()));
        }
        StripEvent::MetadataBefore { tags } => {
            print_tags(&pb, term, tags, "EXIF Data Before Stripping");
        }
        StripEvent::MetadataAfter { tags } => {
            let empty = ExifTags::default();
            let tags = tags.as_ref().unwrap_or(&empty);
            print_tags(&pb, term, tags, "EXIF Data After Stripping");
        }
        StripEvent::Stripped { file_name } => {
            line(
                &pb,
                term,
                &format!("Successfully stripped and saved '{}'.", file_name),
            );
            pb.inc(1);
        }
        StripEvent::Failed { file_name, error } => {
            line(
                &pb,
                term,
                &format!(
                    "{} {}",
                    style(format!("Failed to process '{}'.", file_name)).red(),
                    style(error).dim()
                ),
            );
            pb.inc(1);
        }
    });
    pb.finish_and_clear();

    let report = report?;

    term.write_line(&format!(
        "{} {} stripped, {} failed",
        style("✓").green().bold(),
        style(report.succeeded.len()).cyan(),
        style(report.failed.len()).yellow()
    ))
    .ok();

    Ok(())
}

fn print_tags(pb: &ProgressBar, term: &Term, tags: &ExifTags, title: &str) {
    line(pb, term, &format!("\n--- {} ---", style(title).bold()));
    if tags.is_empty() {
        line(pb, term, "No EXIF data found.");
        return;
    }
    for entry in tags.iter() {
        line(pb, term, &format!("  {}: {}", entry.name, entry.value));
    }
}
