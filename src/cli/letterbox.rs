//! `letterbox-resize`: resize all images in a directory using the
//! letterbox method.

use super::{line, progress_bar};
use crate::core::letterbox::{LetterboxConfig, LetterboxEvent, LetterboxProcessor, DEFAULT_TARGET};
use crate::error::Result;
use clap::Parser;
use console::{style, Term};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::process::ExitCode;

/// Resize all images in a directory using the letterbox method.
#[derive(Parser, Debug)]
#[command(name = "letterbox-resize")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the directory containing input images
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Path to the directory to save the resized images
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Target width for the output images
    #[arg(long, default_value_t = DEFAULT_TARGET, value_parser = clap::value_parser!(u32).range(1..))]
    pub target_width: u32,

    /// Target height for the output images
    #[arg(long, default_value_t = DEFAULT_TARGET, value_parser = clap::value_parser!(u32).range(1..))]
    pub target_height: u32,
}

/// Run the CLI. Per-file failures are printed and never change the exit
/// code.
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
    let config = LetterboxConfig::new(&args.input_dir, &args.output_dir)
        .target(args.target_width, args.target_height);
    let mut processor = LetterboxProcessor::new(config)?;

    let mut pb = ProgressBar::hidden();
    let report = processor.run(|event| match event {
        LetterboxEvent::NoImages { dir } => {
            term.write_line(&format!("No image files found in '{}'.", dir.display()))
                .ok();
        }
        LetterboxEvent::Started { total } => {
            term.write_line(&format!("Found {} images to process.", style(total).cyan()))
                .ok();
            pb = progress_bar(*total as u64);
        }
        LetterboxEvent::Resized { file_name, output } => {
            line(
                &pb,
                term,
                &format!("Resized '{}' and saved to '{}'", file_name, output.display()),
            );
            pb.inc(1);
        }
        LetterboxEvent::Failed { file_name, message } => {
            line(
                &pb,
                term,
                &format!(
                    "{} {}: {}",
                    style("Error processing").red(),
                    file_name,
                    message
                ),
            );
            pb.inc(1);
        }
    });
    pb.finish_and_clear();

    if !report.is_empty() {
        term.write_line(&format!(
            "{} {} resized, {} failed",
            style("✓").green().bold(),
            style(report.succeeded.len()).cyan(),
            style(report.failed.len()).yellow()
        ))
        .ok();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn target_defaults_to_640() {
        let args =
            Args::try_parse_from(["letterbox-resize", "--input-dir", "in", "--output-dir", "out"])
                .unwrap();
        assert_eq!((args.target_width, args.target_height), (640, 640));
    }

    #[test]
    fn zero_target_is_rejected_by_parser() {
        let result = Args::try_parse_from([
            "letterbox-resize",
            "--input-dir",
            "in",
            "--output-dir",
            "out",
            "--target-width",
            "0",
        ]);
        assert!(result.is_err());
    }
}
