//! Per-file outcomes collected into a batch report.
//!
//! Each file is an independent unit of work: it either succeeds with an
//! outcome or fails with a [`FileFailure`]. A failure never stops the batch.

use crate::error::ProcessError;
use std::path::PathBuf;

/// A file that could not be processed
#[derive(Debug)]
pub struct FileFailure {
    /// The input file
    pub path: PathBuf,
    /// Underlying cause
    pub error: ProcessError,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: ProcessError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// File name for display, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Outcome of processing a batch of files
#[derive(Debug)]
pub struct BatchReport<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<FileFailure>,
}

impl<T> BatchReport<T> {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Record the result for one file
    pub fn record(&mut self, path: impl Into<PathBuf>, result: Result<T, ProcessError>) {
        match result {
            Ok(outcome) => self.succeeded.push(outcome),
            Err(error) => self.failed.push(FileFailure::new(path, error)),
        }
    }

    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self::new()
    }
}
