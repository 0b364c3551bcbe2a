//! Directory adapter for batch resampling of table files.
//!
//! ## Purpose
//!
//! This module resamples every tab-separated table in an input directory and
//! writes each result under the same file name in an output directory. A
//! table that cannot be resampled is skipped with a diagnostic; the rest of
//! the batch continues.
//!
//! ## Design notes
//!
//! * **Deterministic**: Files are processed in file-name order.
//! * **Skip, don't abort**: Per-file failures become `Skipped` outcomes.
//!   Only a missing or unreadable input directory fails the whole run.
//!
//! ## Non-goals
//!
//! * This adapter does not recurse into subdirectories.

// External dependencies
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// Internal dependencies
use crate::adapters::batch::{BatchResampler, BatchResamplerBuilder};
use crate::io::tsv::{read_tsv, write_tsv};
use crate::primitives::errors::{ResampleError, ResampleResult};

// ============================================================================
// Report
// ============================================================================

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Resampled table written to `output`.
    Written {
        /// Output path.
        output: PathBuf,
        /// Number of grid points in the output.
        grid_points: usize,
        /// Grid points produced by the estimator.
        estimated: usize,
        /// Input columns dropped while cleaning.
        dropped: Vec<String>,
    },
    /// Table skipped.
    Skipped {
        /// Why the table was skipped.
        reason: String,
    },
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Input file path.
    pub input: PathBuf,
    /// What happened to it.
    pub outcome: FileOutcome,
}

/// Outcomes for a whole directory run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Per-file outcomes in processing order.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Number of files written.
    pub fn written_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Written { .. }))
            .count()
    }

    /// Number of files skipped.
    pub fn skipped_count(&self) -> usize {
        self.files.len() - self.written_count()
    }
}

// ============================================================================
// Directory Resampler Builder
// ============================================================================

/// Builder for the directory resampler.
#[derive(Debug, Clone)]
pub struct DirectoryResamplerBuilder {
    /// Resampling parameters shared with the batch adapter.
    pub batch: BatchResamplerBuilder<f64>,

    /// File extension of input tables (without the dot).
    pub extension: String,
}

impl Default for DirectoryResamplerBuilder {
    fn default() -> Self {
        Self {
            batch: BatchResamplerBuilder::default(),
            extension: "tsv".to_string(),
        }
    }
}

impl DirectoryResamplerBuilder {
    /// Set the file extension of input tables.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Build the directory resampler.
    pub fn build(self) -> Result<DirectoryResampler, ResampleError> {
        Ok(DirectoryResampler {
            resampler: self.batch.build()?,
            extension: self.extension,
        })
    }
}

// ============================================================================
// Directory Resampler
// ============================================================================

/// Resamples every table file in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryResampler {
    resampler: BatchResampler<f64>,
    extension: String,
}

impl DirectoryResampler {
    /// Resample every matching file in `input_dir` into `output_dir`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> ResampleResult<BatchReport> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && self.matches_extension(path))
            .collect();
        inputs.sort();

        if inputs.is_empty() {
            warn!(dir = %input_dir.display(), extension = %self.extension, "no input tables found");
        }
        fs::create_dir_all(output_dir)?;

        let mut report = BatchReport::default();
        for input in inputs {
            let outcome = match self.process_file(&input, output_dir) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(file = %input.display(), error = %err, "skipping table");
                    FileOutcome::Skipped {
                        reason: err.to_string(),
                    }
                }
            };
            report.files.push(FileReport { input, outcome });
        }

        info!(
            written = report.written_count(),
            skipped = report.skipped_count(),
            "batch finished"
        );
        Ok(report)
    }

    /// Resample one file into `output_dir`.
    pub fn process_file(&self, input: &Path, output_dir: &Path) -> ResampleResult<FileOutcome> {
        let labeled = read_tsv(input)?;
        let result = self.resampler.regularize_labeled(&labeled)?;

        let file_name = input.file_name().ok_or_else(|| {
            ResampleError::InvalidInput(format!("'{}' has no file name", input.display()))
        })?;
        let output = output_dir.join(file_name);
        write_tsv(&output, &result.table, &labeled.index_name)?;

        info!(
            file = %input.display(),
            grid_points = result.grid.len(),
            estimated = result.estimated_count(),
            "wrote resampled table"
        );

        Ok(FileOutcome::Written {
            output,
            grid_points: result.grid.len(),
            estimated: result.estimated_count(),
            dropped: result
                .cleaning
                .map(|report| report.dropped())
                .unwrap_or_default(),
        })
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}
