//! Error types for resampling operations.
//!
//! ## Purpose
//!
//! This module defines `ResampleError`, the single error type returned by
//! every fallible operation in the crate, from parameter validation down to
//! table I/O.
//!
//! ## Design notes
//!
//! * **Local**: Every variant describes a recoverable condition for one table.
//!   Batch callers skip the offending table and continue.
//! * **Descriptive**: Messages name the offending parameter, feature or label.
//!
//! ## Key concepts
//!
//! * **InvalidInput**: Malformed parameters (zero neighbors, non-finite query,
//!   non-positive step) or malformed rows.
//! * **InsufficientData**: Fewer time columns than the bandwidth rank requires.
//! * **EmptyInput**: Nothing numeric survived cleaning.

// External dependencies
use thiserror::Error;

/// Result alias used throughout the crate.
pub type ResampleResult<T> = Result<T, ResampleError>;

/// Errors produced while validating, resampling, reading or writing tables.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// No usable time columns (or no features) remain.
    #[error("Input table has no usable time columns")]
    EmptyInput,

    /// A parameter or input row is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few time columns to select the requested bandwidth rank.
    #[error("Insufficient data: got {got} time columns, need at least {min}")]
    InsufficientData {
        /// Number of time columns available.
        got: usize,
        /// Minimum number required.
        min: usize,
    },

    /// A column does not carry one value per feature.
    #[error("Length mismatch: expected {expected} values per column, got {got}")]
    MismatchedInputs {
        /// Number of features in the table.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// A missing or non-finite value reached the numeric table.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A builder parameter was configured more than once.
    #[error("Parameter '{parameter}' was set multiple times")]
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parsing or writing failure.
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
}
