//! # resample-rs: kernel resampling of irregular time series
//!
//! Resamples a multivariate time series observed at irregular time points
//! onto a regular grid. Every grid point that coincides with an observation
//! copies it; every other grid point is estimated by a local
//! kernel-weighted average of the nearby observations.
//!
//! ## How it works
//!
//! For a query time `q` and a neighbor count `K`:
//!
//! 1. Compute the distance `|q - t_j|` to every observed time.
//! 2. The bandwidth `b` is the distance of rank `K` (0-indexed) among them.
//! 3. Every observation inside `[q - b, q + b]` is weighted by the
//!    Epanechnikov kernel `0.75 * (1 - u^2)` with `u = (q - t_j) / b`.
//! 4. The estimate is the weighted average of those observations, computed
//!    for all features at once.
//!
//! A query that sits exactly on an observed time returns that observation.
//! A window whose weights are all zero follows the `ZeroWeightFallback`
//! policy (zeros by default).
//!
//! ## Quick Start
//!
//! ```rust
//! use resample_rs::prelude::*;
//!
//! let table: ObservationTable<f64> = ObservationTable::from_rows(
//!     vec!["A".to_string(), "B".to_string()],
//!     vec![0.0, 3.0, 8.0, 15.0],
//!     vec![vec![10.0, 15.0, 30.0, 50.0], vec![100.0, 80.0, 40.0, 20.0]],
//! )?;
//!
//! let model = Resampler::new()
//!     .step(7.0)
//!     .neighbors(2)
//!     .adapter(Batch)
//!     .build()?;
//!
//! // Single query
//! let at_five = model.estimate(&table, 5.0)?;
//! assert!((at_five[0] - 23.85 / 1.11).abs() < 1e-9);
//!
//! // Whole table onto the grid [0, 7, 14, 21]
//! let result = model.regularize(&table)?;
//! assert_eq!(result.table.times(), &[0.0, 7.0, 14.0, 21.0]);
//! assert_eq!(result.observed_count(), 1);
//! # Result::<(), ResampleError>::Ok(())
//! ```
//!
//! ### Labeled tables and files
//!
//! Tables read from disk carry string column labels and possibly missing
//! cells. Non-numeric columns are dropped and reported; missing cells
//! follow the `MissingValues` policy.
//!
//! ```rust
//! use resample_rs::prelude::*;
//!
//! let labeled = LabeledTable::new(
//!     "gene",
//!     vec!["g1".to_string()],
//!     vec!["0".to_string(), "notanumber".to_string(), "14".to_string()],
//!     vec![vec![Some(1.0), Some(5.0), Some(3.0)]],
//! )?;
//!
//! let model = Resampler::new()
//!     .neighbors(1)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.regularize_labeled(&labeled)?;
//! assert_eq!(result.table.times(), &[0.0, 7.0, 14.0]);
//! assert_eq!(result.cleaning.unwrap().non_numeric, vec!["notanumber"]);
//! # Result::<(), ResampleError>::Ok(())
//! ```
//!
//! Whole folders of tab-separated tables go through the `Directory`
//! adapter:
//!
//! ```rust,no_run
//! use resample_rs::prelude::*;
//!
//! let report = Resampler::new()
//!     .step(7.0)
//!     .neighbors(5)
//!     .adapter(Directory)
//!     .build()?
//!     .run("data/raw", "data/regular")?;
//!
//! for file in &report.files {
//!     if let FileOutcome::Skipped { reason } = &file.outcome {
//!         eprintln!("{}: {}", file.input.display(), reason);
//!     }
//! }
//! # Result::<(), ResampleError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter              | Default        | Meaning                                        |
//! |------------------------|----------------|------------------------------------------------|
//! | `step`                 | `7.0`          | Grid spacing                                   |
//! | `neighbors`            | `5`            | Bandwidth rank K                               |
//! | `tolerance`            | scaled epsilon | Distance at which a grid point reuses a column |
//! | `weight_function`      | `Epanechnikov` | Kernel                                         |
//! | `zero_weight_fallback` | `ReturnZero`   | Result when every weight is zero               |
//! | `missing_values`       | `Reject`       | Missing-cell policy for labeled tables         |
//! | `max_grid_points`      | `10_000_000`   | Grid size cap                                  |
//! | `parallel`             | feature        | Evaluate grid points on the rayon pool         |
//!
//! ## Feature Flags
//!
//! * `parallel` (default): evaluates grid points in parallel with rayon.

#![warn(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, observation tables, and scratch buffers.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains kernel functions, bandwidth selection, and time matching.
mod math;

// Layer 3: Algorithms - the local kernel estimator.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains validation, column cleaning, grid construction, and the
// executor that regularizes whole tables.
mod engine;

// Layer 5: IO - tab-separated table reading and writing.
mod io;

// Layer 6: Adapters - execution mode adapters.
//
// Contains execution adapters for in-memory tables and directories of
// table files.
mod adapters;

// High-level fluent API.
//
// Provides the `Resampler` builder for configuring and running resampling.
mod api;

// ============================================================================
// Contract Entry Points
// ============================================================================

pub use crate::engine::executor::{estimate, regularize};
pub use crate::io::tsv::{format_time_label, format_value, read_tsv, write_tsv};

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use resample_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Directory},
        BatchReport, BatchResampler, Cleaned, CleaningReport, DirectoryResampler, EstimateKind,
        FileOutcome, FileReport, KernelEstimate, LabeledTable, MissingValues, ObservationTable,
        PointSource, RegularGrid, Regularized, ResampleError, ResamplerBuilder as Resampler,
        WeightFunction, ZeroWeightFallback,
        WeightFunction::{Biweight, Cosine, Epanechnikov, Gaussian, Triangle, Tricube, Uniform},
        ZeroWeightFallback::{ReturnZero, UseWindowMean},
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[doc(hidden)]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal kernel estimator.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal table I/O.
    pub mod io {
        pub use crate::io::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
