//! High-level API for kernel resampling.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring resampling parameters and choosing an
//! execution adapter (Batch or Directory).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ResamplerBuilder`] via `Resampler::new()`.
//! 2. Chain configuration methods (`.step()`, `.neighbors()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchResamplerBuilder;
use crate::adapters::directory::DirectoryResamplerBuilder;
use crate::engine::executor::EstimatePassFn;

// Publicly re-exported types
pub use crate::adapters::batch::BatchResampler;
pub use crate::adapters::directory::{BatchReport, DirectoryResampler, FileOutcome, FileReport};
pub use crate::algorithms::types::{EstimateKind, KernelEstimate, ZeroWeightFallback};
pub use crate::engine::cleaner::{Cleaned, CleaningReport, MissingValues};
pub use crate::engine::executor::{PointSource, Regularized};
pub use crate::engine::grid::RegularGrid;
pub use crate::math::kernel::WeightFunction;
pub use crate::primitives::errors::ResampleError;
pub use crate::primitives::table::{LabeledTable, ObservationTable};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Directory};
}

/// Fluent builder for configuring resampling parameters and execution modes.
#[derive(Debug, Clone)]
pub struct ResamplerBuilder<T: Float + Debug + Send + Sync> {
    /// Grid spacing (default 7.0).
    pub step: Option<T>,

    /// Bandwidth rank K (default 5).
    pub neighbors: Option<usize>,

    /// Exact-match tolerance.
    pub tolerance: Option<T>,

    /// Kernel weight function (default Epanechnikov).
    pub weight_function: Option<WeightFunction>,

    /// Behavior when every kernel weight is zero (default: ReturnZero).
    pub zero_weight_fallback: Option<ZeroWeightFallback>,

    /// Missing-cell policy for labeled tables (default: Reject).
    pub missing_values: Option<MissingValues<T>>,

    /// Grid size cap.
    pub max_grid_points: Option<usize>,

    /// Parallel grid evaluation.
    pub parallel: Option<bool>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom estimate pass function.
    #[doc(hidden)]
    pub custom_estimate_pass: Option<EstimatePassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + Debug + Send + Sync> Default for ResamplerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Debug + Send + Sync> ResamplerBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: ResampleAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            step: None,
            neighbors: None,
            tolerance: None,
            weight_function: None,
            zero_weight_fallback: None,
            missing_values: None,
            max_grid_points: None,
            parallel: None,
            custom_estimate_pass: None,
            duplicate_param: None,
        }
    }

    /// Set the grid spacing.
    pub fn step(mut self, step: T) -> Self {
        if self.step.is_some() {
            self.duplicate_param = Some("step");
        }
        self.step = Some(step);
        self
    }

    /// Set the bandwidth rank K: the window half-width is the distance to
    /// the K-th nearest column beyond the closest one.
    pub fn neighbors(mut self, k: usize) -> Self {
        if self.neighbors.is_some() {
            self.duplicate_param = Some("neighbors");
        }
        self.neighbors = Some(k);
        self
    }

    /// Set the tolerance for reusing an observed column at a grid point.
    pub fn tolerance(mut self, tol: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tol);
        self
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        if self.weight_function.is_some() {
            self.duplicate_param = Some("weight_function");
        }
        self.weight_function = Some(wf);
        self
    }

    /// Set behavior for windows where every weight is zero.
    pub fn zero_weight_fallback(mut self, policy: ZeroWeightFallback) -> Self {
        if self.zero_weight_fallback.is_some() {
            self.duplicate_param = Some("zero_weight_fallback");
        }
        self.zero_weight_fallback = Some(policy);
        self
    }

    /// Set the missing-cell policy for labeled tables.
    pub fn missing_values(mut self, policy: MissingValues<T>) -> Self {
        if self.missing_values.is_some() {
            self.duplicate_param = Some("missing_values");
        }
        self.missing_values = Some(policy);
        self
    }

    /// Set the grid size cap.
    pub fn max_grid_points(mut self, max: usize) -> Self {
        if self.max_grid_points.is_some() {
            self.duplicate_param = Some("max_grid_points");
        }
        self.max_grid_points = Some(max);
        self
    }

    /// Enable or disable parallel grid evaluation.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set a custom estimate pass function.
    #[doc(hidden)]
    pub fn custom_estimate_pass(mut self, pass: EstimatePassFn<T>) -> Self {
        self.custom_estimate_pass = Some(pass);
        self
    }

    /// Copy user-provided values onto an adapter's batch builder.
    fn apply(self, result: &mut BatchResamplerBuilder<T>) {
        if let Some(step) = self.step {
            result.step = step;
        }
        if let Some(k) = self.neighbors {
            result.neighbors = k;
        }
        if let Some(tol) = self.tolerance {
            result.tolerance = Some(tol);
        }
        if let Some(wf) = self.weight_function {
            result.weight_function = wf;
        }
        if let Some(zwf) = self.zero_weight_fallback {
            result.zero_weight_fallback = zwf;
        }
        if let Some(mv) = self.missing_values {
            result.missing_values = mv;
        }
        if let Some(max) = self.max_grid_points {
            result.max_grid_points = max;
        }
        if let Some(p) = self.parallel {
            result.parallel = p;
        }

        // ++++++++++++++++++++++++++++++++++++++
        // +               DEV                  +
        // ++++++++++++++++++++++++++++++++++++++

        if let Some(pass) = self.custom_estimate_pass {
            result.custom_estimate_pass = Some(pass);
        }
        result.duplicate_param = self.duplicate_param;
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait ResampleAdapter<T: Float + Debug + Send + Sync> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`ResamplerBuilder`] into a specialized execution builder.
    fn convert(builder: ResamplerBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float + Debug + Send + Sync> ResampleAdapter<T> for Batch {
    type Output = BatchResamplerBuilder<T>;

    fn convert(builder: ResamplerBuilder<T>) -> Self::Output {
        let mut result = BatchResamplerBuilder::default();
        builder.apply(&mut result);
        result
    }
}

/// Marker for processing a directory of table files.
#[derive(Debug, Clone, Copy)]
pub struct Directory;

impl ResampleAdapter<f64> for Directory {
    type Output = DirectoryResamplerBuilder;

    fn convert(builder: ResamplerBuilder<f64>) -> Self::Output {
        let mut result = DirectoryResamplerBuilder::default();
        builder.apply(&mut result.batch);
        result
    }
}
