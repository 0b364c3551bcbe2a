//! Batch adapter for in-memory resampling.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: tables already held in
//! memory are estimated at single query times or regularized onto a grid.
//!
//! ## Design notes
//!
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Validated once**: Parameters are checked in `build()`; per-table
//!   checks happen on each call.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Non-goals
//!
//! * This adapter does not read or write files (use the directory adapter).

// External dependencies
use core::fmt::Debug;
use core::str::FromStr;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::types::{KernelEstimate, KernelOptions, ZeroWeightFallback};
use crate::engine::cleaner::{Cleaned, Cleaner, MissingValues};
use crate::engine::executor::{EstimatePassFn, Regularized, ResampleConfig, ResampleExecutor};
use crate::engine::grid::RegularGrid;
use crate::engine::validator::Validator;
use crate::math::kernel::WeightFunction;
use crate::primitives::errors::ResampleError;
use crate::primitives::table::{LabeledTable, ObservationTable};

// ============================================================================
// Batch Resampler Builder
// ============================================================================

/// Builder for the batch resampler.
#[derive(Debug, Clone)]
pub struct BatchResamplerBuilder<T> {
    /// Grid spacing.
    pub step: T,

    /// Bandwidth rank K.
    pub neighbors: usize,

    /// Exact-match tolerance (derived from the time range when `None`).
    pub tolerance: Option<T>,

    /// Kernel weight function.
    pub weight_function: WeightFunction,

    /// Policy for all-zero kernel weights.
    pub zero_weight_fallback: ZeroWeightFallback,

    /// Policy for missing cells in labeled tables.
    pub missing_values: MissingValues<T>,

    /// Upper bound on the grid length.
    pub max_grid_points: usize,

    /// Evaluate grid points in parallel.
    pub parallel: bool,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom estimate pass function.
    #[doc(hidden)]
    pub custom_estimate_pass: Option<EstimatePassFn<T>>,
}

impl<T: Float + Debug + Send + Sync> Default for BatchResamplerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Debug + Send + Sync> BatchResamplerBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            step: T::from(7.0).unwrap(),
            neighbors: 5,
            tolerance: None,
            weight_function: WeightFunction::default(),
            zero_weight_fallback: ZeroWeightFallback::default(),
            missing_values: MissingValues::default(),
            max_grid_points: ResampleConfig::<T>::DEFAULT_MAX_GRID_POINTS,
            parallel: cfg!(feature = "parallel"),
            duplicate_param: None,
            custom_estimate_pass: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the grid spacing.
    pub fn step(mut self, step: T) -> Self {
        self.step = step;
        self
    }

    /// Set the bandwidth rank K.
    pub fn neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }

    /// Set the exact-match tolerance.
    pub fn tolerance(mut self, tol: T) -> Self {
        self.tolerance = Some(tol);
        self
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        self.weight_function = wf;
        self
    }

    /// Set the zero-weight fallback policy.
    pub fn zero_weight_fallback(mut self, fallback: ZeroWeightFallback) -> Self {
        self.zero_weight_fallback = fallback;
        self
    }

    /// Set the missing-value policy for labeled tables.
    pub fn missing_values(mut self, policy: MissingValues<T>) -> Self {
        self.missing_values = policy;
        self
    }

    /// Set the grid size cap.
    pub fn max_grid_points(mut self, max: usize) -> Self {
        self.max_grid_points = max;
        self
    }

    /// Enable or disable parallel grid evaluation.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
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

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch resampler.
    pub fn build(self) -> Result<BatchResampler<T>, ResampleError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        if let MissingValues::Fill(value) = self.missing_values {
            Validator::validate_fill_value(value)?;
        }

        let config = ResampleConfig {
            step: self.step,
            neighbors: self.neighbors,
            tolerance: self.tolerance,
            kernel: KernelOptions {
                weight_function: self.weight_function,
                zero_weight_fallback: self.zero_weight_fallback,
            },
            max_grid_points: self.max_grid_points,
            parallel: self.parallel,
            custom_estimate_pass: self.custom_estimate_pass,
        };
        config.validate()?;

        Ok(BatchResampler {
            config,
            missing_values: self.missing_values,
        })
    }
}

// ============================================================================
// Batch Resampler
// ============================================================================

/// In-memory resampler.
#[derive(Debug, Clone)]
pub struct BatchResampler<T> {
    config: ResampleConfig<T>,
    missing_values: MissingValues<T>,
}

impl<T: Float + Debug + Send + Sync> BatchResampler<T> {
    /// Estimate every feature at `query`.
    pub fn estimate(&self, table: &ObservationTable<T>, query: T) -> Result<Vec<T>, ResampleError> {
        self.estimate_detailed(table, query).map(|e| e.values)
    }

    /// Estimate every feature at `query`, with bandwidth and weight diagnostics.
    pub fn estimate_detailed(
        &self,
        table: &ObservationTable<T>,
        query: T,
    ) -> Result<KernelEstimate<T>, ResampleError> {
        ResampleExecutor::estimate(table, query, self.config.neighbors, self.config.kernel)
    }

    /// Grid the table would be resampled onto.
    pub fn grid(&self, table: &ObservationTable<T>) -> Result<RegularGrid<T>, ResampleError> {
        ResampleExecutor::grid(table, &self.config)
    }

    /// Resample a numeric table onto its regular grid.
    pub fn regularize(
        &self,
        table: &ObservationTable<T>,
    ) -> Result<Regularized<T>, ResampleError> {
        ResampleExecutor::regularize(table, &self.config)
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ResampleConfig<T> {
        &self.config
    }
}

impl<T: Float + Debug + Send + Sync + FromStr> BatchResampler<T> {
    /// Apply the configured missing-value policy to a labeled table.
    pub fn clean(&self, labeled: &LabeledTable<T>) -> Result<Cleaned<T>, ResampleError> {
        Cleaner::clean(labeled, self.missing_values)
    }

    /// Clean a labeled table, then resample it.
    ///
    /// The returned `cleaning` report lists every dropped column.
    pub fn regularize_labeled(
        &self,
        labeled: &LabeledTable<T>,
    ) -> Result<Regularized<T>, ResampleError> {
        let cleaned = self.clean(labeled)?;
        let mut result = ResampleExecutor::regularize(&cleaned.table, &self.config)?;
        result.cleaning = Some(cleaned.report);
        Ok(result)
    }
}
