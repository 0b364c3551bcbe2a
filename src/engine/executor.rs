//! Execution engine for resampling operations.
//!
//! ## Purpose
//!
//! This module orchestrates the resampling of a whole table: it validates the
//! configuration, builds the regular grid over the observed time range, and
//! for every grid point either reuses an observed column or runs the local
//! kernel estimator. It also provides the validated single-query entry point.
//!
//! ## Design notes
//!
//! * Grid points are independent; with the `parallel` feature they are
//!   evaluated on the rayon pool with one scratch buffer per worker.
//! * Sequential and parallel evaluation produce bit-identical output.
//! * Kernel estimation is only validated (and only required) when at least
//!   one grid point has no observed column within tolerance.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Exact-match reuse**: A grid point within tolerance of an observed time
//!   copies that column verbatim.
//! * **Provenance**: Every output column records whether it was observed or
//!   estimated, and how.
//!
//! ## Invariants
//!
//! * Output columns are in increasing time order.
//! * Output rows are the input features in input order.
//!
//! ## Non-goals
//!
//! * This module does not read or write files.
//! * This module does not clean labeled tables (handled by `cleaner`).

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::estimate::EstimationContext;
use crate::algorithms::types::{EstimateKind, KernelEstimate, KernelOptions};
use crate::engine::cleaner::CleaningReport;
use crate::engine::grid::RegularGrid;
use crate::engine::validator::Validator;
use crate::math::matching::{TimeIndex, default_tolerance};
use crate::primitives::buffer::KernelBuffer;
use crate::primitives::errors::{ResampleError, ResampleResult};
use crate::primitives::table::ObservationTable;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for a custom estimate pass.
#[doc(hidden)]
pub type EstimatePassFn<T> = fn(
    &ObservationTable<T>, // table
    T,                    // query time
    usize,                // k
    KernelOptions,        // kernel configuration
    &mut KernelBuffer<T>, // scratch
) -> KernelEstimate<T>;

/// Default estimate pass: the local kernel-weighted estimator.
pub fn kernel_pass<T: Float>(
    table: &ObservationTable<T>,
    query: T,
    k: usize,
    options: KernelOptions,
    buffer: &mut KernelBuffer<T>,
) -> KernelEstimate<T> {
    EstimationContext::new(table, query, k, options, buffer).estimate()
}

/// Where an output column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
    /// Copied from the observed column at this index.
    Observed(usize),
    /// Produced by the estimator.
    Estimated(EstimateKind),
}

/// A table resampled onto a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Regularized<T> {
    /// Output table; its times are the grid points.
    pub table: ObservationTable<T>,
    /// Grid the table was resampled onto.
    pub grid: RegularGrid<T>,
    /// Provenance of each output column.
    pub sources: Vec<PointSource>,
    /// Columns dropped while cleaning, when the input was labeled.
    pub cleaning: Option<CleaningReport>,
}

impl<T> Regularized<T> {
    /// Number of columns copied from observations.
    pub fn observed_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s, PointSource::Observed(_)))
            .count()
    }

    /// Number of columns produced by the estimator.
    pub fn estimated_count(&self) -> usize {
        self.sources.len() - self.observed_count()
    }

    /// Number of columns that hit the zero-weight fallback.
    pub fn zero_weight_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s, PointSource::Estimated(EstimateKind::ZeroWeight)))
            .count()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolved configuration for regularizing tables.
#[derive(Debug, Clone)]
pub struct ResampleConfig<T> {
    /// Grid spacing.
    pub step: T,
    /// Bandwidth rank K.
    pub neighbors: usize,
    /// Exact-match tolerance; derived from the time range when `None`.
    pub tolerance: Option<T>,
    /// Kernel configuration.
    pub kernel: KernelOptions,
    /// Upper bound on the grid length.
    pub max_grid_points: usize,
    /// Evaluate grid points on the rayon pool.
    pub parallel: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom estimate pass function.
    #[doc(hidden)]
    pub custom_estimate_pass: Option<EstimatePassFn<T>>,
}

impl<T: Float> ResampleConfig<T> {
    /// Default grid size cap.
    pub const DEFAULT_MAX_GRID_POINTS: usize = 10_000_000;

    /// Configuration with the given step and neighbor count and defaults elsewhere.
    pub fn new(step: T, neighbors: usize) -> Self {
        Self {
            step,
            neighbors,
            tolerance: None,
            kernel: KernelOptions::default(),
            max_grid_points: Self::DEFAULT_MAX_GRID_POINTS,
            parallel: cfg!(feature = "parallel"),
            custom_estimate_pass: None,
        }
    }

    /// Check every parameter.
    pub fn validate(&self) -> ResampleResult<()> {
        Validator::validate_step(self.step)?;
        Validator::validate_neighbors(self.neighbors)?;
        if let Some(tol) = self.tolerance {
            Validator::validate_tolerance(tol, self.step)?;
        }
        Validator::validate_max_grid_points(self.max_grid_points)
    }
}

// ============================================================================
// Contract Entry Points
// ============================================================================

/// Estimate every feature at `query` from the rank-`k` bandwidth window.
///
/// Uses the Epanechnikov kernel and the zero-vector fallback.
pub fn estimate<T: Float>(
    table: &ObservationTable<T>,
    query: T,
    k: usize,
) -> ResampleResult<Vec<T>> {
    ResampleExecutor::estimate(table, query, k, KernelOptions::default()).map(|e| e.values)
}

/// Resample `table` onto a regular grid of spacing `step`.
pub fn regularize<T: Float + Debug + Send + Sync>(
    table: &ObservationTable<T>,
    step: T,
    k: usize,
) -> ResampleResult<Regularized<T>> {
    ResampleExecutor::regularize(table, &ResampleConfig::new(step, k))
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for estimates and grid resampling.
pub struct ResampleExecutor;

impl ResampleExecutor {
    /// Validated single-query estimate.
    pub fn estimate<T: Float>(
        table: &ObservationTable<T>,
        query: T,
        k: usize,
        options: KernelOptions,
    ) -> ResampleResult<KernelEstimate<T>> {
        Validator::validate_neighbors(k)?;
        Validator::validate_query(query)?;
        Validator::validate_sufficient_columns(table.n_times(), k)?;

        let mut buffer = KernelBuffer::new(table.n_times(), table.n_features());
        Ok(kernel_pass(table, query, k, options, &mut buffer))
    }

    /// Build the grid a table would be resampled onto.
    pub fn grid<T: Float>(
        table: &ObservationTable<T>,
        config: &ResampleConfig<T>,
    ) -> ResampleResult<RegularGrid<T>> {
        config.validate()?;
        Self::grid_unchecked(table, config).map(|(grid, _)| grid)
    }

    /// Resample a table onto its regular grid.
    pub fn regularize<T: Float + Debug + Send + Sync>(
        table: &ObservationTable<T>,
        config: &ResampleConfig<T>,
    ) -> ResampleResult<Regularized<T>> {
        config.validate()?;
        let (grid, tolerance) = Self::grid_unchecked(table, config)?;

        // Plan: observed column within tolerance, or estimate
        let index = TimeIndex::new(table.times());
        let plan: Vec<Option<usize>> = grid
            .points()
            .iter()
            .map(|&t| index.find_close(t, tolerance))
            .collect();
        if plan.iter().any(Option::is_none) {
            Validator::validate_sufficient_columns(table.n_times(), config.neighbors)?;
        }

        let pass = config.custom_estimate_pass.unwrap_or(kernel_pass::<T>);
        let columns = Self::evaluate(table, &grid, &plan, config, pass);

        let n_features = table.n_features();
        let mut values = Vec::with_capacity(n_features * grid.len());
        let mut sources = Vec::with_capacity(grid.len());
        for (column, source) in columns {
            values.extend(column);
            sources.push(source);
        }

        let output =
            ObservationTable::from_parts(table.features().to_vec(), grid.points().to_vec(), values);
        let result = Regularized {
            table: output,
            grid,
            sources,
            cleaning: None,
        };

        debug!(
            grid_points = result.grid.len(),
            observed = result.observed_count(),
            estimated = result.estimated_count(),
            zero_weight = result.zero_weight_count(),
            "regularized table"
        );

        Ok(result)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Grid and effective tolerance for a validated configuration.
    fn grid_unchecked<T: Float>(
        table: &ObservationTable<T>,
        config: &ResampleConfig<T>,
    ) -> ResampleResult<(RegularGrid<T>, T)> {
        let (start, end) = table.time_range().ok_or(ResampleError::EmptyInput)?;
        let tolerance = config
            .tolerance
            .unwrap_or_else(|| default_tolerance(start, end, config.step));
        let grid = RegularGrid::covering(start, end, config.step, tolerance, config.max_grid_points)?;
        Ok((grid, tolerance))
    }

    /// Produce one output column per grid point.
    fn evaluate<T: Float + Send + Sync>(
        table: &ObservationTable<T>,
        grid: &RegularGrid<T>,
        plan: &[Option<usize>],
        config: &ResampleConfig<T>,
        pass: EstimatePassFn<T>,
    ) -> Vec<(Vec<T>, PointSource)> {
        let point = |buffer: &mut KernelBuffer<T>, (&t, &matched): (&T, &Option<usize>)| {
            match matched {
                Some(col) => (table.column(col).to_vec(), PointSource::Observed(col)),
                None => {
                    let est = pass(table, t, config.neighbors, config.kernel, buffer);
                    (est.values, PointSource::Estimated(est.kind))
                }
            }
        };
        let new_buffer = || KernelBuffer::new(table.n_times(), table.n_features());

        #[cfg(feature = "parallel")]
        if config.parallel {
            return grid
                .points()
                .par_iter()
                .zip(plan.par_iter())
                .map_init(new_buffer, point)
                .collect();
        }

        let mut buffer = new_buffer();
        grid.points()
            .iter()
            .zip(plan)
            .map(|pair| point(&mut buffer, pair))
            .collect()
    }
}
