//! Local kernel-weighted estimation at a single query time.
//!
//! ## Purpose
//!
//! This module estimates every feature's value at a query time from the
//! observed columns nearest to it. The window half-width is the rank-`k`
//! time distance; columns inside the window are weighted by the kernel and
//! averaged.
//!
//! ## Design notes
//!
//! * **Normalized**: The estimate is `sum(w_j * column_j) / sum(w_j)`.
//! * **Explicit accumulator**: Sums start at zero and every window column is
//!   added unconditionally; there is no first-column special case.
//! * **Degenerate windows**: Exact time matches and all-zero weights are
//!   separate branches, so no division by zero ever happens.
//!
//! ## Key concepts
//!
//! * **Exact match**: A column at zero distance is returned verbatim (the mean
//!   of all coincident columns when several share the query time).
//! * **Window**: Columns with `|query - t_j| <= b`. Boundary columns carry
//!   zero Epanechnikov weight and do not change the result.
//!
//! ## Invariants
//!
//! * The output has one value per feature.
//! * Every weighted value lies within the min/max of the window's values.
//! * Output never contains NaN for finite input.
//!
//! ## Non-goals
//!
//! * This module does not validate `k`, the query or the table.
//! * This module does not decide which grid points need estimation.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::WeightFunction;
use crate::math::neighborhood::{Neighborhood, fill_distances};
use crate::primitives::buffer::KernelBuffer;
use crate::primitives::table::ObservationTable;

// Module dependencies
use super::types::{EstimateKind, KernelEstimate, KernelOptions, ZeroWeightFallback};

// ============================================================================
// Accumulator
// ============================================================================

/// Running per-feature weighted sums and their total weight.
pub struct WeightedAccumulator<'a, T> {
    sums: &'a mut [T],
    weight_sum: T,
    count: usize,
}

impl<'a, T: Float> WeightedAccumulator<'a, T> {
    /// Start from zero sums; `sums` must already be zeroed.
    pub fn new(sums: &'a mut [T]) -> Self {
        Self {
            sums,
            weight_sum: T::zero(),
            count: 0,
        }
    }

    /// Add `weight * column` to the running sums.
    #[inline]
    pub fn add(&mut self, weight: T, column: &[T]) {
        for (s, &v) in self.sums.iter_mut().zip(column) {
            *s = *s + weight * v;
        }
        self.weight_sum = self.weight_sum + weight;
        self.count += 1;
    }

    /// Total weight added so far.
    #[inline]
    pub fn weight_sum(&self) -> T {
        self.weight_sum
    }

    /// Number of columns added so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Divide the sums by `divisor` into a new vector.
    pub fn normalized(&self, divisor: T) -> Vec<T> {
        self.sums.iter().map(|&s| s / divisor).collect()
    }
}

// ============================================================================
// Estimation Context
// ============================================================================

/// Everything needed to estimate one query time.
pub struct EstimationContext<'a, T> {
    /// Observations to estimate from.
    pub table: &'a ObservationTable<T>,
    /// Query time.
    pub query: T,
    /// Bandwidth rank (0-indexed).
    pub k: usize,
    /// Kernel applied to normalized offsets.
    pub weight_function: WeightFunction,
    /// Policy for all-zero weights.
    pub zero_weight_fallback: ZeroWeightFallback,
    /// Scratch space reused across queries.
    pub buffer: &'a mut KernelBuffer<T>,
}

impl<'a, T: Float> EstimationContext<'a, T> {
    /// Create a context for one query.
    pub fn new(
        table: &'a ObservationTable<T>,
        query: T,
        k: usize,
        options: KernelOptions,
        buffer: &'a mut KernelBuffer<T>,
    ) -> Self {
        Self {
            table,
            query,
            k,
            weight_function: options.weight_function,
            zero_weight_fallback: options.zero_weight_fallback,
            buffer,
        }
    }

    /// Run the estimate.
    ///
    /// Requires `table.n_times() > k` and a finite query.
    pub fn estimate(&mut self) -> KernelEstimate<T> {
        let table = self.table;
        let buffer = &mut *self.buffer;
        buffer.prepare(table.n_features());

        fill_distances(table.times(), self.query, &mut buffer.distances);
        let window = Neighborhood::select(&buffer.distances, self.k, &mut buffer.ranked);

        if window.is_exact() {
            return self.exact_match(window);
        }

        // No coincident column, so every distance (and the bandwidth) is > 0
        let b = window.bandwidth;
        let mut acc = WeightedAccumulator::new(&mut buffer.weighted_sum);
        for (col, (&t, &d)) in table.times().iter().zip(&buffer.distances).enumerate() {
            if window.contains(d) {
                let u = (self.query - t) / b;
                acc.add(self.weight_function.compute_weight(u), table.column(col));
            }
        }

        let weight_sum = acc.weight_sum();
        let support = acc.count();
        if weight_sum > T::zero() {
            return KernelEstimate {
                values: acc.normalized(weight_sum),
                bandwidth: b,
                weight_sum,
                support,
                kind: EstimateKind::Weighted,
            };
        }

        let values = match self.zero_weight_fallback {
            ZeroWeightFallback::ReturnZero => vec![T::zero(); table.n_features()],
            ZeroWeightFallback::UseWindowMean => self.window_mean(window),
        };
        KernelEstimate {
            values,
            bandwidth: b,
            weight_sum: T::zero(),
            support,
            kind: EstimateKind::ZeroWeight,
        }
    }

    /// Values at the query time itself.
    fn exact_match(&mut self, window: Neighborhood<T>) -> KernelEstimate<T> {
        let table = self.table;
        let buffer = &mut *self.buffer;

        let values = if window.coincident == 1 {
            let col = buffer
                .distances
                .iter()
                .position(|&d| d == T::zero())
                .unwrap_or(0);
            table.column(col).to_vec()
        } else {
            let mut acc = WeightedAccumulator::new(&mut buffer.weighted_sum);
            for (col, &d) in buffer.distances.iter().enumerate() {
                if d == T::zero() {
                    acc.add(T::one(), table.column(col));
                }
            }
            acc.normalized(T::from(acc.count()).unwrap_or_else(T::one))
        };

        KernelEstimate {
            values,
            bandwidth: window.bandwidth,
            weight_sum: T::zero(),
            support: window.coincident,
            kind: EstimateKind::ExactMatch,
        }
    }

    /// Unweighted mean of the columns inside the window.
    fn window_mean(&mut self, window: Neighborhood<T>) -> Vec<T> {
        let table = self.table;
        let buffer = &mut *self.buffer;
        buffer.weighted_sum.iter_mut().for_each(|s| *s = T::zero());

        let mut acc = WeightedAccumulator::new(&mut buffer.weighted_sum);
        for (col, &d) in buffer.distances.iter().enumerate() {
            if window.contains(d) {
                acc.add(T::one(), table.column(col));
            }
        }
        if acc.count() == 0 {
            return vec![T::zero(); table.n_features()];
        }
        acc.normalized(T::from(acc.count()).unwrap_or_else(T::one))
    }
}
