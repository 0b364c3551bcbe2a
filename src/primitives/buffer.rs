//! Scratch buffers for repeated kernel queries.
//!
//! ## Purpose
//!
//! Regularizing a table runs the resampling kernel once per grid point. Each
//! run needs the distance from the query to every time column, a second copy
//! of those distances to select the bandwidth from, and a per-feature
//! accumulator. `KernelBuffer` owns that scratch space so it is allocated once
//! per worker rather than once per query.
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared between queries, never shrunk.
//! * One buffer per thread; buffers are never shared.

// External dependencies
use num_traits::Float;

/// Reusable scratch space for one resampling worker.
#[derive(Debug, Clone, Default)]
pub struct KernelBuffer<T> {
    /// `|query - t_j|` in column order.
    pub distances: Vec<T>,
    /// Copy of `distances` reordered by the rank selection.
    pub ranked: Vec<T>,
    /// Per-feature weighted sums.
    pub weighted_sum: Vec<T>,
}

impl<T: Float> KernelBuffer<T> {
    /// Pre-allocate for a table of the given shape.
    pub fn new(n_times: usize, n_features: usize) -> Self {
        Self {
            distances: Vec::with_capacity(n_times),
            ranked: Vec::with_capacity(n_times),
            weighted_sum: Vec::with_capacity(n_features),
        }
    }

    /// Reset lengths for the next query, zeroing the accumulator.
    #[inline]
    pub fn prepare(&mut self, n_features: usize) {
        self.distances.clear();
        self.ranked.clear();
        self.weighted_sum.clear();
        self.weighted_sum.resize(n_features, T::zero());
    }
}
