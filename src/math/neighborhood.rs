//! Bandwidth selection from the K-th nearest time distance.
//!
//! ## Purpose
//!
//! This module derives the half-width of the local window for one query
//! time: the distance to the observation of rank `k` (0-indexed) when all
//! time columns are ordered by their distance to the query.
//!
//! ## Design notes
//!
//! * **Selection, not sorting**: Uses Quickselect (`select_nth_unstable_by`)
//!   for O(n) bandwidth selection instead of a full O(n log n) sort.
//! * **Scratch reuse**: The caller owns the distance and selection buffers.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Bandwidth**: `b = sorted(|query - t_j|)[k]`.
//! * **Coincident columns**: Columns at zero distance from the query. When
//!   any exist the window is degenerate and the kernel is bypassed.
//!
//! ## Invariants
//!
//! * `b >= 0`.
//! * At least `k + 1` columns lie within `b` of the query.
//!
//! ## Non-goals
//!
//! * This module does not validate `k` against the column count
//!   (handled by `Validator`).
//! * This module does not compute kernel weights.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Neighborhood
// ============================================================================

/// Local window around one query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood<T> {
    /// Half-width of the window (rank-`k` distance).
    pub bandwidth: T,
    /// Number of columns lying exactly at the query time.
    pub coincident: usize,
}

impl<T: Float> Neighborhood<T> {
    /// Select the window for a query from precomputed distances.
    ///
    /// `ranked` is overwritten with a permutation of `distances`.
    pub fn select(distances: &[T], k: usize, ranked: &mut Vec<T>) -> Self {
        debug_assert!(k < distances.len());

        ranked.clear();
        ranked.extend_from_slice(distances);
        let (_, &mut bandwidth, _) =
            ranked.select_nth_unstable_by(k, |a, b| a.partial_cmp(b).unwrap_or(Equal));

        let coincident = distances.iter().filter(|&&d| d == T::zero()).count();

        Self {
            bandwidth,
            coincident,
        }
    }

    /// True when the query coincides with at least one observed time.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.coincident > 0
    }

    /// True when a column at `distance` falls inside the window.
    #[inline]
    pub fn contains(&self, distance: T) -> bool {
        distance <= self.bandwidth
    }
}

// ============================================================================
// Distances
// ============================================================================

/// Fill `out` with `|query - t|` for every time coordinate.
#[inline]
pub fn fill_distances<T: Float>(times: &[T], query: T, out: &mut Vec<T>) {
    out.clear();
    out.extend(times.iter().map(|&t| (query - t).abs()));
}
