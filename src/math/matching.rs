//! Tolerance matching of grid points to observed time coordinates.
//!
//! ## Purpose
//!
//! The grid builder reuses an observed column verbatim whenever a grid point
//! lands on (or within floating-point noise of) an observed time. This module
//! indexes the observed times once per table and answers those lookups in
//! O(log n).
//!
//! ## Key concepts
//!
//! * **Closeness**: `|t - observed| <= tolerance`, compared numerically.
//!   Labels like `"14"` and `"14.0"` both parse to the same value.
//! * **Tie-break**: Nearest observed time wins; equal distances resolve to
//!   the earliest column.
//! * **Default tolerance**: Follows floating-point spacing at the largest
//!   time, not its magnitude, and stays below half a step.
//!
//! ## Invariants
//!
//! * The index is sorted by time; insertion order is kept among equal times.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Time coordinates sorted for tolerance lookup.
#[derive(Debug, Clone)]
pub struct TimeIndex<T> {
    /// Observed times in ascending order.
    sorted: Vec<T>,
    /// Column index of each entry in `sorted`.
    columns: Vec<usize>,
}

impl<T: Float> TimeIndex<T> {
    /// Index the time coordinates of a table.
    pub fn new(times: &[T]) -> Self {
        let mut order: Vec<usize> = (0..times.len()).collect();
        // Stable sort keeps the earliest column first among equal times
        order.sort_by(|&a, &b| times[a].partial_cmp(&times[b]).unwrap_or(Equal));

        Self {
            sorted: order.iter().map(|&i| times[i]).collect(),
            columns: order,
        }
    }

    /// Column whose time is closest to `t` within `tolerance`, if any.
    pub fn find_close(&self, t: T, tolerance: T) -> Option<usize> {
        let lower = t - tolerance;
        let upper = t + tolerance;
        let start = self.sorted.partition_point(|&s| s < lower);

        let mut best: Option<(T, usize)> = None;
        for (&s, &col) in self.sorted[start..].iter().zip(&self.columns[start..]) {
            if s > upper {
                break;
            }
            let d = (s - t).abs();
            best = match best {
                Some((bd, bc)) if bd < d || (bd == d && bc < col) => Some((bd, bc)),
                _ => Some((d, col)),
            };
        }
        best.map(|(_, col)| col)
    }

    /// Number of indexed times.
    #[inline]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// True when no times are indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

/// Multiple of machine epsilon absorbed by the default tolerance.
const EPSILON_MULTIPLE: f64 = 64.0;

/// Default matching tolerance for a time range and grid step.
///
/// `64 * epsilon * max(1, |start|, |end|)`, a few ulps at the largest time,
/// capped at `step / 4` so neighboring grid points never share a match.
pub fn default_tolerance<T: Float>(start: T, end: T, step: T) -> T {
    let scale = T::one().max(start.abs()).max(end.abs());
    let spacing = T::from(EPSILON_MULTIPLE).unwrap() * T::epsilon() * scale;
    spacing.min(step / T::from(4.0).unwrap())
}
