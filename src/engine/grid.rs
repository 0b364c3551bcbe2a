//! Regular grid construction.
//!
//! ## Purpose
//!
//! Builds the evenly spaced time coordinates a table is resampled onto: from
//! the earliest observed time, in steps of `step`, up to and including the
//! first point that reaches the latest observed time.
//!
//! ## Design notes
//!
//! * **No drift**: Point `i` is `start + i * step`, never a running sum.
//! * **Overshoot**: The last point may pass `end` by less than one step, so
//!   the grid always covers the whole observed range.
//! * **Bounded**: The point count is checked against a cap before allocation.
//!
//! ## Invariants
//!
//! * The first point equals `start`.
//! * Points are strictly increasing.
//! * The last point is `>= end - tolerance`; the one before it is not.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::{ResampleError, ResampleResult};

/// Evenly spaced time coordinates covering an observed range.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGrid<T> {
    step: T,
    points: Vec<T>,
}

impl<T: Float> RegularGrid<T> {
    /// Build the grid covering `[start, end]`.
    ///
    /// A point within `tolerance` of `end` counts as reaching it. Parameters
    /// are assumed validated (`step > 0`, `tolerance >= 0`, all finite); a
    /// step too fine to separate points at this magnitude is rejected.
    pub fn covering(
        start: T,
        end: T,
        step: T,
        tolerance: T,
        max_points: usize,
    ) -> ResampleResult<Self> {
        Validator::validate_step_resolution(step, start, end)?;
        let span = (end - start).max(T::zero());
        let raw_steps = (span / step).ceil();
        let too_many = || {
            ResampleError::InvalidInput(format!(
                "grid over [{}, {}] with step {} exceeds {} points",
                start.to_f64().unwrap_or(f64::NAN),
                end.to_f64().unwrap_or(f64::NAN),
                step.to_f64().unwrap_or(f64::NAN),
                max_points
            ))
        };

        let mut steps = raw_steps.to_usize().ok_or_else(too_many)?;
        let at = |i: usize| start + T::from(i).unwrap_or_else(T::infinity) * step;
        let target = end - tolerance;

        while steps > 0 && at(steps - 1) >= target {
            steps -= 1;
        }
        while at(steps) < target && steps < max_points {
            steps += 1;
        }

        if steps >= max_points {
            return Err(too_many());
        }

        Ok(Self {
            step,
            points: (0..=steps).map(at).collect(),
        })
    }

    /// Grid points in increasing order.
    #[inline]
    pub fn points(&self) -> &[T] {
        &self.points
    }

    /// Spacing between consecutive points.
    #[inline]
    pub fn step(&self) -> T {
        self.step
    }

    /// First grid point.
    #[inline]
    pub fn start(&self) -> T {
        self.points[0]
    }

    /// Last grid point.
    #[inline]
    pub fn end(&self) -> T {
        self.points[self.points.len() - 1]
    }

    /// Number of grid points (never zero).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a grid holds at least its start point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the grid into its points.
    pub fn into_points(self) -> Vec<T> {
        self.points
    }
}
