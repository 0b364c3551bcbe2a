//! Input validation for resampling configuration and queries.
//!
//! ## Purpose
//!
//! This module provides the validation functions for resampling parameters
//! and per-query inputs. It checks requirements such as a positive neighbor
//! count, a finite query time, a positive step, and enough time columns to
//! select the bandwidth.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not clean, sort or transform tables.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ResampleError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for resampling configuration and inputs.
///
/// Provides static methods that return `Result<(), ResampleError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Query Validation
    // ========================================================================

    /// Validate the bandwidth rank `k` (the configured neighbor count).
    pub fn validate_neighbors(k: usize) -> Result<(), ResampleError> {
        if k == 0 {
            return Err(ResampleError::InvalidInput(
                "neighbors must be at least 1, got 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the query time of an estimate.
    pub fn validate_query<T: Float>(query: T) -> Result<(), ResampleError> {
        if !query.is_finite() {
            return Err(ResampleError::InvalidInput(format!(
                "query time must be finite, got {}",
                query.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate that the table has the `k + 1` columns the bandwidth needs.
    pub fn validate_sufficient_columns(n_times: usize, k: usize) -> Result<(), ResampleError> {
        let min = k.saturating_add(1);
        if n_times < min {
            return Err(ResampleError::InsufficientData { got: n_times, min });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the grid spacing.
    pub fn validate_step<T: Float>(step: T) -> Result<(), ResampleError> {
        if !step.is_finite() || step <= T::zero() {
            return Err(ResampleError::InvalidInput(format!(
                "step must be positive and finite, got {}",
                step.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate that `step` is resolvable at the magnitude of the time range.
    ///
    /// Below `16 * epsilon * max(|start|, |end|)` consecutive grid points
    /// can round to the same value.
    pub fn validate_step_resolution<T: Float>(
        step: T,
        start: T,
        end: T,
    ) -> Result<(), ResampleError> {
        let scale = start.abs().max(end.abs());
        let min = T::from(16.0).unwrap() * T::epsilon() * scale;
        if step <= min {
            return Err(ResampleError::InvalidInput(format!(
                "step {} is below the floating-point resolution at time {}",
                step.to_f64().unwrap_or(f64::NAN),
                scale.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate the exact-match tolerance against the grid step.
    pub fn validate_tolerance<T: Float>(tol: T, step: T) -> Result<(), ResampleError> {
        if !tol.is_finite() || tol < T::zero() {
            return Err(ResampleError::InvalidInput(format!(
                "tolerance must be non-negative and finite, got {}",
                tol.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if tol >= step / T::from(2.0).unwrap() {
            return Err(ResampleError::InvalidInput(format!(
                "tolerance {} must be less than half the step {}",
                tol.to_f64().unwrap_or(f64::NAN),
                step.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate the grid size cap.
    pub fn validate_max_grid_points(max: usize) -> Result<(), ResampleError> {
        if max == 0 {
            return Err(ResampleError::InvalidInput(
                "max_grid_points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the value substituted for missing cells.
    pub fn validate_fill_value<T: Float>(value: T) -> Result<(), ResampleError> {
        if !value.is_finite() {
            return Err(ResampleError::InvalidInput(format!(
                "fill value must be finite, got {}",
                value.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), ResampleError> {
        if let Some(param) = duplicate_param {
            return Err(ResampleError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
