//! Estimator Types
//!
//! ## Purpose
//!
//! This module defines the configuration enums and the result type of the
//! local kernel-weighted estimator, such as `ZeroWeightFallback` and
//! `KernelEstimate`.

// Internal dependencies
use crate::math::kernel::WeightFunction;

// ============================================================================
// Zero-Weight Fallback Policy
// ============================================================================

/// Policy for windows whose kernel weights sum to zero.
///
/// This happens when every column inside the window sits exactly on the
/// window boundary, e.g. two observations symmetric around the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroWeightFallback {
    /// Return a zero vector (default).
    #[default]
    ReturnZero,

    /// Return the unweighted mean of the columns inside the window.
    UseWindowMean,
}

// ============================================================================
// Estimator Options
// ============================================================================

/// Kernel configuration for a single estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelOptions {
    /// Kernel applied to normalized offsets.
    pub weight_function: WeightFunction,
    /// Behavior when all weights in the window are zero.
    pub zero_weight_fallback: ZeroWeightFallback,
}

// ============================================================================
// Estimate
// ============================================================================

/// How an estimate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateKind {
    /// The query coincided with observed time(s); their values were returned.
    ExactMatch,
    /// Normalized kernel-weighted average.
    Weighted,
    /// All weights were zero; the fallback policy produced the values.
    ZeroWeight,
}

/// Estimate at one query time with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelEstimate<T> {
    /// One value per feature.
    pub values: Vec<T>,
    /// Half-width of the window used.
    pub bandwidth: T,
    /// Sum of kernel weights (zero unless `kind` is `Weighted`).
    pub weight_sum: T,
    /// Number of columns inside the window.
    pub support: usize,
    /// How the values were obtained.
    pub kind: EstimateKind,
}
