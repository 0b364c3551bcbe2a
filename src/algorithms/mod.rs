//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the local kernel-weighted estimator: given an
//! observation table and a query time, produce one estimate per feature from
//! the observations inside the rank-K bandwidth window.
//!
//! The estimator performs no validation and no I/O; the engine validates
//! parameters before calling into it.

/// Estimator configuration and outcome types.
pub mod types;

/// The local kernel-weighted estimator.
pub mod estimate;
