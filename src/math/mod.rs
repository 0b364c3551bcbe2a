//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the resampling
//! kernel and the grid builder:
//! - Kernel functions for distance-based weighting
//! - Rank-K bandwidth selection over time distances
//! - Tolerance-based matching of grid points to observed times
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: I/O
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// Bandwidth selection from the K-th nearest time distance.
pub mod neighborhood;

/// Tolerance matching against observed time coordinates.
pub mod matching;
