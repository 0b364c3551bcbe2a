//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures every other layer builds on:
//! - The error taxonomy shared by the whole crate
//! - Labeled (uncleaned) and numeric observation tables
//! - Reusable scratch buffers for repeated kernel queries
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for resampling operations.
pub mod errors;

/// Labeled and numeric observation tables.
pub mod table;

/// Reusable scratch buffers.
pub mod buffer;
