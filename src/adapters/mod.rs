//! Layer 6: Adapters
//!
//! # Purpose
//!
//! Execution adapters for the two ways tables reach the engine:
//! - `batch`: tables already in memory
//! - `directory`: every table file in a folder, written to another folder

/// In-memory batch adapter.
pub mod batch;

/// Directory-of-files adapter.
pub mod directory;
