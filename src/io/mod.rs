//! Layer 5: I/O
//!
//! # Purpose
//!
//! Reading and writing tab-separated observation tables: a header row of
//! time labels after the feature-id column, then one row per feature.

/// Tab-separated table reader and writer.
pub mod tsv;
