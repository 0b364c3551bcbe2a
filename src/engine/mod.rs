//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer turns the single-query estimator into whole-table resampling:
//! parameter validation, column cleaning, regular grid construction, and the
//! executor that decides per grid point between reusing an observed column
//! and running the estimator.

/// Input and parameter validation.
pub mod validator;

/// Column cleaning for labeled tables.
pub mod cleaner;

/// Regular grid construction.
pub mod grid;

/// Resampling executor.
pub mod executor;
