//! Observation tables.
//!
//! ## Purpose
//!
//! This module defines the two table shapes the crate works with:
//! `LabeledTable`, the raw form read from a file (string column labels and
//! possibly missing cells), and `ObservationTable`, the cleaned numeric form
//! consumed by the resampling kernel and produced by the grid builder.
//!
//! ## Design notes
//!
//! * **Column-major**: `ObservationTable` stores one time column as a
//!   contiguous slice so the kernel can accumulate whole columns at once.
//! * **Validated construction**: Numeric tables can only be built through
//!   constructors that check shape, finiteness and feature uniqueness.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Feature ids are unique and keep their input order.
//! * Every time coordinate and every value of an `ObservationTable` is finite.
//! * Every column holds exactly one value per feature.
//!
//! ## Non-goals
//!
//! * This module does not parse column labels or apply missing-value
//!   policies (handled by the engine's cleaner).
//! * This module does not sort columns by time.

// External dependencies
use num_traits::Float;
use std::collections::HashSet;

// Internal dependencies
use crate::primitives::errors::{ResampleError, ResampleResult};

// ============================================================================
// Observation Table
// ============================================================================

/// Numeric table of features (rows) by time coordinates (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable<T> {
    features: Vec<String>,
    times: Vec<T>,
    /// Column-major values: `values[col * n_features + row]`.
    values: Vec<T>,
}

impl<T: Float> ObservationTable<T> {
    /// Build a table from one value vector per time column.
    pub fn from_columns(
        features: Vec<String>,
        times: Vec<T>,
        columns: Vec<Vec<T>>,
    ) -> ResampleResult<Self> {
        check_features(&features)?;
        if times.is_empty() {
            return Err(ResampleError::EmptyInput);
        }
        if columns.len() != times.len() {
            return Err(ResampleError::InvalidInput(format!(
                "{} time coordinates but {} columns",
                times.len(),
                columns.len()
            )));
        }

        let n_features = features.len();
        let mut values = Vec::with_capacity(n_features * times.len());
        for (j, column) in columns.into_iter().enumerate() {
            if column.len() != n_features {
                return Err(ResampleError::MismatchedInputs {
                    expected: n_features,
                    got: column.len(),
                });
            }
            check_time(times[j], j)?;
            for (i, &v) in column.iter().enumerate() {
                if !v.is_finite() {
                    return Err(non_finite_cell(&features[i], times[j], v));
                }
            }
            values.extend(column);
        }

        Ok(Self {
            features,
            times,
            values,
        })
    }

    /// Build a table from one value vector per feature.
    pub fn from_rows(
        features: Vec<String>,
        times: Vec<T>,
        rows: Vec<Vec<T>>,
    ) -> ResampleResult<Self> {
        if rows.len() != features.len() {
            return Err(ResampleError::InvalidInput(format!(
                "{} features but {} rows",
                features.len(),
                rows.len()
            )));
        }
        for row in &rows {
            if row.len() != times.len() {
                return Err(ResampleError::MismatchedInputs {
                    expected: times.len(),
                    got: row.len(),
                });
            }
        }

        let columns = (0..times.len())
            .map(|j| rows.iter().map(|row| row[j]).collect())
            .collect();
        Self::from_columns(features, times, columns)
    }

    /// Assemble a table from parts already known to satisfy the invariants.
    pub(crate) fn from_parts(features: Vec<String>, times: Vec<T>, values: Vec<T>) -> Self {
        debug_assert_eq!(values.len(), features.len() * times.len());
        Self {
            features,
            times,
            values,
        }
    }

    /// Feature ids in row order.
    #[inline]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Time coordinates in column order.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Number of features (rows).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Number of time columns.
    #[inline]
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Values of every feature at time column `col`.
    #[inline]
    pub fn column(&self, col: usize) -> &[T] {
        let n = self.features.len();
        &self.values[col * n..(col + 1) * n]
    }

    /// Values of one feature across all time columns.
    pub fn row(&self, feature: usize) -> Vec<T> {
        (0..self.times.len())
            .map(|col| self.value(feature, col))
            .collect()
    }

    /// Single cell lookup.
    #[inline]
    pub fn value(&self, feature: usize, col: usize) -> T {
        self.values[col * self.features.len() + feature]
    }

    /// Row index of a feature id.
    pub fn feature_index(&self, feature: &str) -> Option<usize> {
        self.features.iter().position(|f| f == feature)
    }

    /// Smallest and largest time coordinate.
    pub fn time_range(&self) -> Option<(T, T)> {
        let first = *self.times.first()?;
        Some(
            self.times
                .iter()
                .fold((first, first), |(lo, hi), &t| (lo.min(t), hi.max(t))),
        )
    }
}

// ============================================================================
// Labeled Table
// ============================================================================

/// Raw table as read from a delimited file.
///
/// Column labels are kept as strings and cells may be missing; cleaning
/// turns it into an [`ObservationTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable<T> {
    /// Header of the feature-id column (may be empty).
    pub index_name: String,
    /// Feature ids in row order.
    pub features: Vec<String>,
    /// Column labels in file order.
    pub labels: Vec<String>,
    /// Cells in row-major order, `None` where missing.
    pub rows: Vec<Vec<Option<T>>>,
}

impl<T: Float> LabeledTable<T> {
    /// Build a labeled table, checking row shape and feature uniqueness.
    pub fn new(
        index_name: impl Into<String>,
        features: Vec<String>,
        labels: Vec<String>,
        rows: Vec<Vec<Option<T>>>,
    ) -> ResampleResult<Self> {
        check_features(&features)?;
        if rows.len() != features.len() {
            return Err(ResampleError::InvalidInput(format!(
                "{} features but {} rows",
                features.len(),
                rows.len()
            )));
        }
        for (feature, row) in features.iter().zip(&rows) {
            if row.len() != labels.len() {
                return Err(ResampleError::InvalidInput(format!(
                    "row '{}' has {} cells, header has {} labels",
                    feature,
                    row.len(),
                    labels.len()
                )));
            }
        }

        Ok(Self {
            index_name: index_name.into(),
            features,
            labels,
            rows,
        })
    }

    /// Number of features (rows).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Number of labeled columns, numeric or not.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.labels.len()
    }
}

// ============================================================================
// Checks
// ============================================================================

fn check_features(features: &[String]) -> ResampleResult<()> {
    if features.is_empty() {
        return Err(ResampleError::EmptyInput);
    }
    let mut seen = HashSet::with_capacity(features.len());
    for feature in features {
        if !seen.insert(feature.as_str()) {
            return Err(ResampleError::InvalidInput(format!(
                "duplicate feature id '{}'",
                feature
            )));
        }
    }
    Ok(())
}

fn check_time<T: Float>(time: T, col: usize) -> ResampleResult<()> {
    if !time.is_finite() {
        return Err(ResampleError::InvalidNumericValue(format!(
            "time[{}]={}",
            col,
            time.to_f64().unwrap_or(f64::NAN)
        )));
    }
    Ok(())
}

fn non_finite_cell<T: Float>(feature: &str, time: T, value: T) -> ResampleError {
    ResampleError::InvalidNumericValue(format!(
        "{}@{}={}",
        feature,
        time.to_f64().unwrap_or(f64::NAN),
        value.to_f64().unwrap_or(f64::NAN)
    ))
}
