//! Column cleaning for labeled tables.
//!
//! ## Purpose
//!
//! Turns a `LabeledTable` read from a file into an `ObservationTable`:
//! column labels are parsed as time coordinates, columns whose label is not
//! a finite number are dropped, and missing cells are resolved by the
//! configured `MissingValues` policy. Every dropped column is reported.
//!
//! ## Key concepts
//!
//! * **Non-numeric label**: Dropped and logged; never an error.
//! * **Missing cell**: `None` or non-finite; rejected by default.
//!
//! ## Non-goals
//!
//! * This module does not sort columns or merge duplicate times.

// External dependencies
use core::str::FromStr;
use num_traits::Float;
use tracing::warn;

// Internal dependencies
use crate::primitives::errors::{ResampleError, ResampleResult};
use crate::primitives::table::{LabeledTable, ObservationTable};

// ============================================================================
// Policy and Report
// ============================================================================

/// Policy for cells that are missing or not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingValues<T> {
    /// Fail the table with `InvalidNumericValue` (default).
    Reject,
    /// Drop every time column containing a missing cell.
    DropColumn,
    /// Substitute a fixed value.
    Fill(T),
}

impl<T> Default for MissingValues<T> {
    fn default() -> Self {
        MissingValues::Reject
    }
}

/// Columns removed while cleaning a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    /// Labels that did not parse as finite numbers.
    pub non_numeric: Vec<String>,
    /// Labels of columns dropped for missing cells.
    pub incomplete: Vec<String>,
}

impl CleaningReport {
    /// Number of dropped columns.
    pub fn dropped_count(&self) -> usize {
        self.non_numeric.len() + self.incomplete.len()
    }

    /// All dropped labels, non-numeric first.
    pub fn dropped(&self) -> Vec<String> {
        self.non_numeric
            .iter()
            .chain(&self.incomplete)
            .cloned()
            .collect()
    }

    /// True when nothing was dropped.
    pub fn is_clean(&self) -> bool {
        self.dropped_count() == 0
    }
}

/// A cleaned table with the report of what was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned<T> {
    /// Numeric table ready for resampling.
    pub table: ObservationTable<T>,
    /// Columns removed on the way.
    pub report: CleaningReport,
}

// ============================================================================
// Cleaner
// ============================================================================

/// Parse a column label as a finite time coordinate.
pub fn parse_time_label<T: Float + FromStr>(label: &str) -> Option<T> {
    label
        .trim()
        .parse::<T>()
        .ok()
        .filter(|t| t.is_finite())
}

/// Converts labeled tables into numeric observation tables.
pub struct Cleaner;

impl Cleaner {
    /// Clean a labeled table under the given missing-value policy.
    pub fn clean<T: Float + FromStr>(
        labeled: &LabeledTable<T>,
        missing: MissingValues<T>,
    ) -> ResampleResult<Cleaned<T>> {
        let mut report = CleaningReport::default();
        let mut times = Vec::with_capacity(labeled.n_columns());
        let mut columns = Vec::with_capacity(labeled.n_columns());

        'columns: for (j, label) in labeled.labels.iter().enumerate() {
            let Some(time) = parse_time_label::<T>(label) else {
                warn!(column = %label, "ignoring non-numeric column");
                report.non_numeric.push(label.clone());
                continue;
            };

            let mut column = Vec::with_capacity(labeled.n_features());
            for (feature, row) in labeled.features.iter().zip(&labeled.rows) {
                match row[j].filter(|v| v.is_finite()) {
                    Some(v) => column.push(v),
                    None => match missing {
                        MissingValues::Reject => {
                            return Err(ResampleError::InvalidNumericValue(format!(
                                "missing value for feature '{}' at column '{}'",
                                feature, label
                            )));
                        }
                        MissingValues::DropColumn => {
                            warn!(column = %label, feature = %feature, "dropping column with missing values");
                            report.incomplete.push(label.clone());
                            continue 'columns;
                        }
                        MissingValues::Fill(fill) => column.push(fill),
                    },
                }
            }

            times.push(time);
            columns.push(column);
        }

        if times.is_empty() {
            return Err(ResampleError::EmptyInput);
        }

        let table = ObservationTable::from_columns(labeled.features.clone(), times, columns)?;
        Ok(Cleaned { table, report })
    }
}
