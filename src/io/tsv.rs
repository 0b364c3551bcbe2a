//! Tab-separated table reader and writer.
//!
//! ## Purpose
//!
//! Loads feature-by-time tables from tab-separated text into a
//! `LabeledTable` and writes resampled `ObservationTable`s back in the same
//! shape.
//!
//! ## Key concepts
//!
//! * **Header**: First cell names the feature-id column (may be empty); the
//!   remaining cells are column labels, numeric or not.
//! * **Missing cells**: Empty, `NA`, `NaN` or otherwise unparseable cells are
//!   read as missing and left to the cleaner's policy.
//! * **Number format**: Integral values are written as `7.0`, everything else
//!   in shortest round-trip form.
//!
//! ## Non-goals
//!
//! * This module does not parse column labels as times.

// External dependencies
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

// Internal dependencies
use crate::primitives::errors::{ResampleError, ResampleResult};
use crate::primitives::table::{LabeledTable, ObservationTable};

// ============================================================================
// Reading
// ============================================================================

/// Read a tab-separated table from a file.
pub fn read_tsv<P: AsRef<Path>>(path: P) -> ResampleResult<LabeledTable<f64>> {
    let file = std::fs::File::open(path)?;
    read_tsv_from(file)
}

/// Read a tab-separated table from any reader.
pub fn read_tsv_from<R: Read>(reader: R) -> ResampleResult<LabeledTable<f64>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(ResampleError::EmptyInput);
    }
    let index_name = header.get(0).unwrap_or_default().to_string();
    let labels: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut features = Vec::new();
    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != header.len() {
            return Err(ResampleError::InvalidInput(format!(
                "line {}: expected {} cells, found {}",
                line,
                header.len(),
                record.len()
            )));
        }

        let feature = record.get(0).unwrap_or_default().to_string();
        if !seen.insert(feature.clone()) {
            return Err(ResampleError::InvalidInput(format!(
                "line {}: duplicate feature id '{}'",
                line, feature
            )));
        }
        rows.push(record.iter().skip(1).map(parse_cell).collect());
        features.push(feature);
    }

    LabeledTable::new(index_name, features, labels, rows)
}

/// Parse one cell; anything that is not a finite number is missing.
pub fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// Writing
// ============================================================================

/// Write a table to a file, creating or truncating it.
pub fn write_tsv<P: AsRef<Path>>(
    path: P,
    table: &ObservationTable<f64>,
    index_name: &str,
) -> ResampleResult<()> {
    let file = std::fs::File::create(path)?;
    write_tsv_to(file, table, index_name)
}

/// Write a table to any writer.
pub fn write_tsv_to<W: Write>(
    writer: W,
    table: &ObservationTable<f64>,
    index_name: &str,
) -> ResampleResult<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let mut header = Vec::with_capacity(table.n_times() + 1);
    header.push(index_name.to_string());
    header.extend(table.times().iter().map(|&t| format_time_label(t)));
    writer.write_record(&header)?;

    for (i, feature) in table.features().iter().enumerate() {
        let mut record = Vec::with_capacity(table.n_times() + 1);
        record.push(feature.clone());
        record.extend((0..table.n_times()).map(|col| format_value(table.value(i, col))));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Column label for a time coordinate: `7.0`, `3.5`, `0.30000000000000004`.
pub fn format_time_label(t: f64) -> String {
    shortest_repr(t)
}

/// Cell text for a value, in the same format as time labels.
pub fn format_value(v: f64) -> String {
    shortest_repr(v)
}

fn shortest_repr(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}
