//! Delimited-text loader for peak tables and writer/reader for score tables.
//!
//! Files ending in `.tsv`, `.tab` or `.txt` are tab separated; anything else
//! is read and written as CSV.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::info;

use crate::{
    config::DEFAULT_GROUP_COLUMN,
    error::{FacError, Result},
    score::{ScoreTable, MAX_VALUE_COLUMN},
    table::{IonMatrix, PeakTable},
};

/// Cell contents treated as a missing measurement
pub const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A",
];

/// Field delimiter implied by a file extension
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") | Some("txt") => b'\t',
        _ => b',',
    }
}

/// Parse one cell; `Ok(None)` for a missing marker
fn parse_cell(field: &str) -> std::result::Result<Option<f64>, ()> {
    if MISSING_MARKERS.contains(&field) {
        return Ok(None);
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

fn header_position(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| FacError::MissingColumn(name.to_string()))
}

/// Load a peak table from a file.
pub fn read_peak_table<P: AsRef<Path>>(
    path: P,
    group_column: &str,
    sample_column: Option<&str>,
) -> Result<PeakTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_peak_table_from(file, delimiter_for(path), group_column, sample_column)?;
    info!(
        "Loaded {} samples x {} ions from {}",
        table.n_samples(),
        table.n_ions(),
        path.display()
    );
    Ok(table)
}

/// Load a peak table from any reader.
///
/// The header names the group column, an optional sample identifier column,
/// and one column per ion. Row numbers in errors count data rows from zero.
pub fn read_peak_table_from<R: Read>(
    reader: R,
    delimiter: u8,
    group_column: &str,
    sample_column: Option<&str>,
) -> Result<PeakTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(index) = headers.iter().position(|h| h.is_empty()) {
        return Err(FacError::EmptyColumnName { index });
    }
    let group_idx = header_position(&headers, group_column)?;
    let sample_idx = sample_column
        .map(|name| header_position(&headers, name))
        .transpose()?;

    let ion_columns: Vec<usize> = (0..headers.len())
        .filter(|&i| i != group_idx && Some(i) != sample_idx)
        .collect();
    let ions: Vec<String> = ion_columns.iter().map(|&i| headers[i].to_string()).collect();

    let mut groups = Vec::new();
    let mut sample_ids = Vec::new();
    let mut values = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        groups.push(record[group_idx].to_string());
        sample_ids.push(match sample_idx {
            Some(i) => record[i].to_string(),
            None => (row + 1).to_string(),
        });
        for (&col, ion) in ion_columns.iter().zip(ions.iter()) {
            let field = &record[col];
            let value = parse_cell(field).map_err(|_| FacError::InvalidValue {
                value: field.to_string(),
                row,
                column: ion.clone(),
            })?;
            values.push(value);
        }
    }

    PeakTable::new(ions, groups, sample_ids, values)
}

/// Write a score table to a file.
pub fn write_score_table<P: AsRef<Path>>(path: P, table: &ScoreTable) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_score_table_to(file, delimiter_for(path), table)?;
    info!(
        "Wrote {} groups x {} ions to {}",
        table.groups().len(),
        table.ions().len(),
        path.display()
    );
    Ok(())
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write a score table: `group`, one column per ion, then `max_value`.
///
/// Missing scores are written as empty cells. Numbers use the shortest
/// representation that parses back to the same `f64`.
pub fn write_score_table_to<W: Write>(writer: W, delimiter: u8, table: &ScoreTable) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    let mut header = Vec::with_capacity(table.ions().len() + 2);
    header.push(DEFAULT_GROUP_COLUMN);
    header.extend(table.ions().iter().map(String::as_str));
    header.push(MAX_VALUE_COLUMN);
    wtr.write_record(&header)?;

    for ((group, row), max_value) in table.scores().rows().zip(table.max_values()) {
        let mut record = Vec::with_capacity(row.len() + 2);
        record.push(group.to_string());
        record.extend(row.iter().map(|v| format_cell(*v)));
        record.push(format_cell(*max_value));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a score table written by [`write_score_table`].
pub fn read_score_table<P: AsRef<Path>>(path: P) -> Result<ScoreTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_score_table_from(file, delimiter_for(path))
}

/// Read a score table from any reader.
///
/// The first column holds group labels and the last must be `max_value`.
pub fn read_score_table_from<R: Read>(reader: R, delimiter: u8) -> Result<ScoreTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 || &headers[headers.len() - 1] != MAX_VALUE_COLUMN {
        return Err(FacError::MissingColumn(MAX_VALUE_COLUMN.to_string()));
    }
    let n_ions = headers.len() - 2;
    let ions: Vec<String> = headers.iter().skip(1).take(n_ions).map(String::from).collect();

    let mut groups = Vec::new();
    let mut values = Vec::new();
    let mut max_values = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        groups.push(record[0].to_string());
        for (col, name) in headers.iter().enumerate().skip(1) {
            let field = &record[col];
            let value = parse_cell(field).map_err(|_| FacError::InvalidValue {
                value: field.to_string(),
                row,
                column: name.to_string(),
            })?;
            if col == headers.len() - 1 {
                max_values.push(value);
            } else {
                values.push(value);
            }
        }
    }

    let scores = IonMatrix::new(groups, ions, values)?;
    ScoreTable::new(scores, max_values)
}
