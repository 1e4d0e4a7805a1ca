//! CSV reading and writing.

use std::collections::HashSet;

use crate::error::{ConversionError, ConversionResult};
use crate::models::Table;

const FORMAT: &str = "CSV";

/// Parse CSV bytes into a [`Table`].
///
/// The first record is the header. Fields are trimmed, short rows are padded
/// with empty values and surplus fields are ignored. Header names must be
/// non-empty and unique ignoring case.
pub fn read_table(input: &[u8]) -> ConversionResult<Table> {
    let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| ConversionError::malformed(FORMAT, e))?
        .clone();

    if headers.is_empty() {
        return Err(ConversionError::malformed(FORMAT, "header row is missing"));
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());
    for (position, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(ConversionError::malformed(
                FORMAT,
                format!("header name is missing at column {}", position + 1),
            ));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ConversionError::malformed(
                FORMAT,
                format!("duplicate header name: {name}"),
            ));
        }
        columns.push(name.to_string());
    }

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record.map_err(|e| ConversionError::malformed(FORMAT, e))?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    Ok(table)
}

/// Serialize a [`Table`] as CSV: one header line, then one line per record.
pub fn write_table(table: &Table) -> ConversionResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(table.columns())
        .map_err(|e| ConversionError::render(FORMAT, e))?;
    for record in table.records() {
        writer
            .write_record(record.values())
            .map_err(|e| ConversionError::render(FORMAT, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| ConversionError::render(FORMAT, e.error()))
}
