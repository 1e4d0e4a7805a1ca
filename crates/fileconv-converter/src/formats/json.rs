//! JSON parsing into tables and generic values.

use serde_json::Value;

use crate::error::{ConversionError, ConversionResult};
use crate::models::Table;

const FORMAT: &str = "JSON";

/// Parse arbitrary JSON.
pub fn read_value(input: &[u8]) -> ConversionResult<Value> {
    serde_json::from_slice(input).map_err(|e| ConversionError::malformed(FORMAT, e))
}

/// Parse a JSON array of objects into a [`Table`].
///
/// Columns come from the keys of the first object, in document order. Later
/// objects are projected onto those columns; a key they lack yields an empty
/// cell and keys the first object lacks are ignored.
pub fn read_records(input: &[u8]) -> ConversionResult<Table> {
    let value = read_value(input)?;
    let Value::Array(items) = value else {
        return Err(ConversionError::malformed(
            FORMAT,
            "expected an array of objects",
        ));
    };

    let Some(first) = items.first() else {
        return Err(ConversionError::empty("JSON array is empty"));
    };
    let Value::Object(first) = first else {
        return Err(ConversionError::malformed(
            FORMAT,
            "array element 0 is not an object",
        ));
    };

    let mut table = Table::new(first.keys().cloned().collect());
    for (position, item) in items.iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(ConversionError::malformed(
                FORMAT,
                format!("array element {position} is not an object"),
            ));
        };
        let row = table
            .columns()
            .iter()
            .map(|column| object.get(column).map(cell_text).unwrap_or_default())
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Text of a single cell: strings verbatim, `null` empty, other scalars in
/// their JSON spelling and nested values as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pretty-print a JSON value.
pub fn write_pretty(value: &Value) -> ConversionResult<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| ConversionError::render(FORMAT, e))
}
