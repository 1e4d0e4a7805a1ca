//! Tabular data model shared by the CSV, JSON, XLSX and PDF transforms.

use serde_json::{Map, Value};

/// An ordered set of columns and the records laid out under them.
///
/// Every record holds exactly one value per column, in column order, so the
/// column order is identical across records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<TabularRecord>,
}

/// One row of a [`Table`]; values are aligned with the table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRecord {
    values: Vec<String>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Append a row. Missing trailing values become empty strings and
    /// surplus values are dropped.
    pub fn push_row(&mut self, mut values: Vec<String>) {
        values.resize(self.columns.len(), String::new());
        self.records.push(TabularRecord { values });
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in input order.
    pub fn records(&self) -> &[TabularRecord] {
        &self.records
    }

    /// Number of records (the header is not a record).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.to_lowercase() == name.to_lowercase())
    }

    /// Look up a cell by record index and column name (case-insensitive).
    pub fn get(&self, record: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.records.get(record)?.values.get(idx).map(String::as_str)
    }

    /// Render records as JSON objects keyed by column, preserving column order.
    pub fn to_json_records(&self) -> Vec<Value> {
        self.records
            .iter()
            .map(|record| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(record.values())
                    .map(|(column, value)| (column.clone(), Value::String(value.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect()
    }
}

impl TabularRecord {
    /// Values in column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}
