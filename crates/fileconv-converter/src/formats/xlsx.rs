//! Spreadsheet output.

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, XlsxError};

use crate::error::{ConversionError, ConversionResult};
use crate::models::Table;

const FORMAT: &str = "XLSX";

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Data";

/// Header fill, a 25% grey.
const HEADER_FILL: u32 = 0xC0C0C0;

fn render_err(e: XlsxError) -> ConversionError {
    ConversionError::render(FORMAT, e)
}

/// Write a table as a workbook with one sheet named [`SHEET_NAME`].
///
/// Row 0 holds the bold, grey-filled header; records follow in order. All
/// cells are written as text and columns are sized to their content.
pub fn write_workbook(table: &Table) -> ConversionResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(HEADER_FILL));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(render_err)?;

    for (col, name) in table.columns().iter().enumerate() {
        let col = column_number(col)?;
        worksheet
            .write_string_with_format(0, col, name, &header_format)
            .map_err(render_err)?;
    }

    for (idx, record) in table.records().iter().enumerate() {
        let row = u32::try_from(idx + 1)
            .map_err(|_| ConversionError::render(FORMAT, "too many rows for a worksheet"))?;
        for (col, value) in record.values().iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row, column_number(col)?, value)
                .map_err(render_err)?;
        }
    }

    worksheet.autofit();
    workbook.save_to_buffer().map_err(render_err)
}

fn column_number(col: usize) -> ConversionResult<u16> {
    u16::try_from(col)
        .map_err(|_| ConversionError::render(FORMAT, "too many columns for a worksheet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produces_zip_container() {
        let mut table = Table::new(vec!["name".into(), "age".into()]);
        table.push_row(vec!["Alice".into(), "30".into()]);
        table.push_row(vec!["Bob".into(), String::new()]);

        let bytes = write_workbook(&table).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::new(vec!["only".into()]);
        let bytes = write_workbook(&table).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_too_many_columns() {
        let table = Table::new((0..20_000).map(|i| format!("c{i}")).collect());
        let err = write_workbook(&table).unwrap_err();
        assert!(matches!(err, ConversionError::Render { .. }));
    }
}
