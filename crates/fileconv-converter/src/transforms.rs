//! The seven transforms. Each is a pure function from input bytes to output
//! bytes; none of them touch storage.

use fileconv_core::types::ConversionKind;

use crate::error::{ConversionError, ConversionResult};
use crate::formats::pdf::{BODY_SIZE, PdfComposer, TITLE_SIZE};
use crate::formats::{csv, json, xlsx, xml};

/// Signature shared by every transform.
pub type TransformFn = fn(&[u8]) -> ConversionResult<Vec<u8>>;

/// Title printed at the top of a JSON table report.
pub const JSON_REPORT_TITLE: &str = "JSON Data Report";

/// The transform implementing `kind`.
pub fn for_kind(kind: ConversionKind) -> TransformFn {
    match kind {
        ConversionKind::CsvToJson => csv_to_json,
        ConversionKind::JsonToCsv => json_to_csv,
        ConversionKind::JsonToXml => json_to_xml,
        ConversionKind::XmlToJson => xml_to_json,
        ConversionKind::CsvToExcel => csv_to_excel,
        ConversionKind::TextToPdf => text_to_pdf,
        ConversionKind::JsonToPdf => json_to_pdf,
    }
}

/// CSV with a header row → pretty-printed JSON array of string-valued objects.
pub fn csv_to_json(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let table = csv::read_table(input)?;
    json::write_pretty(&serde_json::Value::Array(table.to_json_records()))
}

/// JSON array of objects → CSV, columns taken from the first object.
pub fn json_to_csv(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let table = json::read_records(input)?;
    csv::write_table(&table)
}

/// Any JSON document → XML under a `<root>` element.
pub fn json_to_xml(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let value = json::read_value(input)?;
    xml::write_value(&value)
}

/// XML document → pretty-printed JSON.
pub fn xml_to_json(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let value = xml::read_value(input)?;
    json::write_pretty(&value)
}

/// CSV with a header row → single-sheet workbook.
pub fn csv_to_excel(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let table = csv::read_table(input)?;
    xlsx::write_workbook(&table)
}

/// UTF-8 text → PDF, one paragraph per input line.
pub fn text_to_pdf(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let text = std::str::from_utf8(input)
        .map_err(|e| ConversionError::malformed("text", e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut pdf = PdfComposer::new("Text Document")?;
    for line in text.lines() {
        pdf.paragraph(line, BODY_SIZE, false);
    }
    pdf.finish()
}

/// JSON array of objects → PDF report with a title and one table row per object.
pub fn json_to_pdf(input: &[u8]) -> ConversionResult<Vec<u8>> {
    let table = json::read_records(input)?;

    let mut pdf = PdfComposer::new(JSON_REPORT_TITLE)?;
    pdf.paragraph(JSON_REPORT_TITLE, TITLE_SIZE, true);
    pdf.space(6.0);
    pdf.table(&table);
    pdf.finish()
}
