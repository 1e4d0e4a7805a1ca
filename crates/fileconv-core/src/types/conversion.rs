//! Conversion kinds and the outcome of a single conversion request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Every source → target format pair the service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionKind {
    /// CSV to a JSON array of objects
    CsvToJson,
    /// JSON array of flat objects to CSV
    JsonToCsv,
    /// Arbitrary JSON to XML
    JsonToXml,
    /// XML to JSON
    XmlToJson,
    /// CSV to an `.xlsx` workbook
    CsvToExcel,
    /// Plain text to PDF
    TextToPdf,
    /// JSON array of flat objects to a PDF table
    JsonToPdf,
}

impl ConversionKind {
    /// All kinds, in declaration order.
    pub const ALL: [ConversionKind; 7] = [
        Self::CsvToJson,
        Self::JsonToCsv,
        Self::JsonToXml,
        Self::XmlToJson,
        Self::CsvToExcel,
        Self::TextToPdf,
        Self::JsonToPdf,
    ];

    /// Wire identifier, e.g. `CSV_TO_JSON`.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::CsvToJson => "CSV_TO_JSON",
            Self::JsonToCsv => "JSON_TO_CSV",
            Self::JsonToXml => "JSON_TO_XML",
            Self::XmlToJson => "XML_TO_JSON",
            Self::CsvToExcel => "CSV_TO_EXCEL",
            Self::TextToPdf => "TEXT_TO_PDF",
            Self::JsonToPdf => "JSON_TO_PDF",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CsvToJson => "CSV to JSON",
            Self::JsonToCsv => "JSON to CSV",
            Self::JsonToXml => "JSON to XML",
            Self::XmlToJson => "XML to JSON",
            Self::CsvToExcel => "CSV to Excel",
            Self::TextToPdf => "Text to PDF",
            Self::JsonToPdf => "JSON to PDF",
        }
    }

    /// File extension of the produced artifact.
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::CsvToJson | Self::XmlToJson => "json",
            Self::JsonToCsv => "csv",
            Self::JsonToXml => "xml",
            Self::CsvToExcel => "xlsx",
            Self::TextToPdf | Self::JsonToPdf => "pdf",
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for ConversionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.identifier().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::unsupported_kind(format!("Unsupported conversion type: {wanted}")))
    }
}

/// Result of one conversion request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// The artifact was produced and stored.
    Success {
        /// File name as uploaded.
        original_file_name: String,
        /// Name the artifact is stored and downloadable under.
        generated_file_name: String,
        /// Requested conversion.
        kind: ConversionKind,
        /// Size of the stored artifact.
        byte_size: u64,
        /// Path the artifact can be downloaded from.
        download_path: String,
    },
    /// The conversion was rejected or failed; nothing was stored.
    Failure {
        /// File name as uploaded.
        original_file_name: String,
        /// Requested conversion.
        kind: ConversionKind,
        /// Human-readable reason.
        reason: String,
        /// Error category, used to select a response status.
        error_kind: ErrorKind,
    },
}

impl ConversionOutcome {
    /// Builds a failure outcome from an error.
    pub fn failure(original_file_name: impl Into<String>, kind: ConversionKind, err: &AppError) -> Self {
        Self::Failure {
            original_file_name: original_file_name.into(),
            kind,
            reason: err.message.clone(),
            error_kind: err.kind,
        }
    }

    /// Whether the conversion succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// File name as uploaded.
    pub fn original_file_name(&self) -> &str {
        match self {
            Self::Success { original_file_name, .. } | Self::Failure { original_file_name, .. } => {
                original_file_name
            }
        }
    }

    /// Requested conversion.
    pub fn kind(&self) -> ConversionKind {
        match self {
            Self::Success { kind, .. } | Self::Failure { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for kind in ConversionKind::ALL {
            assert_eq!(kind.identifier().parse::<ConversionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "csv_to_json".parse::<ConversionKind>().unwrap(),
            ConversionKind::CsvToJson
        );
        assert_eq!(
            " Json_To_Pdf ".parse::<ConversionKind>().unwrap(),
            ConversionKind::JsonToPdf
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "PDF_TO_DOCX".parse::<ConversionKind>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedConversionKind);
        assert!(err.message.contains("PDF_TO_DOCX"));
    }

    #[test]
    fn test_serde_uses_wire_identifiers() {
        let json = serde_json::to_string(&ConversionKind::CsvToExcel).unwrap();
        assert_eq!(json, "\"CSV_TO_EXCEL\"");
        let kind: ConversionKind = serde_json::from_str("\"XML_TO_JSON\"").unwrap();
        assert_eq!(kind, ConversionKind::XmlToJson);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ConversionKind::CsvToJson.output_extension(), "json");
        assert_eq!(ConversionKind::XmlToJson.output_extension(), "json");
        assert_eq!(ConversionKind::JsonToCsv.output_extension(), "csv");
        assert_eq!(ConversionKind::JsonToXml.output_extension(), "xml");
        assert_eq!(ConversionKind::CsvToExcel.output_extension(), "xlsx");
        assert_eq!(ConversionKind::TextToPdf.output_extension(), "pdf");
        assert_eq!(ConversionKind::JsonToPdf.output_extension(), "pdf");
    }

    #[test]
    fn test_failure_outcome_from_error() {
        let err = AppError::empty_input("File is empty");
        let outcome = ConversionOutcome::failure("a.csv", ConversionKind::CsvToJson, &err);
        assert!(!outcome.is_success());
        assert_eq!(outcome.original_file_name(), "a.csv");
        assert_eq!(outcome.kind(), ConversionKind::CsvToJson);
        match outcome {
            ConversionOutcome::Failure { reason, error_kind, .. } => {
                assert_eq!(reason, "File is empty");
                assert_eq!(error_kind, ErrorKind::EmptyInput);
            }
            ConversionOutcome::Success { .. } => panic!("expected failure"),
        }
    }
}
