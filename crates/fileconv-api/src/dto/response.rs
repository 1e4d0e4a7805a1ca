//! Response DTOs.

use serde::{Deserialize, Serialize};

use fileconv_core::types::{ConversionKind, ConversionOutcome};

/// Message returned with a successful conversion.
pub const SUCCESS_MESSAGE: &str = "File converted successfully";
/// Message returned with a failed conversion.
pub const FAILURE_MESSAGE: &str = "Conversion failed";

/// Result of `POST /api/convert/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    /// Whether the artifact was produced.
    pub success: bool,
    /// Summary message.
    pub message: String,
    /// File name as uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file_name: Option<String>,
    /// Generated artifact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_file_name: Option<String>,
    /// Requested conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_type: Option<ConversionKind>,
    /// Size of the stored artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
    /// Where to download the artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Why the conversion failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl ConversionResponse {
    /// A failure with only a message, e.g. an empty upload.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            original_file_name: None,
            converted_file_name: None,
            conversion_type: None,
            file_size_bytes: None,
            download_url: None,
            error_details: None,
        }
    }

    /// A failure before a conversion kind could be determined.
    pub fn failed(original_file_name: &str, details: impl Into<String>) -> Self {
        Self {
            original_file_name: Some(original_file_name.to_string()),
            error_details: Some(details.into()),
            ..Self::rejected(FAILURE_MESSAGE)
        }
    }
}

impl From<&ConversionOutcome> for ConversionResponse {
    fn from(outcome: &ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Success {
                original_file_name,
                generated_file_name,
                kind,
                byte_size,
                download_path,
            } => Self {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
                original_file_name: Some(original_file_name.clone()),
                converted_file_name: Some(generated_file_name.clone()),
                conversion_type: Some(*kind),
                file_size_bytes: Some(*byte_size),
                download_url: Some(download_path.clone()),
                error_details: None,
            },
            ConversionOutcome::Failure {
                original_file_name,
                kind,
                reason,
                ..
            } => Self {
                conversion_type: Some(*kind),
                ..Self::failed(original_file_name, reason.clone())
            },
        }
    }
}

/// One entry of `GET /api/convert/types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionTypeDto {
    /// Wire identifier, e.g. `CSV_TO_JSON`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable label.
    pub description: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status text.
    pub status: String,
    /// Application version.
    pub version: String,
}
