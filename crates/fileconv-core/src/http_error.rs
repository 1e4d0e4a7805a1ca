//! Maps domain `AppError` to HTTP responses.
//!
//! Lives in `fileconv-core` because the orphan rule requires the
//! `IntoResponse` impl to sit in the crate that defines `AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Category message.
    pub message: String,
    /// Error detail.
    pub error: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyInput
        | ErrorKind::MalformedInput
        | ErrorKind::UnsupportedConversionKind
        | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::ArtifactNotFound => StatusCode::NOT_FOUND,
        ErrorKind::UpstreamLimitExceeded => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::Configuration | ErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);
        let message = match self.kind {
            ErrorKind::EmptyInput
            | ErrorKind::MalformedInput
            | ErrorKind::UnsupportedConversionKind => "File conversion failed",
            ErrorKind::InvalidRequest => "Invalid argument",
            ErrorKind::ArtifactNotFound => "File not found",
            ErrorKind::UpstreamLimitExceeded => "File size exceeds maximum allowed size",
            ErrorKind::Configuration | ErrorKind::Unclassified => {
                tracing::error!(error = %self, "Internal server error");
                "Internal server error"
            }
        };

        let body = ApiErrorResponse {
            success: false,
            message: message.to_string(),
            error: self.message,
        };

        (status, Json(body)).into_response()
    }
}

