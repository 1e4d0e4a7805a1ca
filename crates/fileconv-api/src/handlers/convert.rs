//! Conversion handlers: list kinds, upload and convert, download artifacts.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::info;

use fileconv_core::error::AppError;
use fileconv_core::types::{ConversionKind, ConversionOutcome};

use crate::dto::response::{ConversionResponse, ConversionTypeDto};
use crate::error::status_for;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const KIND_FIELD: &str = "conversionType";

/// GET /api/convert/types
pub async fn list_types(State(state): State<AppState>) -> Json<Vec<ConversionTypeDto>> {
    let types = state
        .conversion_service
        .supported_kinds()
        .into_iter()
        .map(|(kind, label)| ConversionTypeDto {
            kind: kind.identifier().to_string(),
            description: label.to_string(),
        })
        .collect();
    Json(types)
}

/// POST /api/convert/upload, multipart with `file` and `conversionType`
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let limit_label = state.config.storage.max_upload_label();
    let mut file: Option<(String, Bytes)> = None;
    let mut kind_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &limit_label))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FILE_FIELD => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, &limit_label))?;
                file = Some((file_name, data));
            }
            KIND_FIELD => {
                kind_text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, &limit_label))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, data) = file.ok_or_else(|| {
        AppError::invalid_request(format!("Required part '{FILE_FIELD}' is not present"))
    })?;
    let kind_text = kind_text.ok_or_else(|| {
        AppError::invalid_request(format!("Required parameter '{KIND_FIELD}' is not present"))
    })?;

    info!(file = %file_name, kind = %kind_text, bytes = data.len(), "Received conversion request");

    if data.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ConversionResponse::rejected("File is empty")),
        )
            .into_response());
    }

    let kind = match kind_text.parse::<ConversionKind>() {
        Ok(kind) => kind,
        Err(err) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ConversionResponse::failed(&file_name, err.message)),
            )
                .into_response());
        }
    };

    let outcome = state
        .conversion_service
        .convert(data, &file_name, kind)
        .await;

    let status = match &outcome {
        ConversionOutcome::Success { .. } => StatusCode::OK,
        ConversionOutcome::Failure { error_kind, .. } => status_for(*error_kind),
    };

    Ok((status, Json(ConversionResponse::from(&outcome))).into_response())
}

/// GET /api/convert/download/{file_name}
pub async fn download(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    info!(file = %file_name, "Download request");

    let (stream, meta) = state.conversion_service.open(&file_name).await?;
    let content_type = meta
        .mime_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", meta.name),
        )
        .header(header::CONTENT_LENGTH, meta.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::unclassified(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Translate a multipart failure. A body over the configured limit is
/// reported as such; anything else is a bad request.
fn multipart_error(err: MultipartError, limit_label: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::limit_exceeded(format!("Maximum upload size is {limit_label}"))
    } else {
        AppError::invalid_request(format!("Malformed multipart request: {}", err.body_text()))
    }
}
