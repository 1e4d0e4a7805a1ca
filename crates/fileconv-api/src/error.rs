//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives in `fileconv_core::http_error` (orphan rule);
//! this module re-exports the mapping helpers at their original path.

pub use fileconv_core::http_error::{ApiErrorResponse, status_for};
