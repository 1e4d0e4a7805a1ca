//! Route definitions for the FileConv HTTP API.
//!
//! All routes are mounted under `/api/convert`. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the upload body limit and
/// request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    Router::new()
        .nest("/api/convert", convert_routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Conversion endpoints
fn convert_routes() -> Router<AppState> {
    Router::new()
        .route("/types", get(handlers::convert::list_types))
        .route("/upload", post(handlers::convert::upload))
        .route("/download/{file_name}", get(handlers::convert::download))
        .route("/health", get(handlers::health::health))
}
