//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/convert/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.conversion_service.store();
    match store.health_check().await {
        Ok(true) => {}
        Ok(false) => warn!(provider = store.provider_type(), "Artifact store is unavailable"),
        Err(e) => warn!(provider = store.provider_type(), error = %e, "Artifact store health check failed"),
    }

    Json(HealthResponse {
        status: "File Converter API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
