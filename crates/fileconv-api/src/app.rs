//! Application builder: wires router, middleware and state into an Axum app
//! and runs it.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use fileconv_core::config::AppConfig;
use fileconv_core::error::{AppError, ErrorKind};
use fileconv_service::ConversionService;
use fileconv_storage::LocalArtifactStore;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the application state for `config`: the local artifact store and
/// the conversion service over the standard registry.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let store = LocalArtifactStore::new(&config.storage.output_dir).await?;
    info!(output_dir = %store.root().display(), "Artifact store ready");

    let service = ConversionService::new(Arc::new(store), config.conversion.clone());
    info!(kinds = service.supported_kinds().len(), "Conversion service ready");

    Ok(AppState::new(config, service))
}

/// Runs the FileConv server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(build_state(config).await?);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;
    info!("FileConv server listening on {}", addr);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, draining connections");
        })
        .into_future();

    // Drain in-flight requests for at most the grace period once a signal arrives.
    tokio::select! {
        result = server => result.map_err(|e| {
            AppError::with_source(ErrorKind::Unclassified, "Server error", e)
        })?,
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
        }
    }

    info!("FileConv server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
