//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use fileconv_core::config::AppConfig;
use fileconv_service::ConversionService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Conversion orchestrator
    pub conversion_service: Arc<ConversionService>,
}

impl AppState {
    /// Bundle configuration and services.
    pub fn new(config: AppConfig, conversion_service: ConversionService) -> Self {
        Self {
            config: Arc::new(config),
            conversion_service: Arc::new(conversion_service),
        }
    }
}
