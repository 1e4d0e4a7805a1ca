//! # fileconv-api
//!
//! HTTP API layer for FileConv built on Axum.
//!
//! Provides the `/api/convert` endpoints, middleware (CORS, request
//! logging, body limit), response DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
