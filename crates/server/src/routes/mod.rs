//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the
//! formcheck server. Routes are organized by functionality:
//!
//! - `health`: Health checks and readiness
//! - `classify`: Record classification
//! - `templates`: Template listing and seeding

pub mod classify;
pub mod health;
pub mod templates;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// API version and base info
///
/// Returns server information including the configured title and the
/// available endpoints. This is the root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "formcheck",
///   "description": "Валидатор входящих форм",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": state.config.app_title,
        "description": state.config.app_description,
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/classify",
            "/api/v1/templates",
            "/api/v1/templates/seed",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
