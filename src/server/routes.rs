//! HTTP route handlers for the summarization API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::error;

use crate::summarization::core::message::SummaryResult;

use super::error::ApiError;
use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/generate-summary", post(generate_summary))
        .route("/api/logs", get(logs))
        .route("/api/messages", get(messages))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.engine.model_name(),
        "model_loaded": state.engine.model_loaded(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Summarize the conversation in the request body.
async fn generate_summary(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SummaryResult>, ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?;

    let result = state.engine.generate_summary(&payload).await.map_err(|err| {
        if !err.is_client_error() {
            error!("Error processing request: {err}");
        }
        ApiError::from(err)
    })?;

    Ok(Json(result))
}

/// Placeholder kept for API compatibility with existing clients.
async fn logs() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Log endpoint not implemented" }))
}

/// Placeholder kept for API compatibility with existing clients.
async fn messages() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Messages endpoint not implemented" }))
}
