// src/api/health.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

/// Liveness plus whether requests to the platform will carry a bot token.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "botTokenConfigured": state.config.has_bot_token(),
    }))
}
