//! # API Module
//!
//! Optional HTTP transport for the MCP dispatcher, for hosts that cannot
//! spawn a stdio process.
//!
//! ## Available Endpoints
//! - `GET /api/health` - Liveness check
//! - `POST /api/rpc` - One JSON-RPC request per call, same methods as stdio

pub mod health;
pub mod rpc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Build the router with all routes mounted under `/api`
pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
