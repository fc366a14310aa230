//! Service health endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::Value;

use crate::server::AppState;

/// `GET /health` - liveness plus delivery counters. Unauthenticated.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.stats.uptime_seconds(),
        "requests_served": state.stats.requests_served(),
        "bytes_streamed": state.stats.bytes_streamed(),
    }))
}
