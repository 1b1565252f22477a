//! Health check endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/health — liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/health/detailed — liveness plus database connectivity
pub async fn health_detailed(State(state): State<AppState>) -> Json<Value> {
    let database = state.db.health_check().await.unwrap_or(false);

    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
        "connections": state.realtime.connections.connection_count(),
    }))
}
