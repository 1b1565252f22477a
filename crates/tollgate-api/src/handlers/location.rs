//! Location update endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::ApiError;
use crate::extractors::CallerUserId;
use crate::state::AppState;

/// Body of a location report.
#[derive(Debug, Deserialize)]
pub struct LocationUpdateRequest {
    /// Latitude in WGS84 degrees.
    pub latitude: f64,
    /// Longitude in WGS84 degrees.
    pub longitude: f64,
}

/// PUT /api/location — record a position and evaluate alerts
pub async fn update_location(
    State(state): State<AppState>,
    CallerUserId(user_id): CallerUserId,
    Json(body): Json<LocationUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .user_service
        .record_location(user_id, body.latitude, body.longitude)
        .await?;

    // Alerting is advisory: a failed check is logged, never surfaced.
    if let Err(e) = state
        .realtime
        .alerts
        .check_alerts(user_id, body.latitude, body.longitude)
        .await
    {
        warn!(user_id = %user_id, error = %e, "Alert check failed");
    }

    Ok(Json(json!({ "status": "ok" })))
}
