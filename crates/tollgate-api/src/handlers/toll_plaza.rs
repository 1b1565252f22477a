//! Toll plaza endpoints.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the nearby lookup.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    /// Latitude in WGS84 degrees.
    pub latitude: f64,
    /// Longitude in WGS84 degrees.
    pub longitude: f64,
    /// Search radius in kilometers; configuration default when absent.
    pub radius: Option<f64>,
}

/// GET /api/toll-plazas — all plazas, sorted by name
pub async fn list_plazas(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let plazas = state.plaza_service.list_all().await?;
    Ok(Json(json!({ "toll_plazas": plazas })))
}

/// GET /api/toll-plazas/nearby — plazas within a radius, closest first
pub async fn nearby_plazas(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Value>, ApiError> {
    let radius = query
        .radius
        .unwrap_or(state.config.alerts.nearby_radius_km);

    let plazas = state
        .plaza_service
        .nearby(query.latitude, query.longitude, radius)
        .await?;

    Ok(Json(json!({ "toll_plazas": plazas })))
}
