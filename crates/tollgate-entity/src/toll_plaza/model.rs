//! Toll plaza entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tollgate_core::types::id::TollPlazaId;

/// A toll plaza with a fixed position and fee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TollPlaza {
    /// Unique plaza identifier.
    pub id: TollPlazaId,
    /// Plaza name.
    pub name: String,
    /// Name of the road the plaza sits on.
    pub road_name: String,
    /// Toll fee in rupees.
    pub toll_fee: f64,
    /// Plaza latitude in WGS84 degrees.
    pub latitude: f64,
    /// Plaza longitude in WGS84 degrees.
    pub longitude: f64,
    /// When the plaza was created.
    pub created_at: DateTime<Utc>,
    /// When the plaza was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TollPlaza {
    /// Distance in kilometers from the given position to this plaza.
    pub fn distance_from(&self, latitude: f64, longitude: f64) -> f64 {
        tollgate_core::geo::distance_km(latitude, longitude, self.latitude, self.longitude)
    }
}
