//! Nearby toll plaza lookup.

use std::sync::Arc;

use serde::Serialize;

use tollgate_core::geo;
use tollgate_core::result::AppResult;
use tollgate_database::repositories::toll_plaza::{PlazaDirectory, TollPlazaRepository};
use tollgate_entity::toll_plaza::TollPlaza;

/// A plaza annotated with its distance from a query position.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyPlaza {
    /// The plaza itself.
    #[serde(flatten)]
    pub plaza: TollPlaza,
    /// Distance from the query position, rounded to one decimal.
    pub distance_km: f64,
    /// Estimated minutes to reach the plaza at average road speed.
    pub estimated_arrival_minutes: u32,
}

/// Service for plaza listings and nearby queries.
#[derive(Debug, Clone)]
pub struct TollPlazaService {
    /// Toll plaza repository.
    plaza_repo: Arc<TollPlazaRepository>,
}

impl TollPlazaService {
    /// Creates a new toll plaza service.
    pub fn new(plaza_repo: Arc<TollPlazaRepository>) -> Self {
        Self { plaza_repo }
    }

    /// All plazas, sorted by name.
    pub async fn list_all(&self) -> AppResult<Vec<TollPlaza>> {
        self.plaza_repo.list_all().await
    }

    /// Plazas within `radius_km` of the position, closest first.
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> AppResult<Vec<NearbyPlaza>> {
        let plazas = self.plaza_repo.list_all().await?;
        Ok(rank_nearby(plazas, latitude, longitude, radius_km))
    }
}

/// Filter plazas to the radius and sort by ascending distance.
fn rank_nearby(
    plazas: Vec<TollPlaza>,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Vec<NearbyPlaza> {
    let mut nearby: Vec<NearbyPlaza> = plazas
        .into_iter()
        .filter_map(|plaza| {
            let distance = geo::distance_km(latitude, longitude, plaza.latitude, plaza.longitude);
            if distance <= radius_km {
                Some(NearbyPlaza {
                    distance_km: (distance * 10.0).round() / 10.0,
                    estimated_arrival_minutes: geo::estimated_arrival_minutes(distance),
                    plaza,
                })
            } else {
                None
            }
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tollgate_core::types::id::TollPlazaId;

    fn plaza(name: &str, latitude: f64, longitude: f64) -> TollPlaza {
        let now = Utc::now();
        TollPlaza {
            id: TollPlazaId::new(),
            name: name.to_string(),
            road_name: "NH48".to_string(),
            toll_fee: 65.0,
            latitude,
            longitude,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_filters_by_radius_and_sorts() {
        // Offsets of 0.01 degrees latitude are ~1.11 km each.
        let plazas = vec![
            plaza("far", 1.0, 0.0),
            plaza("near", 0.01, 0.0),
            plaza("mid", 0.05, 0.0),
        ];

        let ranked = rank_nearby(plazas, 0.0, 0.0, 50.0);
        let names: Vec<&str> = ranked.iter().map(|n| n.plaza.name.as_str()).collect();
        assert_eq!(names, vec!["near", "mid"]);
    }

    #[test]
    fn test_distance_rounded_to_one_decimal() {
        let ranked = rank_nearby(vec![plaza("near", 0.01, 0.0)], 0.0, 0.0, 50.0);
        assert_eq!(ranked[0].distance_km, 1.1);
    }

    #[test]
    fn test_empty_when_all_out_of_range() {
        let ranked = rank_nearby(vec![plaza("far", 10.0, 10.0)], 0.0, 0.0, 50.0);
        assert!(ranked.is_empty());
    }
}
