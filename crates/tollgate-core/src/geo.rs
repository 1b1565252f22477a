//! Great-circle distance between WGS84 coordinate pairs.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average road speed used for arrival-time estimates, in km/h.
const DEFAULT_AVG_SPEED_KMH: f64 = 60.0;

/// Haversine distance in kilometers between two points.
///
/// Identical points short-circuit to exactly 0.0 rather than going through
/// the trigonometric path. Inputs are assumed to be valid numeric degrees;
/// out-of-range values produce mathematically defined results.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Estimated minutes to cover `distance_km` at the default average speed.
pub fn estimated_arrival_minutes(distance_km: f64) -> u32 {
    estimated_arrival_minutes_at(distance_km, DEFAULT_AVG_SPEED_KMH)
}

/// Estimated minutes to cover `distance_km` at `avg_speed_kmh`.
pub fn estimated_arrival_minutes_at(distance_km: f64, avg_speed_kmh: f64) -> u32 {
    let minutes = (distance_km / avg_speed_kmh * 60.0).round();
    minutes.max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(distance_km(28.6139, 77.2090, 28.6139, 77.2090), 0.0);
        assert_eq!(distance_km(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = distance_km(28.6139, 77.2090, 19.0760, 72.8777);
        let b = distance_km(19.0760, 72.8777, 28.6139, 77.2090);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_delhi_to_mumbai() {
        // Connaught Place to CST, roughly 1150 km great-circle.
        let d = distance_km(28.6139, 77.2090, 19.0760, 72.8777);
        assert!(d > 1150.0 && d < 1160.0, "got {d}");
    }

    #[test]
    fn test_short_distance() {
        // ~1.11 km per 0.01 degree of latitude at the equator.
        let d = distance_km(0.0, 0.0, 0.01, 0.0);
        assert!((d - 1.112).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_arrival_minutes() {
        assert_eq!(estimated_arrival_minutes(60.0), 60);
        assert_eq!(estimated_arrival_minutes(1.0), 1);
        assert_eq!(estimated_arrival_minutes_at(30.0, 120.0), 15);
    }
}
