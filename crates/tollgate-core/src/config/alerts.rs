//! Alert engine configuration.

use serde::{Deserialize, Serialize};

/// Alert decision and retention configuration.
///
/// The defaults mirror the observed production behavior: a 2 km proximity
/// radius, a 5 minute anti-spam cooldown, and 30 days of record retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Radius in kilometers within which a toll plaza triggers a
    /// proximity alert.
    #[serde(default = "default_proximity_threshold_km")]
    pub proximity_threshold_km: f64,
    /// Minimum seconds between two alerts of the same (user, kind[, plaza])
    /// key.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
    /// Days a notification record is kept before the retention sweep
    /// removes it.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Default radius in kilometers for the nearby-plaza query.
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_km: default_proximity_threshold_km(),
            cooldown_seconds: default_cooldown_seconds(),
            retention_days: default_retention_days(),
            nearby_radius_km: default_nearby_radius_km(),
        }
    }
}

fn default_proximity_threshold_km() -> f64 {
    2.0
}

fn default_cooldown_seconds() -> u64 {
    300
}

fn default_retention_days() -> u32 {
    30
}

fn default_nearby_radius_km() -> f64 {
    50.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlertsConfig::default();
        assert_eq!(config.proximity_threshold_km, 2.0);
        assert_eq!(config.cooldown_seconds, 300);
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.nearby_radius_km, 50.0);
    }
}
