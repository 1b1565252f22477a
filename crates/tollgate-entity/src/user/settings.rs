//! Per-user notification settings.
//!
//! Stored as a JSONB column on the user row. Every field carries a serde
//! default so settings written by older releases deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::notification::kind::AlertKind;

/// Notification settings for a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// Global kill switch — when false no alert of any kind is evaluated.
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    /// Proximity alert settings.
    #[serde(default)]
    pub proximity_alerts: ProximityAlertSettings,
    /// Balance alert settings.
    #[serde(default)]
    pub balance_alerts: BalanceAlertSettings,
    /// Whether location updates are recorded on the user row.
    #[serde(default = "default_true")]
    pub location_tracking: bool,
    /// Global SMS toggle, independent of the per-kind `sms` flags.
    #[serde(default = "default_true")]
    pub sms_alerts_enabled: bool,
}

/// Settings for toll-plaza proximity alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityAlertSettings {
    /// Whether proximity alerts fire at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether proximity alerts also go out over SMS.
    #[serde(default = "default_true")]
    pub sms: bool,
}

/// Settings for low-balance alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAlertSettings {
    /// Whether balance alerts fire at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether balance alerts also go out over SMS.
    #[serde(default = "default_true")]
    pub sms: bool,
    /// Balance threshold in rupees below which an alert fires.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl UserSettings {
    /// Whether SMS delivery is allowed for alerts of the given kind.
    ///
    /// Requires both the global toggle and the per-kind flag.
    pub fn sms_allowed_for(&self, kind: AlertKind) -> bool {
        if !self.sms_alerts_enabled {
            return false;
        }
        match kind {
            AlertKind::Balance => self.balance_alerts.sms,
            AlertKind::Proximity => self.proximity_alerts.sms,
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            proximity_alerts: ProximityAlertSettings::default(),
            balance_alerts: BalanceAlertSettings::default(),
            location_tracking: true,
            sms_alerts_enabled: true,
        }
    }
}

impl Default for ProximityAlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sms: true,
        }
    }
}

impl Default for BalanceAlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sms: true,
            threshold: default_threshold(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    200.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert!(settings.notifications_enabled);
        assert!(settings.proximity_alerts.enabled);
        assert!(settings.balance_alerts.enabled);
        assert_eq!(settings.balance_alerts.threshold, 200.0);
        assert!(settings.sms_alerts_enabled);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"notifications_enabled": false}"#).expect("deserialize");
        assert!(!settings.notifications_enabled);
        assert!(settings.balance_alerts.enabled);
        assert_eq!(settings.balance_alerts.threshold, 200.0);
    }

    #[test]
    fn test_sms_allowed_respects_global_toggle() {
        let mut settings = UserSettings::default();
        assert!(settings.sms_allowed_for(AlertKind::Balance));

        settings.sms_alerts_enabled = false;
        assert!(!settings.sms_allowed_for(AlertKind::Balance));
        assert!(!settings.sms_allowed_for(AlertKind::Proximity));
    }

    #[test]
    fn test_sms_allowed_respects_per_kind_flag() {
        let mut settings = UserSettings::default();
        settings.proximity_alerts.sms = false;
        assert!(!settings.sms_allowed_for(AlertKind::Proximity));
        assert!(settings.sms_allowed_for(AlertKind::Balance));
    }
}
