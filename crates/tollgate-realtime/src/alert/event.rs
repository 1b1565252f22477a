//! Alert trigger and structured event payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tollgate_core::types::id::{NotificationId, TollPlazaId};
use tollgate_entity::notification::{AlertKind, DeliveryStatus};

/// What caused an alert to fire.
///
/// A closed variant rather than a free-form string: a proximity alert
/// cannot exist without its plaza reference.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertTrigger {
    /// Balance dropped below the user's threshold.
    Balance,
    /// The user came within the proximity radius of a plaza.
    Proximity {
        /// The plaza being approached.
        toll_plaza_id: TollPlazaId,
        /// Plaza name, for the push payload.
        plaza_name: String,
        /// Toll fee in rupees, for the push payload.
        toll_fee: f64,
        /// Computed distance at decision time, in kilometers.
        distance_km: f64,
    },
}

impl AlertTrigger {
    /// The persisted alert kind.
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::Balance => AlertKind::Balance,
            Self::Proximity { .. } => AlertKind::Proximity,
        }
    }

    /// The plaza reference, present only for proximity triggers.
    pub fn toll_plaza_id(&self) -> Option<TollPlazaId> {
        match self {
            Self::Balance => None,
            Self::Proximity { toll_plaza_id, .. } => Some(*toll_plaza_id),
        }
    }

    /// Extra payload data for proximity alerts.
    pub fn proximity_data(&self) -> Option<ProximityData> {
        match self {
            Self::Balance => None,
            Self::Proximity {
                plaza_name,
                toll_fee,
                distance_km,
                ..
            } => Some(ProximityData {
                name: plaza_name.clone(),
                fee: *toll_fee,
                distance_km: (*distance_km * 10.0).round() / 10.0,
            }),
        }
    }
}

/// The structured event pushed to live connections and returned to
/// dispatch callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// The persisted record's id.
    pub id: NotificationId,
    /// Alert kind.
    pub kind: AlertKind,
    /// Alert text as stored.
    pub message: String,
    /// Delivery status at push time.
    pub status: DeliveryStatus,
    /// When the record was created.
    pub sent_at: DateTime<Utc>,
    /// Plaza details, populated only for proximity alerts.
    pub data: Option<ProximityData>,
}

/// Plaza details carried on proximity alert events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityData {
    /// Plaza name.
    pub name: String,
    /// Toll fee in rupees.
    pub fee: f64,
    /// Distance from the user at decision time, one decimal.
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_trigger_has_no_plaza() {
        assert_eq!(AlertTrigger::Balance.kind(), AlertKind::Balance);
        assert!(AlertTrigger::Balance.toll_plaza_id().is_none());
        assert!(AlertTrigger::Balance.proximity_data().is_none());
    }

    #[test]
    fn test_proximity_trigger_rounds_distance() {
        let plaza_id = TollPlazaId::new();
        let trigger = AlertTrigger::Proximity {
            toll_plaza_id: plaza_id,
            plaza_name: "Kherki Daula".to_string(),
            toll_fee: 65.0,
            distance_km: 1.4678,
        };
        assert_eq!(trigger.toll_plaza_id(), Some(plaza_id));
        let data = trigger.proximity_data().expect("data");
        assert_eq!(data.distance_km, 1.5);
        assert_eq!(data.fee, 65.0);
    }
}
