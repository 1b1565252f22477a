//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};

use tollgate_core::types::id::{NotificationId, UserId};

use crate::alert::event::AlertEvent;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Bind this connection to a user. Must be the first message.
    Authenticate {
        /// The user taking ownership of the connection.
        user_id: UserId,
    },
    /// Position report from the vehicle.
    LocationUpdate {
        /// Latitude in WGS84 degrees.
        latitude: f64,
        /// Longitude in WGS84 degrees.
        longitude: f64,
    },
    /// Mark notifications as seen.
    MarkRead {
        /// The notification records to flip.
        notification_ids: Vec<NotificationId>,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Alert delivery.
    Notification {
        /// The alert payload.
        data: AlertEvent,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_location_update_parses() {
        let msg: InboundMessage = serde_json::from_str(
            r#"{"type": "location_update", "latitude": 28.6139, "longitude": 77.209}"#,
        )
        .expect("parse");
        assert!(matches!(
            msg,
            InboundMessage::LocationUpdate { latitude, .. } if latitude == 28.6139
        ));
    }

    #[test]
    fn test_inbound_authenticate_parses() {
        let user_id = UserId::new();
        let raw = format!(r#"{{"type": "authenticate", "user_id": "{user_id}"}}"#);
        let msg: InboundMessage = serde_json::from_str(&raw).expect("parse");
        assert!(matches!(
            msg,
            InboundMessage::Authenticate { user_id: parsed } if parsed == user_id
        ));
    }

    #[test]
    fn test_outbound_notification_wire_shape() {
        use crate::alert::event::AlertEvent;
        use chrono::Utc;
        use tollgate_entity::notification::{AlertKind, DeliveryStatus};

        let msg = OutboundMessage::Notification {
            data: AlertEvent {
                id: NotificationId::new(),
                kind: AlertKind::Balance,
                message: "Low balance: ₹150. Minimum threshold: ₹200".to_string(),
                status: DeliveryStatus::Sent,
                sent_at: Utc::now(),
                data: None,
            },
        };
        let json = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(json["type"], "notification");
        assert_eq!(json["data"]["kind"], "balance");
        assert!(json["data"]["data"].is_null());
    }
}
