//! Notification record entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tollgate_core::types::id::{NotificationId, TollPlazaId, UserId};

use super::kind::AlertKind;
use super::status::{DeliveryStatus, SmsStatus};

/// A persisted record of one dispatched alert.
///
/// Created exclusively by the alert dispatcher; afterwards only the SMS
/// outcome fields and the `seen` flip are ever mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRecord {
    /// Unique record identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// The triggering plaza; present only for proximity alerts.
    pub toll_plaza_id: Option<TollPlazaId>,
    /// Alert kind.
    pub kind: AlertKind,
    /// Human-readable alert text, free of trailing timestamps.
    pub message: String,
    /// In-app/push delivery lifecycle.
    pub delivery_status: DeliveryStatus,
    /// SMS channel lifecycle, independent of `delivery_status`.
    pub sms_status: SmsStatus,
    /// Gateway diagnostic, present only when `sms_status` is `Failed`.
    pub sms_error: Option<String>,
    /// Creation timestamp, immutable.
    pub sent_at: DateTime<Utc>,
    /// When the retention sweep may remove this record.
    pub expires_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Build a fresh record for the dispatcher: delivery already `Sent`
    /// (persisting the record is the queuing act), SMS decision `Pending`.
    pub fn new(
        user_id: UserId,
        kind: AlertKind,
        toll_plaza_id: Option<TollPlazaId>,
        message: String,
        retention: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NotificationId::new(),
            user_id,
            toll_plaza_id,
            kind,
            message,
            delivery_status: DeliveryStatus::Sent,
            sms_status: SmsStatus::Pending,
            sms_error: None,
            sent_at: now,
            expires_at: now + retention,
        }
    }

    /// Check if the record has passed its retention window.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_statuses() {
        let record = NotificationRecord::new(
            UserId::new(),
            AlertKind::Balance,
            None,
            "Low balance: ₹150. Minimum threshold: ₹200".to_string(),
            Duration::days(30),
        );
        assert_eq!(record.delivery_status, DeliveryStatus::Sent);
        assert_eq!(record.sms_status, SmsStatus::Pending);
        assert!(record.sms_error.is_none());
        assert!(!record.is_expired());
        assert_eq!(record.expires_at, record.sent_at + Duration::days(30));
    }

    #[test]
    fn test_expiry() {
        let mut record = NotificationRecord::new(
            UserId::new(),
            AlertKind::Proximity,
            Some(TollPlazaId::new()),
            "Approaching Kherki Daula (1.5km away). Fee: ₹65".to_string(),
            Duration::days(30),
        );
        record.expires_at = Utc::now() - Duration::seconds(1);
        assert!(record.is_expired());
    }
}
