//! Alert dispatch — persists one record per decision and delivers it over
//! the push and SMS channels.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use tollgate_core::config::alerts::AlertsConfig;
use tollgate_core::result::AppResult;
use tollgate_core::types::id::{NotificationId, UserId};
use tollgate_database::repositories::notification::NotificationStore;
use tollgate_database::repositories::user::UserDirectory;
use tollgate_entity::notification::{NotificationRecord, SmsStatus};
use tollgate_sms::SmsGateway;

use crate::connection::registry::ConnectionRegistry;
use crate::message::types::OutboundMessage;

use super::event::{AlertEvent, AlertTrigger};
use super::formatter;

/// Dual-channel alert delivery.
///
/// The persisted record is the durable source of truth; the live push is
/// fire-and-forget and the SMS attempt is failure-isolated. Neither
/// channel outcome ever aborts a dispatch once the record exists.
pub struct AlertDispatcher {
    /// Notification persistence.
    store: Arc<dyn NotificationStore>,
    /// User directory for contact number and SMS settings.
    users: Arc<dyn UserDirectory>,
    /// SMS gateway.
    sms: Arc<dyn SmsGateway>,
    /// Live connection registry.
    connections: Arc<ConnectionRegistry>,
    /// Record retention window.
    retention: Duration,
}

impl AlertDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        users: Arc<dyn UserDirectory>,
        sms: Arc<dyn SmsGateway>,
        connections: Arc<ConnectionRegistry>,
        config: &AlertsConfig,
    ) -> Self {
        Self {
            store,
            users,
            sms,
            connections,
            retention: Duration::days(config.retention_days as i64),
        }
    }

    /// Persist and deliver one alert. Returns the structured event payload.
    pub async fn dispatch(
        &self,
        user_id: UserId,
        trigger: AlertTrigger,
        message: &str,
    ) -> AppResult<AlertEvent> {
        let message = formatter::clean_message(message);

        let record = NotificationRecord::new(
            user_id,
            trigger.kind(),
            trigger.toll_plaza_id(),
            message.clone(),
            self.retention,
        );
        let record = self.store.create(&record).await?;

        debug!(
            user_id = %user_id,
            notification_id = %record.id,
            kind = %record.kind,
            "Alert record created"
        );

        let user = match self.users.get_user(user_id).await? {
            Some(user) => user,
            None => {
                // The user vanished between decision and dispatch; the
                // record stands, but there is nobody to deliver to.
                warn!(user_id = %user_id, "Dispatch for unknown user, skipping delivery");
                return Ok(self.build_event(&record, &trigger));
            }
        };

        self.resolve_sms(&record, &user, &message).await?;

        let event = self.build_event(&record, &trigger);
        self.connections.send_to_user(
            user_id,
            &OutboundMessage::Notification {
                data: event.clone(),
            },
        );

        Ok(event)
    }

    /// Bulk-flip `sent` records to `seen`, scoped to the owning user.
    pub async fn mark_seen(&self, ids: &[NotificationId], user_id: UserId) -> AppResult<()> {
        let changed = self.store.mark_seen(ids, user_id).await?;
        debug!(user_id = %user_id, requested = ids.len(), changed, "Marked notifications seen");
        Ok(())
    }

    /// Decide and execute the SMS leg, settling `sms_status` on the record.
    async fn resolve_sms(
        &self,
        record: &NotificationRecord,
        user: &tollgate_entity::user::User,
        message: &str,
    ) -> AppResult<()> {
        let number = match &user.contact_number {
            Some(number) if user.settings.sms_allowed_for(record.kind) => number.clone(),
            _ => {
                self.store
                    .update_sms_outcome(record.id, SmsStatus::NotRequired, None)
                    .await?;
                return Ok(());
            }
        };

        match self.sms.send(&number, &formatter::sms_body(message)).await {
            Ok(()) => {
                self.store
                    .update_sms_outcome(record.id, SmsStatus::Sent, None)
                    .await?;
            }
            Err(e) => {
                // Isolated: the record and push stand regardless.
                warn!(
                    user_id = %record.user_id,
                    notification_id = %record.id,
                    error = %e,
                    "SMS delivery failed"
                );
                self.store
                    .update_sms_outcome(
                        record.id,
                        SmsStatus::Failed,
                        Some(formatter::sms_error_text(&e.to_string())),
                    )
                    .await?;
            }
        }

        Ok(())
    }

    fn build_event(&self, record: &NotificationRecord, trigger: &AlertTrigger) -> AlertEvent {
        AlertEvent {
            id: record.id,
            kind: record.kind,
            message: record.message.clone(),
            status: record.delivery_status,
            sent_at: record.sent_at,
            data: trigger.proximity_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::testing::{user_with_settings, InMemoryStore, RecordingSms, TestUsers};
    use tollgate_core::config::realtime::RealtimeConfig;
    use tollgate_core::types::id::TollPlazaId;
    use tollgate_entity::notification::{AlertKind, DeliveryStatus};

    struct Fixture {
        store: Arc<InMemoryStore>,
        sms: Arc<RecordingSms>,
        connections: Arc<ConnectionRegistry>,
        dispatcher: AlertDispatcher,
    }

    fn fixture(users: TestUsers) -> Fixture {
        let store = Arc::new(InMemoryStore::default());
        let sms = Arc::new(RecordingSms::default());
        let connections = Arc::new(ConnectionRegistry::new(RealtimeConfig::default()));
        let dispatcher = AlertDispatcher::new(
            store.clone(),
            Arc::new(users),
            sms.clone(),
            connections.clone(),
            &AlertsConfig::default(),
        );
        Fixture {
            store,
            sms,
            connections,
            dispatcher,
        }
    }

    #[tokio::test]
    async fn test_dispatch_strips_trailing_timestamp() {
        let user = user_with_settings(|_| {});
        let user_id = user.id;
        let f = fixture(TestUsers::with(user));

        let event = f
            .dispatcher
            .dispatch(
                user_id,
                AlertTrigger::Balance,
                "Low balance: ₹150. Minimum threshold: ₹200 2024-01-01T10:00:00.000Z",
            )
            .await
            .expect("dispatch");

        assert_eq!(event.message, "Low balance: ₹150. Minimum threshold: ₹200");
        let records = f.store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, event.message);
    }

    #[tokio::test]
    async fn test_global_sms_toggle_skips_gateway() {
        let user = user_with_settings(|s| s.sms_alerts_enabled = false);
        let user_id = user.id;
        let f = fixture(TestUsers::with(user));

        f.dispatcher
            .dispatch(user_id, AlertTrigger::Balance, "Low balance: ₹150")
            .await
            .expect("dispatch");

        assert!(f.sms.sent().is_empty());
        assert_eq!(f.store.records()[0].sms_status, SmsStatus::NotRequired);
    }

    #[tokio::test]
    async fn test_missing_contact_number_skips_gateway() {
        let mut user = user_with_settings(|_| {});
        user.contact_number = None;
        let user_id = user.id;
        let f = fixture(TestUsers::with(user));

        f.dispatcher
            .dispatch(user_id, AlertTrigger::Balance, "Low balance: ₹150")
            .await
            .expect("dispatch");

        assert!(f.sms.sent().is_empty());
        assert_eq!(f.store.records()[0].sms_status, SmsStatus::NotRequired);
    }

    #[tokio::test]
    async fn test_sms_success_is_tagged_and_recorded() {
        let user = user_with_settings(|_| {});
        let user_id = user.id;
        let f = fixture(TestUsers::with(user));

        f.dispatcher
            .dispatch(user_id, AlertTrigger::Balance, "Low balance: ₹150")
            .await
            .expect("dispatch");

        let sent = f.sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "TollAlert: Low balance: ₹150");
        assert_eq!(f.store.records()[0].sms_status, SmsStatus::Sent);
    }

    #[tokio::test]
    async fn test_sms_failure_is_isolated() {
        let user = user_with_settings(|_| {});
        let user_id = user.id;
        let f = fixture(TestUsers::with(user));
        f.sms.fail_with("invalid number");

        let result = f
            .dispatcher
            .dispatch(user_id, AlertTrigger::Balance, "Low balance: ₹150")
            .await;

        assert!(result.is_ok(), "SMS failure must not abort dispatch");
        let records = f.store.records();
        assert_eq!(records[0].sms_status, SmsStatus::Failed);
        assert!(records[0]
            .sms_error
            .as_deref()
            .unwrap()
            .contains("invalid number"));
    }

    #[tokio::test]
    async fn test_live_connection_receives_push() {
        let user = user_with_settings(|_| {});
        let user_id = user.id;
        let f = fixture(TestUsers::with(user));
        let (_handle, mut rx) = f.connections.register(user_id);

        let toll_plaza_id = TollPlazaId::new();
        f.dispatcher
            .dispatch(
                user_id,
                AlertTrigger::Proximity {
                    toll_plaza_id,
                    plaza_name: "Kherki Daula".to_string(),
                    toll_fee: 65.0,
                    distance_km: 1.5,
                },
                "Approaching Kherki Daula (1.5km away). Fee: ₹65",
            )
            .await
            .expect("dispatch");

        let pushed = rx.recv().await.expect("push");
        match pushed {
            OutboundMessage::Notification { data } => {
                assert_eq!(data.kind, AlertKind::Proximity);
                assert_eq!(data.status, DeliveryStatus::Sent);
                let proximity = data.data.expect("proximity data");
                assert_eq!(proximity.name, "Kherki Daula");
                assert_eq!(proximity.distance_km, 1.5);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mark_seen_scoped_to_owner() {
        let user_a = user_with_settings(|_| {});
        let user_b = user_with_settings(|_| {});
        let (a, b) = (user_a.id, user_b.id);
        let f = fixture(TestUsers::with_all(vec![user_a, user_b]));

        let event_a = f
            .dispatcher
            .dispatch(a, AlertTrigger::Balance, "Low balance: ₹150")
            .await
            .expect("dispatch a");
        let event_b = f
            .dispatcher
            .dispatch(b, AlertTrigger::Balance, "Low balance: ₹90")
            .await
            .expect("dispatch b");

        // A tries to mark both; only A's record flips.
        f.dispatcher
            .mark_seen(&[event_a.id, event_b.id], a)
            .await
            .expect("mark seen");

        let records = f.store.records();
        let status_of = |id| {
            records
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.delivery_status)
                .unwrap()
        };
        assert_eq!(status_of(event_a.id), DeliveryStatus::Seen);
        assert_eq!(status_of(event_b.id), DeliveryStatus::Sent);
    }
}
