//! Alert decision engine.
//!
//! One invocation per position observation: a balance check (independent
//! of position) and a proximity scan over all plazas, each guarded by a
//! per-(user, kind[, plaza]) cooldown against the notification store.
//!
//! The cooldown is check-then-insert without any cross-invocation lock:
//! two near-simultaneous observations for the same user can both pass the
//! existence check before either record lands. Duplicates are rare, not
//! impossible.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use tollgate_core::config::alerts::AlertsConfig;
use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::types::id::UserId;
use tollgate_database::repositories::notification::NotificationStore;
use tollgate_database::repositories::toll_plaza::PlazaDirectory;
use tollgate_database::repositories::user::UserDirectory;
use tollgate_entity::notification::AlertKind;

use super::dispatcher::AlertDispatcher;
use super::event::AlertTrigger;
use super::formatter;

/// Decides which alerts fire for a user's position observation.
pub struct AlertEngine {
    /// User directory.
    users: Arc<dyn UserDirectory>,
    /// Toll plaza directory.
    plazas: Arc<dyn PlazaDirectory>,
    /// Notification store, for cooldown checks.
    store: Arc<dyn NotificationStore>,
    /// Dispatcher for decided alerts.
    dispatcher: Arc<AlertDispatcher>,
    /// Thresholds and cooldown window.
    config: AlertsConfig,
}

impl AlertEngine {
    /// Create a new alert engine.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        plazas: Arc<dyn PlazaDirectory>,
        store: Arc<dyn NotificationStore>,
        dispatcher: Arc<AlertDispatcher>,
        config: AlertsConfig,
    ) -> Self {
        Self {
            users,
            plazas,
            store,
            dispatcher,
            config,
        }
    }

    /// Evaluate balance and proximity alerts for one observation.
    ///
    /// Aborts on a failed user or plaza fetch; alerting is advisory, so
    /// the caller logs and moves on. Alerts already dispatched before an
    /// error stand (best-effort, not transactional).
    pub async fn check_alerts(
        &self,
        user_id: UserId,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<()> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        // Global kill switch, checked before any distance work.
        if !user.notifications_enabled() {
            debug!(user_id = %user_id, "Notifications disabled, skipping alert check");
            return Ok(());
        }

        let since = Utc::now() - Duration::seconds(self.config.cooldown_seconds as i64);

        // Balance check runs once per invocation, independent of position.
        if user.settings.balance_alerts.enabled && user.is_below_balance_threshold() {
            let recent = self
                .store
                .exists_recent(user_id, AlertKind::Balance, None, since)
                .await?;

            if !recent {
                info!(
                    user_id = %user_id,
                    balance = user.fastag_balance,
                    threshold = user.settings.balance_alerts.threshold,
                    "Dispatching balance alert"
                );
                self.dispatcher
                    .dispatch(
                        user_id,
                        AlertTrigger::Balance,
                        &formatter::low_balance_message(
                            user.fastag_balance,
                            user.settings.balance_alerts.threshold,
                        ),
                    )
                    .await?;
            }
        }

        // Every plaza is evaluated independently; plazas close together
        // may all fire in the same pass, each under its own cooldown key.
        let plazas = self.plazas.list_all().await?;
        for plaza in &plazas {
            let distance = plaza.distance_from(latitude, longitude);

            if distance <= self.config.proximity_threshold_km
                && user.settings.proximity_alerts.enabled
            {
                let recent = self
                    .store
                    .exists_recent(user_id, AlertKind::Proximity, Some(plaza.id), since)
                    .await?;

                if !recent {
                    info!(
                        user_id = %user_id,
                        plaza = %plaza.name,
                        distance_km = distance,
                        "Dispatching proximity alert"
                    );
                    self.dispatcher
                        .dispatch(
                            user_id,
                            AlertTrigger::Proximity {
                                toll_plaza_id: plaza.id,
                                plaza_name: plaza.name.clone(),
                                toll_fee: plaza.toll_fee,
                                distance_km: distance,
                            },
                            &formatter::approaching_message(&plaza.name, distance, plaza.toll_fee),
                        )
                        .await?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::testing::{plaza, user_with_settings, InMemoryStore, RecordingSms, TestPlazas, TestUsers};
    use crate::connection::registry::ConnectionRegistry;
    use tollgate_core::config::realtime::RealtimeConfig;
    use tollgate_entity::toll_plaza::TollPlaza;
    use tollgate_entity::user::User;

    // 0.01 degrees of latitude is ~1.11 km; 0.0135 lands at ~1.5 km and
    // 0.027 at ~3.0 km from the origin.
    const NEAR: f64 = 0.0135;
    const FAR: f64 = 0.027;

    struct Fixture {
        store: Arc<InMemoryStore>,
        engine: AlertEngine,
    }

    fn fixture(users: Vec<User>, plazas: Vec<TollPlaza>) -> Fixture {
        let store = Arc::new(InMemoryStore::default());
        let users = Arc::new(TestUsers::with_all(users));
        let connections = Arc::new(ConnectionRegistry::new(RealtimeConfig::default()));
        let config = AlertsConfig::default();
        let dispatcher = Arc::new(AlertDispatcher::new(
            store.clone(),
            users.clone(),
            Arc::new(RecordingSms::default()),
            connections,
            &config,
        ));
        let engine = AlertEngine::new(
            users,
            Arc::new(TestPlazas::new(plazas)),
            store.clone(),
            dispatcher,
            config,
        );
        Fixture { store, engine }
    }

    #[tokio::test]
    async fn test_low_balance_fires_exactly_once() {
        let user = user_with_settings(|_| {});
        let user_id = user.id;
        let f = fixture(vec![user], vec![]);

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");

        let records = f.store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AlertKind::Balance);
        assert!(records[0].message.contains("150"));
        assert!(records[0].message.contains("200"));

        // Second observation inside the cooldown window: no new record.
        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");
        assert_eq!(f.store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_healthy_balance_stays_quiet() {
        let mut user = user_with_settings(|_| {});
        user.fastag_balance = 500.0;
        let user_id = user.id;
        let f = fixture(vec![user], vec![]);

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");
        assert!(f.store.records().is_empty());
    }

    #[tokio::test]
    async fn test_global_toggle_suppresses_everything() {
        let user = user_with_settings(|s| s.notifications_enabled = false);
        let user_id = user.id;
        let f = fixture(vec![user], vec![plaza("Kherki Daula", NEAR, 0.0)]);

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");
        assert!(f.store.records().is_empty());
    }

    #[tokio::test]
    async fn test_proximity_fires_inside_threshold_only() {
        let mut user = user_with_settings(|_| {});
        user.fastag_balance = 500.0;
        let user_id = user.id;
        let near = plaza("Kherki Daula", NEAR, 0.0);
        let near_id = near.id;
        let f = fixture(vec![user], vec![near, plaza("Ghalaunda", FAR, 0.0)]);

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");

        let records = f.store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AlertKind::Proximity);
        assert_eq!(records[0].toll_plaza_id, Some(near_id));
        assert!(records[0].message.contains("Kherki Daula"));
        assert!(records[0].message.contains("1.5km"));
    }

    #[tokio::test]
    async fn test_two_close_plazas_both_fire() {
        let mut user = user_with_settings(|_| {});
        user.fastag_balance = 500.0;
        let user_id = user.id;
        let f = fixture(
            vec![user],
            vec![plaza("North Gate", NEAR, 0.0), plaza("South Gate", -NEAR, 0.0)],
        );

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");
        assert_eq!(f.store.records().len(), 2);

        // Re-entering the same positions inside the cooldown adds nothing.
        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");
        assert_eq!(f.store.records().len(), 2);
    }

    #[tokio::test]
    async fn test_proximity_setting_disables_plaza_alerts() {
        let mut user = user_with_settings(|s| s.proximity_alerts.enabled = false);
        user.fastag_balance = 500.0;
        let user_id = user.id;
        let f = fixture(vec![user], vec![plaza("Kherki Daula", NEAR, 0.0)]);

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");
        assert!(f.store.records().is_empty());
    }

    #[tokio::test]
    async fn test_balance_and_proximity_fire_together() {
        let user = user_with_settings(|_| {});
        let user_id = user.id;
        let f = fixture(vec![user], vec![plaza("Kherki Daula", NEAR, 0.0)]);

        f.engine.check_alerts(user_id, 0.0, 0.0).await.expect("check");

        let mut kinds: Vec<AlertKind> = f.store.records().iter().map(|r| r.kind).collect();
        kinds.sort_by_key(|k| k.as_str());
        assert_eq!(kinds, vec![AlertKind::Balance, AlertKind::Proximity]);
    }

    #[tokio::test]
    async fn test_unknown_user_aborts() {
        let f = fixture(vec![], vec![]);
        let result = f.engine.check_alerts(UserId::new(), 0.0, 0.0).await;
        assert!(result.is_err());
    }
}
