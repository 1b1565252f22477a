//! In-memory collaborator implementations shared by the alert tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::types::id::{NotificationId, TollPlazaId, UserId};
use tollgate_database::repositories::notification::NotificationStore;
use tollgate_database::repositories::toll_plaza::PlazaDirectory;
use tollgate_database::repositories::user::UserDirectory;
use tollgate_entity::notification::{AlertKind, DeliveryStatus, NotificationRecord, SmsStatus};
use tollgate_entity::toll_plaza::TollPlaza;
use tollgate_entity::user::{User, UserSettings};

/// Notification store backed by a vector, reproducing the repository's
/// check-then-insert cooldown semantics.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<NotificationRecord>>,
}

impl InMemoryStore {
    /// Snapshot of all stored records.
    pub fn records(&self) -> Vec<NotificationRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn exists_recent(
        &self,
        user_id: UserId,
        kind: AlertKind,
        toll_plaza_id: Option<TollPlazaId>,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().any(|r| {
            r.user_id == user_id
                && r.kind == kind
                && toll_plaza_id.map_or(true, |p| r.toll_plaza_id == Some(p))
                && r.sent_at >= since
        }))
    }

    async fn create(&self, record: &NotificationRecord) -> AppResult<NotificationRecord> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record.clone())
    }

    async fn update_sms_outcome(
        &self,
        id: NotificationId,
        status: SmsStatus,
        error: Option<String>,
    ) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.sms_status = status;
            record.sms_error = error;
        }
        Ok(())
    }

    async fn mark_seen(&self, ids: &[NotificationId], user_id: UserId) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let mut changed = 0;
        for record in records.iter_mut() {
            if ids.contains(&record.id)
                && record.user_id == user_id
                && record.delivery_status == DeliveryStatus::Sent
            {
                record.delivery_status = DeliveryStatus::Seen;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// Fixed user directory.
#[derive(Default)]
pub struct TestUsers {
    users: HashMap<UserId, User>,
}

impl TestUsers {
    /// Directory holding a single user.
    pub fn with(user: User) -> Self {
        Self::with_all(vec![user])
    }

    /// Directory holding several users.
    pub fn with_all(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for TestUsers {
    async fn get_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }
}

/// Fixed plaza directory.
pub struct TestPlazas {
    plazas: Vec<TollPlaza>,
}

impl TestPlazas {
    /// Directory over the given plazas.
    pub fn new(plazas: Vec<TollPlaza>) -> Self {
        Self { plazas }
    }
}

#[async_trait]
impl PlazaDirectory for TestPlazas {
    async fn list_all(&self) -> AppResult<Vec<TollPlaza>> {
        Ok(self.plazas.clone())
    }
}

/// SMS gateway that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingSms {
    sent: Mutex<Vec<(String, String)>>,
    failure: Mutex<Option<String>>,
}

impl RecordingSms {
    /// All (to, body) pairs handed to the gateway.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Make every subsequent send fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl tollgate_sms::SmsGateway for RecordingSms {
    async fn send(&self, to: &str, body: &str) -> AppResult<()> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(AppError::external_service(message));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

/// Build a user with default settings, then let the test tweak them.
pub fn user_with_settings(tweak: impl FnOnce(&mut UserSettings)) -> User {
    let mut settings = UserSettings::default();
    tweak(&mut settings);
    let now = Utc::now();
    User {
        id: UserId::new(),
        name: "Asha Verma".to_string(),
        email: "asha@example.com".to_string(),
        contact_number: Some("+919876543210".to_string()),
        vehicle_number: "HR26DK8337".to_string(),
        fastag_id: "34161FA820328AA2".to_string(),
        fastag_balance: 150.0,
        last_known_latitude: None,
        last_known_longitude: None,
        last_location_timestamp: None,
        settings: sqlx::types::Json(settings),
        created_at: now,
        updated_at: now,
    }
}

/// Build a plaza at the given position.
pub fn plaza(name: &str, latitude: f64, longitude: f64) -> TollPlaza {
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
