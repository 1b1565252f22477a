//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use tollgate_core::types::id::UserId;

use super::settings::UserSettings;

/// A registered vehicle owner with a FASTag account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// E.164 phone number for SMS delivery (absent when never provided).
    pub contact_number: Option<String>,
    /// Vehicle registration number.
    pub vehicle_number: String,
    /// FASTag account identifier.
    pub fastag_id: String,
    /// Current prepaid FASTag balance in rupees.
    pub fastag_balance: f64,
    /// Last reported latitude.
    pub last_known_latitude: Option<f64>,
    /// Last reported longitude.
    pub last_known_longitude: Option<f64>,
    /// When the last position was reported.
    pub last_location_timestamp: Option<DateTime<Utc>>,
    /// Notification settings (JSONB column).
    pub settings: Json<UserSettings>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the user has opted out of all notifications.
    pub fn notifications_enabled(&self) -> bool {
        self.settings.notifications_enabled
    }

    /// Whether the balance is below the user's configured threshold.
    pub fn is_below_balance_threshold(&self) -> bool {
        self.fastag_balance < self.settings.balance_alerts.threshold
    }
}
