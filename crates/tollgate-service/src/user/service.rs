//! Records incoming position reports on the user row.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::types::id::UserId;
use tollgate_database::repositories::user::{UserDirectory, UserRepository};

/// Service for user location updates.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Record the user's last known position.
    ///
    /// Skipped silently when the user has location tracking disabled; the
    /// alert check still runs on the reported coordinates either way.
    pub async fn record_location(
        &self,
        user_id: UserId,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<()> {
        let user = self
            .user_repo
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        if !user.settings.location_tracking {
            debug!(user_id = %user_id, "Location tracking disabled, skipping record");
            return Ok(());
        }

        self.user_repo
            .record_location(user_id, latitude, longitude, Utc::now())
            .await
    }
}
