//! Notification retention sweep.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use tollgate_core::result::AppResult;
use tollgate_database::repositories::notification::NotificationRepository;

/// Deletes expired notification records and trims per-user overflow.
///
/// Records carry their own `expires_at` (set at dispatch time); the sweep
/// consumes it rather than recomputing ages.
#[derive(Debug)]
pub struct RetentionSweep {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
    /// Max stored records per user.
    max_stored_per_user: i64,
}

impl RetentionSweep {
    /// Create a new retention sweep.
    pub fn new(notification_repo: Arc<NotificationRepository>, max_stored_per_user: i64) -> Self {
        Self {
            notification_repo,
            max_stored_per_user,
        }
    }

    /// Run one sweep pass.
    pub async fn run(&self) -> AppResult<()> {
        let expired = self.notification_repo.delete_expired(Utc::now()).await?;
        let overflow = self
            .notification_repo
            .trim_per_user(self.max_stored_per_user)
            .await?;

        info!(
            expired_removed = expired,
            overflow_removed = overflow,
            max_per_user = self.max_stored_per_user,
            "Notification retention sweep complete"
        );

        Ok(())
    }
}
