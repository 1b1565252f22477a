//! Notification listing and housekeeping for UI callers.

use std::sync::Arc;

use tracing::info;

use tollgate_core::result::AppResult;
use tollgate_core::types::id::UserId;
use tollgate_database::repositories::notification::NotificationRepository;
use tollgate_entity::notification::NotificationRecord;

/// Default page size for the recent-notifications list.
const DEFAULT_RECENT_LIMIT: i64 = 20;

/// Read-side access to a user's notification log.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Latest notifications for the user, newest first.
    pub async fn recent(&self, user_id: UserId) -> AppResult<Vec<NotificationRecord>> {
        self.notif_repo
            .find_recent(user_id, DEFAULT_RECENT_LIMIT)
            .await
    }

    /// Count of notifications the user has not seen yet.
    pub async fn unread_count(&self, user_id: UserId) -> AppResult<i64> {
        self.notif_repo.unread_count(user_id).await
    }

    /// Delete every notification belonging to the user.
    pub async fn clear_all(&self, user_id: UserId) -> AppResult<u64> {
        let removed = self.notif_repo.clear_for_user(user_id).await?;
        info!(user_id = %user_id, removed, "Cleared user notifications");
        Ok(removed)
    }
}
