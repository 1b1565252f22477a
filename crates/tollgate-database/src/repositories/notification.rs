//! Notification log repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use tollgate_core::error::{AppError, ErrorKind};
use tollgate_core::result::AppResult;
use tollgate_core::types::id::{NotificationId, TollPlazaId, UserId};
use tollgate_entity::notification::{AlertKind, NotificationRecord, SmsStatus};

/// Persistence operations the alert dispatcher and engine depend on.
///
/// The cooldown check is a plain existence query followed by a separate
/// insert; two near-simultaneous checks for the same key can both pass
/// before either insert lands. That race is an accepted property of the
/// design, not closed with a unique index.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Whether a record with the given cooldown key exists at or after
    /// `since`. A `None` plaza matches records of the kind regardless of
    /// plaza.
    async fn exists_recent(
        &self,
        user_id: UserId,
        kind: AlertKind,
        toll_plaza_id: Option<TollPlazaId>,
        since: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Persist a freshly built record.
    async fn create(&self, record: &NotificationRecord) -> AppResult<NotificationRecord>;

    /// Settle the SMS outcome of a record.
    async fn update_sms_outcome(
        &self,
        id: NotificationId,
        status: SmsStatus,
        error: Option<String>,
    ) -> AppResult<()>;

    /// Flip `sent` records to `seen`, scoped to the owning user. Returns
    /// the number of rows changed.
    async fn mark_seen(&self, ids: &[NotificationId], user_id: UserId) -> AppResult<u64>;
}

/// Repository for notification log rows.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Latest notifications for a user, newest first.
    pub async fn find_recent(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> AppResult<Vec<NotificationRecord>> {
        sqlx::query_as::<_, NotificationRecord>(
            "SELECT * FROM notification_log WHERE user_id = $1 ORDER BY sent_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    /// Count records the user has not seen yet.
    pub async fn unread_count(&self, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notification_log WHERE user_id = $1 AND delivery_status = 'sent'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Delete every record belonging to a user. Returns the count removed.
    pub async fn clear_for_user(&self, user_id: UserId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notification_log WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear notifications", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete records whose retention window has passed.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notification_log WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired records", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Keep only the latest N records for each user.
    pub async fn trim_per_user(&self, limit: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notification_log WHERE id IN (\
                SELECT id FROM (\
                    SELECT id, ROW_NUMBER() OVER (PARTITION BY user_id ORDER BY sent_at DESC) as r_num \
                    FROM notification_log\
                ) t WHERE t.r_num > $1\
             )",
        )
        .bind(limit)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trim notifications", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn exists_recent(
        &self,
        user_id: UserId,
        kind: AlertKind,
        toll_plaza_id: Option<TollPlazaId>,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                SELECT 1 FROM notification_log \
                WHERE user_id = $1 AND kind = $2 \
                  AND ($3::uuid IS NULL OR toll_plaza_id = $3) \
                  AND sent_at >= $4\
             )",
        )
        .bind(user_id)
        .bind(kind)
        .bind(toll_plaza_id.map(|p| p.0))
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check recent alerts", e)
        })
    }

    async fn create(&self, record: &NotificationRecord) -> AppResult<NotificationRecord> {
        sqlx::query_as::<_, NotificationRecord>(
            "INSERT INTO notification_log \
             (id, user_id, toll_plaza_id, kind, message, delivery_status, sms_status, sms_error, sent_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.toll_plaza_id)
        .bind(record.kind)
        .bind(&record.message)
        .bind(record.delivery_status)
        .bind(record.sms_status)
        .bind(&record.sms_error)
        .bind(record.sent_at)
        .bind(record.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    async fn update_sms_outcome(
        &self,
        id: NotificationId,
        status: SmsStatus,
        error: Option<String>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE notification_log SET sms_status = $2, sms_error = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(error)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update SMS outcome", e)
            })?;
        Ok(())
    }

    async fn mark_seen(&self, ids: &[NotificationId], user_id: UserId) -> AppResult<u64> {
        let raw_ids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();
        let result = sqlx::query(
            "UPDATE notification_log SET delivery_status = 'seen' \
             WHERE id = ANY($1) AND user_id = $2 AND delivery_status = 'sent'",
        )
        .bind(&raw_ids)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark seen", e))?;
        Ok(result.rows_affected())
    }
}
