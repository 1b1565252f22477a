//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tollgate_core::error::{AppError, ErrorKind};
use tollgate_core::result::AppResult;
use tollgate_core::types::id::UserId;
use tollgate_entity::user::User;

/// Read access to user records, as needed by the alert engine.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by id, with balance, contact number, and settings.
    async fn get_user(&self, id: UserId) -> AppResult<Option<User>>;
}

/// Repository for user rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record the user's last known position.
    pub async fn record_location(
        &self,
        user_id: UserId,
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET last_known_latitude = $2, last_known_longitude = $3, \
             last_location_timestamp = $4, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(latitude)
        .bind(longitude)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record location", e))?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn get_user(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch user", e))
    }
}
