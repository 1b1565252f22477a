//! Toll plaza repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use tollgate_core::error::{AppError, ErrorKind};
use tollgate_core::result::AppResult;
use tollgate_entity::toll_plaza::TollPlaza;

/// Read access to the toll plaza directory.
///
/// The plaza set is assumed small enough to scan in memory; there is no
/// spatial index at this scale.
#[async_trait]
pub trait PlazaDirectory: Send + Sync {
    /// Fetch every toll plaza.
    async fn list_all(&self) -> AppResult<Vec<TollPlaza>>;
}

/// Repository for toll plaza rows.
#[derive(Debug, Clone)]
pub struct TollPlazaRepository {
    pool: PgPool,
}

impl TollPlazaRepository {
    /// Create a new toll plaza repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlazaDirectory for TollPlazaRepository {
    async fn list_all(&self) -> AppResult<Vec<TollPlaza>> {
        sqlx::query_as::<_, TollPlaza>("SELECT * FROM toll_plazas ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list plazas", e))
    }
}
