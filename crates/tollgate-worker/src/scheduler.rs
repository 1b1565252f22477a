//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use tollgate_core::config::worker::WorkerConfig;
use tollgate_core::error::AppError;

use crate::jobs::retention::RetentionSweep;

/// Cron-based scheduler for periodic background tasks
pub struct WorkerScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Retention sweep job
    sweep: Arc<RetentionSweep>,
    /// Worker configuration
    config: WorkerConfig,
}

impl std::fmt::Debug for WorkerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerScheduler").finish()
    }
}

impl WorkerScheduler {
    /// Create a new scheduler
    pub async fn new(sweep: Arc<RetentionSweep>, config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            sweep,
            config,
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_retention_sweep().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Notification retention sweep — hourly by default
    async fn register_retention_sweep(&self) -> Result<(), AppError> {
        let sweep = Arc::clone(&self.sweep);
        let job = CronJob::new_async(self.config.sweep_schedule.as_str(), move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            Box::pin(async move {
                tracing::debug!("Running notification retention sweep");
                if let Err(e) = sweep.run().await {
                    tracing::error!("Retention sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create retention_sweep schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add retention_sweep schedule: {}", e))
        })?;

        tracing::info!(
            "Registered: retention_sweep ({})",
            self.config.sweep_schedule
        );
        Ok(())
    }
}
