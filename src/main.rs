//! Tollgate Server — Toll Notification Platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use tollgate_core::config::AppConfig;
use tollgate_core::error::AppError;
use tollgate_database::repositories::notification::{NotificationRepository, NotificationStore};
use tollgate_database::repositories::toll_plaza::{PlazaDirectory, TollPlazaRepository};
use tollgate_database::repositories::user::{UserDirectory, UserRepository};
use tollgate_sms::{NoopSmsGateway, SmsGateway, TwilioSmsClient};

#[tokio::main]
async fn main() {
    let env = std::env::var("TOLLGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Tollgate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = tollgate_database::DatabasePool::connect(&config.database).await?;
    tollgate_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let plaza_repo = Arc::new(TollPlazaRepository::new(db.pool().clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db.pool().clone()));

    // ── Step 3: SMS gateway ──────────────────────────────────────
    let sms: Arc<dyn SmsGateway> = if config.sms.enabled {
        tracing::info!("SMS gateway enabled");
        Arc::new(TwilioSmsClient::new(&config.sms)?)
    } else {
        tracing::info!("SMS gateway disabled");
        Arc::new(NoopSmsGateway)
    };

    // ── Step 4: Real-time engine ─────────────────────────────────
    let realtime = tollgate_realtime::RealtimeEngine::new(
        config.realtime.clone(),
        config.alerts.clone(),
        user_repo.clone() as Arc<dyn UserDirectory>,
        plaza_repo.clone() as Arc<dyn PlazaDirectory>,
        notification_repo.clone() as Arc<dyn NotificationStore>,
        sms,
    );

    // ── Step 5: Services ─────────────────────────────────────────
    let notification_service = Arc::new(
        tollgate_service::notification::NotificationService::new(notification_repo.clone()),
    );
    let user_service = Arc::new(tollgate_service::user::UserService::new(user_repo.clone()));
    let plaza_service = Arc::new(tollgate_service::toll_plaza::TollPlazaService::new(
        plaza_repo.clone(),
    ));

    // ── Step 6: Background worker ────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let sweep = Arc::new(tollgate_worker::jobs::RetentionSweep::new(
            notification_repo.clone(),
            config.worker.max_stored_per_user as i64,
        ));
        let scheduler = tollgate_worker::WorkerScheduler::new(sweep, config.worker.clone()).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 7: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = tollgate_api::AppState {
        config: Arc::new(config),
        db: db.clone(),
        realtime: realtime.clone(),
        notification_service,
        user_service,
        plaza_service,
    };

    let app = tollgate_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Tollgate server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 8: Graceful teardown ────────────────────────────────
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
    realtime.shutdown();
    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("Tollgate server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
