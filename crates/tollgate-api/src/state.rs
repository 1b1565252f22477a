//! Shared application state handed to every handler.

use std::sync::Arc;

use tollgate_core::config::AppConfig;
use tollgate_database::DatabasePool;
use tollgate_realtime::RealtimeEngine;
use tollgate_service::notification::NotificationService;
use tollgate_service::toll_plaza::TollPlazaService;
use tollgate_service::user::UserService;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, for health checks.
    pub db: DatabasePool,
    /// Real-time engine (connections, alert engine, dispatcher).
    pub realtime: RealtimeEngine,
    /// Notification read side.
    pub notification_service: Arc<NotificationService>,
    /// User location recording.
    pub user_service: Arc<UserService>,
    /// Plaza listings and nearby queries.
    pub plaza_service: Arc<TollPlazaService>,
}
