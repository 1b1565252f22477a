//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tracing::info;

use tollgate_core::config::alerts::AlertsConfig;
use tollgate_core::config::realtime::RealtimeConfig;
use tollgate_database::repositories::notification::NotificationStore;
use tollgate_database::repositories::toll_plaza::PlazaDirectory;
use tollgate_database::repositories::user::UserDirectory;
use tollgate_sms::SmsGateway;

use crate::alert::dispatcher::AlertDispatcher;
use crate::alert::engine::AlertEngine;
use crate::connection::registry::ConnectionRegistry;

/// Central real-time engine coordinating connections, dispatch, and the
/// alert decision logic.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection registry.
    pub connections: Arc<ConnectionRegistry>,
    /// Alert dispatcher.
    pub dispatcher: Arc<AlertDispatcher>,
    /// Alert decision engine.
    pub alerts: Arc<AlertEngine>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(
        realtime_config: RealtimeConfig,
        alerts_config: AlertsConfig,
        users: Arc<dyn UserDirectory>,
        plazas: Arc<dyn PlazaDirectory>,
        store: Arc<dyn NotificationStore>,
        sms: Arc<dyn SmsGateway>,
    ) -> Self {
        let connections = Arc::new(ConnectionRegistry::new(realtime_config));
        let dispatcher = Arc::new(AlertDispatcher::new(
            store.clone(),
            users.clone(),
            sms,
            connections.clone(),
            &alerts_config,
        ));
        let alerts = Arc::new(AlertEngine::new(
            users,
            plazas,
            store,
            dispatcher.clone(),
            alerts_config,
        ));

        info!("Real-time engine initialized");

        Self {
            connections,
            dispatcher,
            alerts,
        }
    }

    /// Closes every live connection.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");
        self.connections.close_all();
    }
}
