//! Connection registry — explicit lifecycle for live user connections.
//!
//! Replaces the usual "global map of sockets" with an injected registry
//! object: the WebSocket handler registers a connection after the client
//! authenticates and unregisters it on close, and the dispatcher looks up
//! live connections by user at push time.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tollgate_core::config::realtime::RealtimeConfig;
use tollgate_core::types::id::UserId;

use crate::message::types::OutboundMessage;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe registry of all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// User ID → connection handles (one user can have several tabs/devices).
    by_user: DashMap<UserId, Vec<Arc<ConnectionHandle>>>,
    /// Connection ID → connection handle for direct lookup.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionRegistry {
    /// Creates a new empty registry.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            by_user: DashMap::new(),
            by_id: DashMap::new(),
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the connection handle and the receiver the transport task
    /// drains for outbound messages.
    pub fn register(
        &self,
        user_id: UserId,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));

        // A user at the connection cap loses their oldest connection.
        let existing = self.user_connections(user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, oldest will be replaced"
            );
            if let Some(oldest) = existing.first() {
                oldest.mark_dead();
                self.unregister(&oldest.id);
            }
        }

        self.by_id.insert(handle.id, handle.clone());
        self.by_user
            .entry(user_id)
            .or_default()
            .push(handle.clone());

        info!(conn_id = %handle.id, user_id = %user_id, "WebSocket connection registered");

        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(conn_id)?;
        handle.mark_dead();

        if let Some(mut connections) = self.by_user.get_mut(&handle.user_id) {
            connections.retain(|c| c.id != *conn_id);
            if connections.is_empty() {
                drop(connections);
                self.by_user.remove(&handle.user_id);
            }
        }

        info!(conn_id = %conn_id, user_id = %handle.user_id, "WebSocket connection unregistered");
        Some(handle)
    }

    /// Pushes a message to every live connection of a user.
    ///
    /// Fire-and-forget: an offline user or a full buffer drops the message
    /// silently.
    pub fn send_to_user(&self, user_id: UserId, message: &OutboundMessage) {
        let connections = self.user_connections(user_id);
        if connections.is_empty() {
            debug!(user_id = %user_id, "No live connection, dropping push");
            return;
        }

        for conn in &connections {
            conn.send(message.clone());
        }
    }

    /// Checks if a user has at least one live connection.
    pub fn is_online(&self, user_id: UserId) -> bool {
        !self.user_connections(user_id).is_empty()
    }

    /// Returns total number of active connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let ids: Vec<ConnectionId> = self.by_id.iter().map(|entry| *entry.key()).collect();
        for id in &ids {
            self.unregister(id);
        }
        info!(count = ids.len(), "All connections closed");
    }

    /// Gets all connections for a user.
    fn user_connections(&self, user_id: UserId) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConnectionRegistry {
        ConnectionRegistry::new(RealtimeConfig::default())
    }

    #[tokio::test]
    async fn test_register_and_unregister() {
        let registry = registry();
        let user_id = UserId::new();
        assert!(!registry.is_online(user_id));

        let (handle, _rx) = registry.register(user_id);
        assert!(registry.is_online(user_id));
        assert_eq!(registry.connection_count(), 1);
        assert_eq!(registry.user_count(), 1);

        registry.unregister(&handle.id);
        assert!(!registry.is_online(user_id));
        assert_eq!(registry.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_send_reaches_every_connection_of_user() {
        let registry = registry();
        let user_id = UserId::new();
        let (_h1, mut rx1) = registry.register(user_id);
        let (_h2, mut rx2) = registry.register(user_id);

        registry.send_to_user(
            user_id,
            &OutboundMessage::Error {
                code: "TEST".to_string(),
                message: "hello".to_string(),
            },
        );

        assert!(matches!(
            rx1.recv().await,
            Some(OutboundMessage::Error { .. })
        ));
        assert!(matches!(
            rx2.recv().await,
            Some(OutboundMessage::Error { .. })
        ));
    }

    #[tokio::test]
    async fn test_send_to_offline_user_is_silent() {
        let registry = registry();
        registry.send_to_user(
            UserId::new(),
            &OutboundMessage::Error {
                code: "TEST".to_string(),
                message: "nobody home".to_string(),
            },
        );
    }

    #[tokio::test]
    async fn test_connection_cap_evicts_oldest() {
        let config = RealtimeConfig {
            max_connections_per_user: 2,
            ..RealtimeConfig::default()
        };
        let registry = ConnectionRegistry::new(config);
        let user_id = UserId::new();

        let (first, _rx1) = registry.register(user_id);
        let (_second, _rx2) = registry.register(user_id);
        let (_third, _rx3) = registry.register(user_id);

        assert_eq!(registry.connection_count(), 2);
        assert!(!first.is_alive());
    }
}
