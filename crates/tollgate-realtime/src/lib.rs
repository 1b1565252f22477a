//! # tollgate-realtime
//!
//! Real-time engine for Tollgate. Provides:
//!
//! - WebSocket connection registry with per-user routing
//! - The alert engine (balance + proximity decisions with cooldown)
//! - Dual-channel dispatch: persisted record + live push + optional SMS
//! - Typed inbound/outbound WebSocket message definitions

pub mod alert;
pub mod connection;
pub mod message;
pub mod server;

pub use alert::dispatcher::AlertDispatcher;
pub use alert::engine::AlertEngine;
pub use connection::registry::ConnectionRegistry;
pub use server::RealtimeEngine;
