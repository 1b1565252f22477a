//! # tollgate-api
//!
//! The thin HTTP/WebSocket surface over the Tollgate core: a `/ws`
//! endpoint speaking the authenticate/location_update/mark_read protocol,
//! plus JSON endpoints for notifications, location reports, and nearby
//! toll plazas.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
