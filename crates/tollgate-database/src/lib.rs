//! # tollgate-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Tollgate entities.
//!
//! Each repository module also defines the collaborator trait the upper
//! layers consume (`UserDirectory`, `PlazaDirectory`, `NotificationStore`)
//! so the alert engine can be exercised against in-memory test doubles.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
