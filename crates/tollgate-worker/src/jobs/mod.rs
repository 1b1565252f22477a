//! Scheduled job implementations.

pub mod retention;

pub use retention::RetentionSweep;
