//! # tollgate-worker
//!
//! Background maintenance for Tollgate: a cron-scheduled sweep that
//! removes notification records past their retention window and trims
//! per-user overflow.

pub mod jobs;
pub mod scheduler;

pub use scheduler::WorkerScheduler;
