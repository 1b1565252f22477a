//! Notification read-side service.

pub mod service;

pub use service::NotificationService;
