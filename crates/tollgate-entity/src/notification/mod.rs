//! Notification record entity, alert kinds, and delivery status enums.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::AlertKind;
pub use model::NotificationRecord;
pub use status::{DeliveryStatus, SmsStatus};
