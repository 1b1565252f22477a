//! Delivery status enumerations for the in-app and SMS channels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the in-app/push delivery of a notification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "delivery_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Created but not yet handed to any channel.
    Pending,
    /// Record persisted and queued/pushed; the durable "delivered" state.
    Sent,
    /// The user has viewed the notification.
    Seen,
    /// Delivery failed terminally.
    Failed,
}

/// Independent lifecycle of the SMS channel for the same record.
///
/// Transitions only move forward: `Pending` resolves to exactly one of
/// `Sent`, `Failed`, or `NotRequired` and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sms_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SmsStatus {
    /// SMS was never in play for this record.
    Disabled,
    /// An SMS decision is still outstanding.
    Pending,
    /// The gateway accepted the message.
    Sent,
    /// The gateway rejected the message or the call failed.
    Failed,
    /// The dispatcher decided SMS was not wanted (no number or opted out).
    NotRequired,
}

impl DeliveryStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Seen => "seen",
            Self::Failed => "failed",
        }
    }
}

impl SmsStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::NotRequired => "not_required",
        }
    }

    /// Whether the SMS outcome is settled.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SmsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
