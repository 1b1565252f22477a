//! SMS gateway configuration.

use serde::{Deserialize, Serialize};

/// Twilio-compatible SMS gateway configuration.
///
/// When `enabled` is false the server wires in a no-op gateway and never
/// contacts the external API. Credentials are normally supplied through
/// `TOLLGATE__SMS__*` environment variables rather than the TOML files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Whether the external SMS gateway is wired in at all.
    #[serde(default)]
    pub enabled: bool,
    /// Gateway account SID.
    #[serde(default)]
    pub account_sid: String,
    /// Gateway auth token.
    #[serde(default)]
    pub auth_token: String,
    /// Sender phone number in E.164 form.
    #[serde(default)]
    pub from_number: String,
    /// Base URL of the gateway REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base: default_api_base(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.twilio.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
