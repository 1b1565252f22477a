//! Twilio-compatible REST API client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use tollgate_core::config::sms::SmsConfig;
use tollgate_core::error::{AppError, ErrorKind};
use tollgate_core::result::AppResult;

use crate::gateway::SmsGateway;
use crate::phone::normalize_number;

/// Client for the Twilio Messages REST endpoint.
#[derive(Debug, Clone)]
pub struct TwilioSmsClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    messages_url: String,
}

impl TwilioSmsClient {
    /// Create a new client from configuration.
    pub fn new(config: &SmsConfig) -> AppResult<Self> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(AppError::configuration(
                "SMS gateway enabled but account_sid/auth_token not set",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build SMS HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            messages_url: messages_url(&config.api_base, &config.account_sid),
        })
    }
}

/// Build the Messages endpoint URL for an account.
fn messages_url(api_base: &str, account_sid: &str) -> String {
    format!(
        "{}/2010-04-01/Accounts/{}/Messages.json",
        api_base.trim_end_matches('/'),
        account_sid
    )
}

#[async_trait]
impl SmsGateway for TwilioSmsClient {
    async fn send(&self, to: &str, body: &str) -> AppResult<()> {
        let to = normalize_number(to);

        let params = [
            ("To", to.as_str()),
            ("From", self.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .http
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("SMS gateway request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(to = %to, status = %status, "SMS gateway rejected message");
            return Err(AppError::external_service(format!(
                "SMS gateway returned {status}: {detail}"
            )));
        }

        debug!(to = %to, "SMS accepted by gateway");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        assert_eq!(
            messages_url("https://api.twilio.com", "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
        assert_eq!(
            messages_url("https://api.twilio.com/", "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }
}
