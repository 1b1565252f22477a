//! SMS gateway trait and the disabled-mode implementation.

use async_trait::async_trait;
use tracing::debug;

use tollgate_core::result::AppResult;

/// Outbound SMS channel.
///
/// Implementations must treat `send` as best-effort: a returned error is
/// recorded on the notification record by the caller and never aborts the
/// surrounding dispatch.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send `body` to the E.164 number `to`.
    async fn send(&self, to: &str, body: &str) -> AppResult<()>;
}

/// Gateway used when SMS is disabled in configuration. Logs and succeeds.
#[derive(Debug, Default)]
pub struct NoopSmsGateway;

#[async_trait]
impl SmsGateway for NoopSmsGateway {
    async fn send(&self, to: &str, _body: &str) -> AppResult<()> {
        debug!(to = %to, "SMS gateway disabled, dropping message");
        Ok(())
    }
}
