//! Operational alerts
//!
//! Alerts are best-effort: a sink never reports failure to its caller and never
//! changes what the user is told. Delivery problems are logged and dropped.

use async_trait::async_trait;

#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Writes alerts to the log only (used when no webhook is configured)
#[derive(Debug, Default)]
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn notify(&self, message: &str) {
        tracing::warn!("ALERT: {}", message);
    }
}

/// Default request timeout for webhook delivery
#[cfg(feature = "api")]
pub const DEFAULT_WEBHOOK_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Posts `{"content": message}` to a chat webhook.
///
/// Each post runs on its own task, so `notify` returns before the webhook
/// answers. Requests give up after the client timeout.
#[cfg(feature = "api")]
pub struct WebhookAlertSink {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "api")]
impl WebhookAlertSink {
    pub fn new(url: impl Into<String>, timeout: std::time::Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }
}

#[cfg(feature = "api")]
#[async_trait]
impl AlertSink for WebhookAlertSink {
    async fn notify(&self, message: &str) {
        let request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "content": message }));

        tokio::spawn(async move {
            match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => tracing::debug!("Alert delivered"),
                Err(e) => tracing::error!("Failed to send alert: {}", e),
            }
        });
    }
}
