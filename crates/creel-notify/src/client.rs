//! Webhook delivery client

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::NotifyError;

/// Webhook delivery client
///
/// Wraps a shared reqwest client with a bounded per-request timeout so
/// a slow subscriber cannot hold a delivery task indefinitely.
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    /// Create a new notifier
    pub fn new(timeout_secs: u64) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    /// Deliver a payload to a single subscriber
    pub async fn deliver(&self, url: &str, payload: &Value) -> Result<(), NotifyError> {
        let response = self.client.post(url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        debug!("Delivered webhook notification to {}", url);
        Ok(())
    }

    /// Fan a payload out to every subscriber endpoint
    ///
    /// Best-effort: a failing endpoint is logged and skipped, it never
    /// aborts delivery to the remaining subscribers.
    pub async fn broadcast(&self, endpoints: Vec<String>, payload: Value) {
        let total = endpoints.len();
        let mut delivered = 0usize;

        for url in endpoints {
            match self.deliver(&url, &payload).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Webhook delivery to {} failed: {}", url, e),
            }
        }

        if total > 0 {
            info!("Webhook fan-out complete: {}/{} delivered", delivered, total);
        }
    }
}
