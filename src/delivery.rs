//! Webhook delivery: one POST, one verdict.

use std::time::Duration;

use tracing::{debug, info};

use crate::embed::WebhookPayload;
use crate::error::{EmbedError, Result};
use crate::model::WebhookTarget;

pub const DEFAULT_WEBHOOK_HOST: &str = "https://discord.com";

/// A CI step should fail, not hang, when the endpoint is unreachable.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DeliveryClient {
    client: reqwest::Client,
    host: String,
    dry_run: bool,
}

impl DeliveryClient {
    pub fn new(host: impl Into<String>, dry_run: bool) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            host: host.into(),
            dry_run,
        })
    }

    /// POST the payload to the target's webhook URL.
    ///
    /// In dry-run mode no connection is opened at all; the serialized
    /// payload is logged for inspection and the delivery counts as a
    /// success. A non-2xx response surfaces as `Rejected`, which the
    /// entrypoint turns into an error annotation and a failing exit.
    pub async fn send(&self, target: &WebhookTarget, payload: &WebhookPayload) -> Result<()> {
        if self.dry_run {
            info!("Dry run: skipping delivery to webhook {}", target.id);
            debug!(
                "Would have sent payload:\n{}",
                serde_json::to_string_pretty(payload).unwrap_or_default()
            );
            return Ok(());
        }

        let response = self
            .client
            .post(target.url(&self.host))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(
                "Successfully delivered webhook (status code: {})",
                status.as_u16()
            );
            Ok(())
        } else {
            Err(EmbedError::Rejected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            })
        }
    }
}

/// Format an error as a GitHub Actions error annotation. Newlines are
/// percent-encoded so multi-line messages stay a single annotation.
pub fn error_annotation(error: &EmbedError) -> String {
    format!("::error::{}", error.to_string().replace('\n', "%0A"))
}
