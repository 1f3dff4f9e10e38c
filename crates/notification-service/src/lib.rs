//! Discord webhook delivery for the pair report. One attempt per run;
//! the outcome is reported back to the driver, never retried here.

mod embed;

pub use embed::build_report_embed;

use async_trait::async_trait;
use pair_core::{DeliveryOutcome, NotificationSink, Report};

const CHART_FILENAME: &str = "chart.png";

/// Discord webhook notifier.
pub struct DiscordWebhookSink {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordWebhookSink {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn post(
        &self,
        payload: serde_json::Value,
        image: Option<&[u8]>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let request = self.client.post(&self.webhook_url);
        match image {
            Some(bytes) => {
                // Discord wants the embed JSON and the attachment in one
                // multipart body; the embed references the file by name.
                let form = reqwest::multipart::Form::new()
                    .text("payload_json", payload.to_string())
                    .part(
                        "files[0]",
                        reqwest::multipart::Part::bytes(bytes.to_vec())
                            .file_name(CHART_FILENAME)
                            .mime_str("image/png")?,
                    );
                request.multipart(form).send().await
            }
            None => request.json(&payload).send().await,
        }
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhookSink {
    async fn deliver(&self, report: &Report, image: Option<&[u8]>) -> DeliveryOutcome {
        let embed = build_report_embed(report, image.is_some());
        let payload = serde_json::json!({ "embeds": [embed] });

        match self.post(payload, image).await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("webhook accepted report");
                DeliveryOutcome::Delivered
            }
            Ok(response) => DeliveryOutcome::Rejected(response.status().as_u16()),
            Err(e) => DeliveryOutcome::Unreachable(e.to_string()),
        }
    }

    fn name(&self) -> &str {
        "discord-webhook"
    }
}
