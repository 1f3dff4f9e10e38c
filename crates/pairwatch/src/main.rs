//! pairwatch: daily supplier/customer pair report.
//!
//! Fetches trailing daily closes and fundamentals for the configured pair
//! (default NKE vs 9910.TW), computes their trailing-window correlation,
//! and posts a Discord embed with a normalized performance chart.
//!
//! Usage:
//!   DISCORD_WEBHOOK_URL=... cargo run -p pairwatch
//!   PAIRWATCH_PRIMARY=AAPL PAIRWATCH_SECONDARY=TSM cargo run -p pairwatch

mod pipeline;

use chart_renderer::PngChartRenderer;
use notification_service::DiscordWebhookSink;
use pair_core::{DeliveryOutcome, PairConfig};
use yahoo_client::YahooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pairwatch=info,yahoo_client=info".into()),
        )
        .init();

    let config = PairConfig::from_env();
    let webhook_url = config
        .webhook_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("DISCORD_WEBHOOK_URL is not set"))?;

    tracing::info!(
        primary = %config.primary_symbol,
        secondary = %config.secondary_symbol,
        history_days = config.history_days,
        "starting pair report run"
    );

    let source = YahooClient::new();
    let renderer = PngChartRenderer::new();
    let sink = DiscordWebhookSink::new(webhook_url);

    let outcome = pipeline::run(&config, &source, &renderer, &sink).await?;

    match outcome {
        DeliveryOutcome::Delivered => tracing::info!("report delivered"),
        DeliveryOutcome::Rejected(status) => {
            tracing::warn!(status, "webhook rejected the report")
        }
        DeliveryOutcome::Unreachable(reason) => {
            tracing::warn!(%reason, "webhook unreachable")
        }
    }

    Ok(())
}
