use crate::{MarketSnapshot, NormalizedSeries, PipelineError, Report};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for market data providers.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the trailing `window_days` of daily closes plus the
    /// fundamentals snapshot and earnings calendar entry for `symbol`.
    /// Missing fundamentals or calendar degrade to defaults; only a
    /// missing price history is an error.
    async fn fetch(&self, symbol: &str, window_days: u32)
        -> Result<MarketSnapshot, PipelineError>;
}

/// Trait for chart backends. Either input may be empty; the renderer
/// draws whatever lines it has rather than failing.
pub trait ChartRenderer: Send + Sync {
    fn render(
        &self,
        primary: &NormalizedSeries,
        secondary: &NormalizedSeries,
    ) -> Result<Vec<u8>, PipelineError>;
}

/// What became of a delivery attempt. The pipeline logs this; it does
/// not retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    Delivered,
    /// The sink answered with a non-success status.
    Rejected(u16),
    /// The sink could not be reached at all.
    Unreachable(String),
}

/// Trait for notification channels.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, report: &Report, image: Option<&[u8]>) -> DeliveryOutcome;
    fn name(&self) -> &str;
}
