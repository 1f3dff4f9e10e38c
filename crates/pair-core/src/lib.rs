pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::PairConfig;
pub use error::PipelineError;
pub use traits::{ChartRenderer, DeliveryOutcome, MarketDataSource, NotificationSink};
pub use types::{
    AlignedRow, AlignedSeriesPair, CorrelationResult, CorrelationStrength, EarningsEstimate,
    FundamentalsSnapshot, MarketSnapshot, NormalizedPoint, NormalizedSeries, PricePoint, Report,
    TickerSeries, TickerSummary, YieldFigure,
};
