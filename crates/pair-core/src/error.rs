use thiserror::Error;

/// Errors a pipeline run can abort with. Missing optional data never
/// lands here; it resolves locally to sentinels (`InsufficientData`,
/// `Unknown`, N/A markers) so the report stays composable.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A raw series too short to compute a day-over-day change from.
    #[error("insufficient history for {symbol}: need {needed} closes, got {got}")]
    InsufficientHistory {
        symbol: String,
        needed: usize,
        got: usize,
    },

    /// Unknown symbol or empty price history upstream.
    #[error("no price data for symbol {0}")]
    NoData(String),

    #[error("market data request failed: {0}")]
    Http(String),

    #[error("could not parse market data response: {0}")]
    Parse(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
