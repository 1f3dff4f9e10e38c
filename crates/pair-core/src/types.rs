use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single daily close, stamped with the exchange-local time so the
/// trading calendar date survives across time zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<FixedOffset>,
    pub close: f64,
}

impl PricePoint {
    /// Calendar date of the observation at its exchange's offset.
    pub fn trading_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// An ordered daily close history for one symbol, covering the configured
/// trailing window. Ascending by trading date, one point per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl TickerSeries {
    /// Build a series from raw points: sorts by trading date and drops
    /// duplicate dates, keeping the last observation for each.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        let mut by_date = std::collections::BTreeMap::new();
        for point in points {
            by_date.insert(point.trading_date(), point);
        }
        Self {
            symbol: symbol.into(),
            points: by_date.into_values().collect(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last two closes (prior, latest), if the series has them.
    pub fn last_two(&self) -> Option<(&PricePoint, &PricePoint)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((&self.points[n - 2], &self.points[n - 1]))
    }
}

/// Per-ticker fundamentals as reported upstream. Every field is optional;
/// absence is a normal state, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    pub trailing_pe: Option<f64>,
    /// Annual dividend in absolute currency units.
    pub dividend_rate: Option<f64>,
    /// Reported dividend yield as a fraction (0.012 = 1.2%).
    pub dividend_yield: Option<f64>,
    pub target_mean_price: Option<f64>,
    pub recommendation_key: Option<String>,
    /// Next earnings instant as reported; may already be in the past.
    pub earnings_timestamp: Option<DateTime<Utc>>,
}

/// Everything one fetch produces for a symbol.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub series: TickerSeries,
    pub fundamentals: FundamentalsSnapshot,
    /// Single date pulled from the earnings calendar, when present.
    pub earnings_calendar: Option<NaiveDate>,
}

/// One row of the inner join of two series on calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub close_a: f64,
    pub close_b: f64,
}

/// Two series reduced to the dates present in both, ascending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignedSeriesPair {
    pub rows: Vec<AlignedRow>,
}

impl AlignedSeriesPair {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent `window` rows (all of them if fewer exist).
    pub fn tail(&self, window: usize) -> &[AlignedRow] {
        let start = self.rows.len().saturating_sub(window);
        &self.rows[start..]
    }
}

/// Outcome of a correlation computation. `InsufficientData` is a real
/// state surfaced to the reader, never silently rendered as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CorrelationResult {
    Coefficient(f64),
    InsufficientData,
}

impl CorrelationResult {
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            CorrelationResult::Coefficient(r) => Some(*r),
            CorrelationResult::InsufficientData => None,
        }
    }
}

/// Strength bucket for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    StronglyPositive,
    ModeratelyPositive,
    Decoupled,
    Diverging,
    InsufficientData,
}

impl CorrelationStrength {
    /// Bucket a correlation result. 0.7 exactly is moderate (strong is
    /// strict `>`); -0.3 exactly is still decoupled.
    pub fn from_result(result: &CorrelationResult) -> Self {
        match result.coefficient() {
            None => CorrelationStrength::InsufficientData,
            Some(r) if r > 0.7 => CorrelationStrength::StronglyPositive,
            Some(r) if r > 0.3 => CorrelationStrength::ModeratelyPositive,
            Some(r) if r >= -0.3 => CorrelationStrength::Decoupled,
            Some(_) => CorrelationStrength::Diverging,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            CorrelationStrength::StronglyPositive => "strongly positively correlated",
            CorrelationStrength::ModeratelyPositive => "moderately positively correlated",
            CorrelationStrength::Decoupled => "weak/no correlation (decoupled)",
            CorrelationStrength::Diverging => "negatively correlated (diverging)",
            CorrelationStrength::InsufficientData => "insufficient data",
        }
    }
}

/// A forward-looking earnings date. `Projected` means the source date was
/// stale and has been rolled forward in fixed quarterly steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarningsEstimate {
    Confirmed(NaiveDate),
    Projected(NaiveDate),
    Unknown,
}

impl EarningsEstimate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            EarningsEstimate::Confirmed(d) | EarningsEstimate::Projected(d) => Some(*d),
            EarningsEstimate::Unknown => None,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, EarningsEstimate::Projected(_))
    }
}

/// Dividend yield in percent, tagged with how it was obtained.
/// `Unavailable` renders as N/A, never as a fabricated 0%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum YieldFigure {
    /// dividend_rate / latest_close * 100 — preferred, numerically stable.
    ComputedFromRate(f64),
    /// Reported yield fraction * 100 — fallback, can be stale.
    Reported(f64),
    Unavailable,
}

impl YieldFigure {
    pub fn percent(&self) -> Option<f64> {
        match self {
            YieldFigure::ComputedFromRate(p) | YieldFigure::Reported(p) => Some(*p),
            YieldFigure::Unavailable => None,
        }
    }
}

/// Per-ticker slice of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerSummary {
    pub symbol: String,
    pub latest_close: f64,
    pub prior_close: f64,
    pub percent_change: f64,
    pub trailing_pe: Option<f64>,
    pub target_mean_price: Option<f64>,
    pub recommendation: Option<String>,
    pub dividend_yield: YieldFigure,
    /// Only carried for the primary ticker (the customer whose earnings
    /// drive the pair).
    pub earnings: Option<EarningsEstimate>,
}

/// The final immutable report for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub primary: TickerSummary,
    pub secondary: TickerSummary,
    pub correlation: CorrelationResult,
    pub strength: CorrelationStrength,
}

/// A chart-ready point: calendar date and percent change from the first
/// observation of the series.
pub type NormalizedPoint = (NaiveDate, f64);

/// One rebased series for the comparison chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub symbol: String,
    pub points: Vec<NormalizedPoint>,
}
