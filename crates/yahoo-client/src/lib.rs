//! Yahoo Finance market data source: v8 chart for daily closes, v10
//! quoteSummary for the fundamentals snapshot and earnings calendar.
//!
//! Only a missing price history aborts a run. A failed or partial
//! quoteSummary degrades to an empty fundamentals snapshot so the report
//! renders N/A for the optional fields instead of dying.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use pair_core::{
    FundamentalsSnapshot, MarketDataSource, MarketSnapshot, PipelineError, PricePoint,
    TickerSeries,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; pairwatch/0.1)";

#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        window_days: u32,
    ) -> Result<TickerSeries, PipelineError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}d&interval=1d",
            self.base_url, symbol, window_days
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::Http(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(PipelineError::NoData(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(PipelineError::Http(format!(
                "chart request for {} returned {}",
                symbol,
                response.status()
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Parse(e.to_string()))?;

        parse_chart(symbol, body)
    }

    async fn fetch_quote_summary(&self, symbol: &str) -> Result<QuoteSummaryResult, PipelineError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=summaryDetail,financialData,calendarEvents",
            self.base_url, symbol
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::Http(format!(
                "quoteSummary request for {} returned {}",
                symbol,
                response.status()
            )));
        }

        let body: QuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Parse(e.to_string()))?;

        body.quote_summary
            .and_then(|qs| qs.result.into_iter().flatten().next())
            .ok_or_else(|| PipelineError::Parse(format!("empty quoteSummary for {symbol}")))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn fetch(
        &self,
        symbol: &str,
        window_days: u32,
    ) -> Result<MarketSnapshot, PipelineError> {
        let series = self.fetch_chart(symbol, window_days).await?;
        tracing::debug!(symbol, closes = series.len(), "fetched price history");

        // Fundamentals are decoration; degrade, don't abort.
        let (fundamentals, earnings_calendar) = match self.fetch_quote_summary(symbol).await {
            Ok(result) => parse_quote_summary(result),
            Err(e) => {
                tracing::warn!(symbol, error = %e, "quoteSummary unavailable, degrading to price-only");
                (FundamentalsSnapshot::default(), None)
            }
        };

        Ok(MarketSnapshot {
            series,
            fundamentals,
            earnings_calendar,
        })
    }
}

fn parse_chart(symbol: &str, body: ChartResponse) -> Result<TickerSeries, PipelineError> {
    let result = body
        .chart
        .result
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| PipelineError::NoData(symbol.to_string()))?;

    let offset = FixedOffset::east_opt(result.meta.gmtoffset.unwrap_or(0) as i32)
        .unwrap_or_else(|| Utc.fix());

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    // Halted/holiday slots come back as nulls; skip them.
    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes.iter())
        .filter_map(|(&ts, close)| {
            let close = (*close)?;
            let timestamp = DateTime::from_timestamp(ts, 0)?.with_timezone(&offset);
            Some(PricePoint { timestamp, close })
        })
        .collect();

    if points.is_empty() {
        return Err(PipelineError::NoData(symbol.to_string()));
    }

    Ok(TickerSeries::new(symbol, points))
}

fn parse_quote_summary(result: QuoteSummaryResult) -> (FundamentalsSnapshot, Option<NaiveDate>) {
    let summary = result.summary_detail.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();

    let earnings_ts: Option<DateTime<Utc>> = result
        .calendar_events
        .and_then(|c| c.earnings)
        .and_then(|e| e.earnings_date.into_iter().next())
        .and_then(|v| v.raw)
        .and_then(|raw| DateTime::from_timestamp(raw as i64, 0));

    let fundamentals = FundamentalsSnapshot {
        trailing_pe: summary.trailing_pe.and_then(|v| v.raw),
        dividend_rate: summary.dividend_rate.and_then(|v| v.raw),
        dividend_yield: summary.dividend_yield.and_then(|v| v.raw),
        target_mean_price: financial.target_mean_price.and_then(|v| v.raw),
        recommendation_key: financial.recommendation_key,
        earnings_timestamp: earnings_ts,
    };

    (fundamentals, earnings_ts.map(|ts| ts.date_naive()))
}

// ---- wire format ----

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: Option<QuoteSummary>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetail>,
    #[serde(rename = "financialData")]
    financial_data: Option<FinancialData>,
    #[serde(rename = "calendarEvents")]
    calendar_events: Option<CalendarEvents>,
}

/// Yahoo wraps numbers as `{"raw": 27.3, "fmt": "27.30"}`.
#[derive(Debug, Default, Deserialize)]
struct RawNumber {
    raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawNumber>,
    #[serde(rename = "dividendRate")]
    dividend_rate: Option<RawNumber>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<RawNumber>,
}

#[derive(Debug, Default, Deserialize)]
struct FinancialData {
    #[serde(rename = "targetMeanPrice")]
    target_mean_price: Option<RawNumber>,
    #[serde(rename = "recommendationKey")]
    recommendation_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalendarEvents {
    earnings: Option<CalendarEarnings>,
}

#[derive(Debug, Deserialize)]
struct CalendarEarnings {
    #[serde(rename = "earningsDate", default)]
    earnings_date: Vec<RawNumber>,
}
