//! Assembles the per-run report from computed analytics and raw
//! fundamentals. Pure: the only clock is the supplied `now`.

pub mod fmt;

use chrono::{DateTime, Utc};
use pair_core::{
    CorrelationResult, CorrelationStrength, EarningsEstimate, FundamentalsSnapshot, PipelineError,
    Report, TickerSeries, TickerSummary, YieldFigure,
};

/// One ticker's inputs to the composer.
#[derive(Debug, Clone, Copy)]
pub struct TickerDataset<'a> {
    pub series: &'a TickerSeries,
    pub fundamentals: &'a FundamentalsSnapshot,
}

/// Build the report. The earnings estimate belongs to the primary ticker
/// (the customer whose results move the pair). A series with fewer than
/// two closes cannot produce a day-over-day change and is a hard error.
pub fn compose(
    primary: TickerDataset<'_>,
    secondary: TickerDataset<'_>,
    correlation: CorrelationResult,
    earnings: EarningsEstimate,
    now: DateTime<Utc>,
) -> Result<Report, PipelineError> {
    let strength = CorrelationStrength::from_result(&correlation);
    Ok(Report {
        generated_at: now,
        primary: summarize(primary, Some(earnings))?,
        secondary: summarize(secondary, None)?,
        correlation,
        strength,
    })
}

fn summarize(
    dataset: TickerDataset<'_>,
    earnings: Option<EarningsEstimate>,
) -> Result<TickerSummary, PipelineError> {
    let (prior, latest) =
        dataset
            .series
            .last_two()
            .ok_or_else(|| PipelineError::InsufficientHistory {
                symbol: dataset.series.symbol.clone(),
                needed: 2,
                got: dataset.series.len(),
            })?;

    let percent_change = (latest.close - prior.close) / prior.close * 100.0;

    Ok(TickerSummary {
        symbol: dataset.series.symbol.clone(),
        latest_close: latest.close,
        prior_close: prior.close,
        percent_change,
        trailing_pe: dataset.fundamentals.trailing_pe,
        target_mean_price: dataset.fundamentals.target_mean_price,
        recommendation: dataset.fundamentals.recommendation_key.clone(),
        dividend_yield: resolve_yield(dataset.fundamentals, latest.close),
        earnings,
    })
}

/// Yield preference order: an absolute dividend rate over the latest
/// close beats the reported yield fraction, which can be stale or
/// mis-scaled upstream. Neither present means no data, not 0%.
fn resolve_yield(fundamentals: &FundamentalsSnapshot, latest_close: f64) -> YieldFigure {
    if let Some(rate) = fundamentals.dividend_rate {
        if latest_close > 0.0 {
            return YieldFigure::ComputedFromRate(rate / latest_close * 100.0);
        }
    }
    match fundamentals.dividend_yield {
        Some(fraction) => YieldFigure::Reported(fraction * 100.0),
        None => YieldFigure::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use pair_core::PricePoint;

    fn series(symbol: &str, closes: &[f64]) -> TickerSeries {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: tz
                    .with_ymd_and_hms(2024, 3, 1 + i as u32, 16, 0, 0)
                    .unwrap(),
                close,
            })
            .collect();
        TickerSeries::new(symbol, points)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn fundamentals() -> FundamentalsSnapshot {
        FundamentalsSnapshot {
            trailing_pe: Some(27.3),
            recommendation_key: Some("buy".to_string()),
            target_mean_price: Some(110.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_percent_change_from_last_two_closes() {
        let primary = series("NKE", &[98.0, 100.0, 103.0]);
        let secondary = series("9910.TW", &[50.0, 49.0]);
        let report = compose(
            TickerDataset {
                series: &primary,
                fundamentals: &fundamentals(),
            },
            TickerDataset {
                series: &secondary,
                fundamentals: &FundamentalsSnapshot::default(),
            },
            CorrelationResult::Coefficient(0.8),
            EarningsEstimate::Unknown,
            now(),
        )
        .unwrap();

        assert_eq!(report.primary.latest_close, 103.0);
        assert_eq!(report.primary.prior_close, 100.0);
        assert!((report.primary.percent_change - 3.0).abs() < 1e-9);
        assert!((report.secondary.percent_change + 2.0).abs() < 1e-9);
        assert_eq!(report.strength, CorrelationStrength::StronglyPositive);
    }

    #[test]
    fn test_single_point_series_is_a_hard_error() {
        let primary = series("NKE", &[100.0]);
        let secondary = series("9910.TW", &[50.0, 49.0]);
        let err = compose(
            TickerDataset {
                series: &primary,
                fundamentals: &FundamentalsSnapshot::default(),
            },
            TickerDataset {
                series: &secondary,
                fundamentals: &FundamentalsSnapshot::default(),
            },
            CorrelationResult::InsufficientData,
            EarningsEstimate::Unknown,
            now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InsufficientHistory { got: 1, .. }
        ));
    }

    #[test]
    fn test_yield_prefers_rate_over_reported_fraction() {
        let snapshot = FundamentalsSnapshot {
            dividend_rate: Some(1.5),
            dividend_yield: Some(0.9), // mis-scaled junk that must lose
            ..Default::default()
        };
        assert_eq!(
            resolve_yield(&snapshot, 100.0),
            YieldFigure::ComputedFromRate(1.5)
        );
    }

    #[test]
    fn test_yield_falls_back_to_reported_fraction() {
        let snapshot = FundamentalsSnapshot {
            dividend_yield: Some(0.032),
            ..Default::default()
        };
        match resolve_yield(&snapshot, 100.0) {
            YieldFigure::Reported(p) => assert!((p - 3.2).abs() < 1e-9),
            other => panic!("expected reported yield, got {other:?}"),
        }
    }

    #[test]
    fn test_yield_without_data_is_unavailable_not_zero() {
        assert_eq!(
            resolve_yield(&FundamentalsSnapshot::default(), 100.0),
            YieldFigure::Unavailable
        );
        // A rate with a degenerate price cannot be computed either.
        let snapshot = FundamentalsSnapshot {
            dividend_rate: Some(1.5),
            ..Default::default()
        };
        assert_eq!(resolve_yield(&snapshot, 0.0), YieldFigure::Unavailable);
    }

    #[test]
    fn test_earnings_attached_to_primary_only() {
        let primary = series("NKE", &[100.0, 101.0]);
        let secondary = series("9910.TW", &[50.0, 51.0]);
        let earnings =
            EarningsEstimate::Projected(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        let report = compose(
            TickerDataset {
                series: &primary,
                fundamentals: &FundamentalsSnapshot::default(),
            },
            TickerDataset {
                series: &secondary,
                fundamentals: &FundamentalsSnapshot::default(),
            },
            CorrelationResult::InsufficientData,
            earnings,
            now(),
        )
        .unwrap();
        assert_eq!(report.primary.earnings, Some(earnings));
        assert!(report.secondary.earnings.is_none());
    }

    #[test]
    fn test_identical_inputs_identical_report() {
        let primary = series("NKE", &[100.0, 101.0]);
        let secondary = series("9910.TW", &[50.0, 51.0]);
        let build = || {
            compose(
                TickerDataset {
                    series: &primary,
                    fundamentals: &fundamentals(),
                },
                TickerDataset {
                    series: &secondary,
                    fundamentals: &FundamentalsSnapshot::default(),
                },
                CorrelationResult::Coefficient(0.42),
                EarningsEstimate::Unknown,
                now(),
            )
            .unwrap()
        };
        let a = build();
        let b = build();
        assert_eq!(a.generated_at, b.generated_at);
        assert_eq!(a.primary.percent_change, b.primary.percent_change);
        assert_eq!(a.correlation, b.correlation);
    }
}
