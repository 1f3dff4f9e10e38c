use chrono::{DateTime, Utc};
use pair_core::{
    ChartRenderer, DeliveryOutcome, MarketDataSource, MarketSnapshot, NormalizedSeries,
    NotificationSink, PairConfig, PipelineError, Report,
};
use report_composer::TickerDataset;

/// One complete run: fetch, analyze, compose, render, deliver. Exactly
/// one report per invocation; there is no retry loop and no state kept
/// between runs.
pub async fn run(
    config: &PairConfig,
    source: &dyn MarketDataSource,
    renderer: &dyn ChartRenderer,
    sink: &dyn NotificationSink,
) -> Result<DeliveryOutcome, PipelineError> {
    // The two fetches are independent; each writes only its own slot.
    let (primary, secondary) = tokio::try_join!(
        source.fetch(&config.primary_symbol, config.history_days),
        source.fetch(&config.secondary_symbol, config.history_days),
    )?;

    let now = Utc::now();
    let (report, chart_primary, chart_secondary) = analyze(config, &primary, &secondary, now)?;

    tracing::info!(
        correlation = %report_composer::fmt::format_correlation(&report.correlation),
        assessment = report.strength.to_label(),
        "pair analytics complete"
    );

    // The chart is decoration; a rendering failure degrades to text-only.
    let image = match renderer.render(&chart_primary, &chart_secondary) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "chart rendering failed, sending text-only report");
            None
        }
    };

    let outcome = sink.deliver(&report, image.as_deref()).await;
    Ok(outcome)
}

/// The purely computational stages, separated from I/O so they can be
/// exercised with synthetic snapshots.
pub fn analyze(
    config: &PairConfig,
    primary: &MarketSnapshot,
    secondary: &MarketSnapshot,
    now: DateTime<Utc>,
) -> Result<(Report, NormalizedSeries, NormalizedSeries), PipelineError> {
    let aligned = pair_analytics::align(&primary.series, &secondary.series);
    tracing::debug!(
        aligned = aligned.len(),
        primary = primary.series.len(),
        secondary = secondary.series.len(),
        "aligned series on calendar date"
    );

    let correlation =
        pair_analytics::correlate(&aligned, config.correlation_window, config.min_points);

    let earnings = pair_analytics::estimate_earnings(
        primary.earnings_calendar,
        primary.fundamentals.earnings_timestamp,
        now.date_naive(),
        config.quarter_days,
    );

    let report = report_composer::compose(
        TickerDataset {
            series: &primary.series,
            fundamentals: &primary.fundamentals,
        },
        TickerDataset {
            series: &secondary.series,
            fundamentals: &secondary.fundamentals,
        },
        correlation,
        earnings,
        now,
    )?;

    let chart_primary = pair_analytics::normalize(&primary.series);
    let chart_secondary = pair_analytics::normalize(&secondary.series);

    Ok((report, chart_primary, chart_secondary))
}
