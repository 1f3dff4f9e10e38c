use pair_core::{NormalizedSeries, TickerSeries};

/// Rebase a raw price series to percent change from its first close, for
/// charting two differently-priced tickers on one axis. The first point
/// is always 0. An empty series yields an empty line, not an error.
pub fn normalize(series: &TickerSeries) -> NormalizedSeries {
    let points = match series.points().first() {
        Some(first) if first.close != 0.0 => {
            let base = first.close;
            series
                .points()
                .iter()
                .map(|p| (p.trading_date(), (p.close / base - 1.0) * 100.0))
                .collect()
        }
        _ => Vec::new(),
    };

    NormalizedSeries {
        symbol: series.symbol.clone(),
        points,
    }
}
