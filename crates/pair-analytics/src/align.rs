use pair_core::{AlignedRow, AlignedSeriesPair, TickerSeries};
use std::collections::BTreeMap;

/// Inner-join two series on calendar date.
///
/// The series may originate from exchanges in different time zones; each
/// point's exchange-local trading date is the join key, so a US close and
/// a Taiwan close on the same calendar day land in the same row. Dates
/// missing from either side are dropped. An empty result is valid and is
/// handled by the correlation engine's sufficiency rule.
pub fn align(a: &TickerSeries, b: &TickerSeries) -> AlignedSeriesPair {
    let b_by_date: BTreeMap<_, _> = b
        .points()
        .iter()
        .map(|p| (p.trading_date(), p.close))
        .collect();

    // `a` is ascending by date, so the join output is too.
    let rows = a
        .points()
        .iter()
        .filter_map(|p| {
            b_by_date.get(&p.trading_date()).map(|&close_b| AlignedRow {
                date: p.trading_date(),
                close_a: p.close,
                close_b,
            })
        })
        .collect();

    AlignedSeriesPair { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use pair_core::PricePoint;

    fn series_at(symbol: &str, offset_hours: i32, days: &[(u32, f64)]) -> TickerSeries {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let points = days
            .iter()
            .map(|&(day, close)| PricePoint {
                timestamp: tz.with_ymd_and_hms(2024, 3, day, 13, 30, 0).unwrap(),
                close,
            })
            .collect();
        TickerSeries::new(symbol, points)
    }

    #[test]
    fn test_disjoint_dates_align_empty() {
        let a = series_at("NKE", -5, &[(1, 100.0), (2, 101.0)]);
        let b = series_at("9910.TW", 8, &[(3, 50.0), (4, 51.0)]);
        assert!(align(&a, &b).is_empty());
    }

    #[test]
    fn test_identical_dates_align_fully() {
        let a = series_at("NKE", -5, &[(1, 100.0), (2, 101.0), (3, 102.0)]);
        let b = series_at("9910.TW", 8, &[(1, 50.0), (2, 51.0), (3, 52.0)]);
        let pair = align(&a, &b);
        assert_eq!(pair.len(), a.len());
        assert_eq!(pair.rows[0].close_a, 100.0);
        assert_eq!(pair.rows[0].close_b, 50.0);
    }

    #[test]
    fn test_partial_overlap_keeps_intersection_in_order() {
        let a = series_at("NKE", -5, &[(1, 100.0), (2, 101.0), (4, 103.0)]);
        let b = series_at("9910.TW", 8, &[(2, 51.0), (3, 52.0), (4, 53.0)]);
        let pair = align(&a, &b);
        assert_eq!(pair.len(), 2);
        assert!(pair.rows[0].date < pair.rows[1].date);
        assert_eq!(pair.rows[1].close_a, 103.0);
        assert_eq!(pair.rows[1].close_b, 53.0);
    }

    #[test]
    fn test_time_of_day_and_zone_are_ignored() {
        // Same calendar date recorded at different local times/offsets.
        let ny = FixedOffset::west_opt(5 * 3600).unwrap();
        let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
        let a = TickerSeries::new(
            "NKE",
            vec![PricePoint {
                timestamp: ny.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap(),
                close: 100.0,
            }],
        );
        let b = TickerSeries::new(
            "9910.TW",
            vec![PricePoint {
                timestamp: taipei.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap(),
                close: 50.0,
            }],
        );
        assert_eq!(align(&a, &b).len(), 1);
    }
}
