use chrono::{DateTime, Duration, NaiveDate, Utc};
use pair_core::EarningsEstimate;

/// Derive a forward-looking earnings date from possibly-stale sources.
///
/// The calendar entry wins over the timestamp embedded in the
/// fundamentals snapshot; with neither the estimate is `Unknown`. A
/// source date on or after `today` passes through as `Confirmed`. A past
/// date is rolled forward in fixed `quarter_days` steps until it reaches
/// `today` and comes back as `Projected`. The increment is a deliberate
/// approximation of a fiscal quarter, not calendar-quarter arithmetic.
pub fn estimate_earnings(
    calendar: Option<NaiveDate>,
    fundamentals_ts: Option<DateTime<Utc>>,
    today: NaiveDate,
    quarter_days: i64,
) -> EarningsEstimate {
    let source = calendar.or_else(|| fundamentals_ts.map(|ts| ts.date_naive()));
    let Some(mut date) = source else {
        return EarningsEstimate::Unknown;
    };

    if date >= today {
        return EarningsEstimate::Confirmed(date);
    }
    if quarter_days <= 0 {
        // A non-positive increment can never reach today.
        return EarningsEstimate::Unknown;
    }

    while date < today {
        date += Duration::days(quarter_days);
    }
    EarningsEstimate::Projected(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stale_date_rolls_forward_in_91_day_steps() {
        // 2024-01-15 + 91d = 2024-04-15 (still past) + 91d = 2024-07-15
        let estimate = estimate_earnings(Some(date(2024, 1, 15)), None, date(2024, 6, 1), 91);
        assert_eq!(estimate, EarningsEstimate::Projected(date(2024, 7, 15)));
        assert!(estimate.is_estimated());
        assert!(estimate.date().unwrap() >= date(2024, 6, 1));
    }

    #[test]
    fn test_future_date_passes_through_unchanged() {
        let estimate = estimate_earnings(Some(date(2024, 9, 26)), None, date(2024, 6, 1), 91);
        assert_eq!(estimate, EarningsEstimate::Confirmed(date(2024, 9, 26)));
        assert!(!estimate.is_estimated());
    }

    #[test]
    fn test_today_counts_as_future() {
        let estimate = estimate_earnings(Some(date(2024, 6, 1)), None, date(2024, 6, 1), 91);
        assert_eq!(estimate, EarningsEstimate::Confirmed(date(2024, 6, 1)));
    }

    #[test]
    fn test_calendar_wins_over_fundamentals_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap();
        let estimate = estimate_earnings(Some(date(2024, 9, 26)), Some(ts), date(2024, 6, 1), 91);
        assert_eq!(estimate, EarningsEstimate::Confirmed(date(2024, 9, 26)));
    }

    #[test]
    fn test_fundamentals_timestamp_used_when_calendar_absent() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 21, 20, 30, 0).unwrap();
        let estimate = estimate_earnings(None, Some(ts), date(2024, 6, 1), 91);
        // 2024-03-21 + 91d = 2024-06-20
        assert_eq!(estimate, EarningsEstimate::Projected(date(2024, 6, 20)));
    }

    #[test]
    fn test_no_source_is_unknown() {
        assert_eq!(
            estimate_earnings(None, None, date(2024, 6, 1), 91),
            EarningsEstimate::Unknown
        );
    }

    #[test]
    fn test_deeply_stale_date_still_terminates_at_or_after_today() {
        let estimate = estimate_earnings(Some(date(2015, 1, 1)), None, date(2024, 6, 1), 91);
        assert!(estimate.date().unwrap() >= date(2024, 6, 1));
        assert!(estimate.is_estimated());
    }
}
