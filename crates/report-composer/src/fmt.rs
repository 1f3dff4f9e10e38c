//! Display helpers shared by the notification layer. Missing data always
//! renders as an explicit marker, never as a zero pretending to be real.

use pair_core::{CorrelationResult, EarningsEstimate, YieldFigure};

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_signed_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

pub fn format_yield(figure: &YieldFigure) -> String {
    match figure.percent() {
        Some(p) => format!("{p:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_earnings(estimate: &EarningsEstimate) -> String {
    match estimate {
        EarningsEstimate::Confirmed(date) => date.format("%Y-%m-%d").to_string(),
        EarningsEstimate::Projected(date) => format!("~{} (est.)", date.format("%Y-%m-%d")),
        EarningsEstimate::Unknown => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_correlation(result: &CorrelationResult) -> String {
    match result.coefficient() {
        Some(r) => format!("{r:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Recommendation keys arrive lowercased ("buy", "strong_buy"); display
/// them the way the report always has.
pub fn format_recommendation(key: Option<&str>) -> String {
    match key {
        Some(k) => k.replace('_', " ").to_uppercase(),
        None => NOT_AVAILABLE.to_string(),
    }
}
