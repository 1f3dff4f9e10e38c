use pair_core::{CorrelationStrength, Report, TickerSummary};
use report_composer::fmt;
use serde_json::{json, Value};

const COLOR_GREEN: u32 = 0x00C853;
const COLOR_BLUE: u32 = 0x3498DB;
const COLOR_GOLD: u32 = 0xFFD700;
const COLOR_RED: u32 = 0xFF1744;
const COLOR_GREY: u32 = 0x95A5A6;

fn strength_color(strength: &CorrelationStrength) -> u32 {
    match strength {
        CorrelationStrength::StronglyPositive => COLOR_GREEN,
        CorrelationStrength::ModeratelyPositive => COLOR_BLUE,
        CorrelationStrength::Decoupled => COLOR_GOLD,
        CorrelationStrength::Diverging => COLOR_RED,
        CorrelationStrength::InsufficientData => COLOR_GREY,
    }
}

fn ticker_field(summary: &TickerSummary) -> Value {
    let mut lines = vec![
        format!(
            "Price: **{}** ({})",
            fmt::format_price(summary.latest_close),
            fmt::format_signed_percent(summary.percent_change)
        ),
        format!("Trailing P/E: {}", fmt::format_optional(summary.trailing_pe)),
    ];

    if let Some(earnings) = &summary.earnings {
        lines.push(format!("Next earnings: {}", fmt::format_earnings(earnings)));
        lines.push(format!(
            "Analyst rating: {}",
            fmt::format_recommendation(summary.recommendation.as_deref())
        ));
        lines.push(format!(
            "Target mean: {}",
            fmt::format_optional(summary.target_mean_price)
        ));
    } else {
        lines.push(format!(
            "Dividend yield: {}",
            fmt::format_yield(&summary.dividend_yield)
        ));
    }

    json!({
        "name": summary.symbol,
        "value": lines.join("\n"),
        "inline": true,
    })
}

/// Assemble the Discord embed for one report. Layout: one inline field
/// per ticker, then a full-width linkage field with the coefficient and
/// its assessment. `with_chart` wires the multipart attachment in as the
/// embed image.
pub fn build_report_embed(report: &Report, with_chart: bool) -> Value {
    let correlation_field = json!({
        "name": "Pair linkage (trailing window)",
        "value": format!(
            "**Coefficient: {}**\nAssessment: `{}`",
            fmt::format_correlation(&report.correlation),
            report.strength.to_label()
        ),
        "inline": false,
    });

    let mut embed = json!({
        "title": format!("{} vs {} daily tracker", report.secondary.symbol, report.primary.symbol),
        "description": format!(
            "Report time: {}\n{} is the dominant customer of {}; watch the knock-on effect after the US close.",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.primary.symbol,
            report.secondary.symbol
        ),
        "color": strength_color(&report.strength),
        "fields": [
            ticker_field(&report.primary),
            ticker_field(&report.secondary),
            correlation_field,
        ],
        "footer": { "text": "PairWatch | automated pair report" },
        "timestamp": report.generated_at.to_rfc3339(),
    });

    if with_chart {
        embed["image"] = json!({ "url": "attachment://chart.png" });
    }

    embed
}
