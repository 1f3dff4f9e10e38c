use pair_core::{AlignedSeriesPair, CorrelationResult};
use statrs::statistics::Statistics;

/// Pearson correlation over the trailing `window` rows of an aligned pair.
///
/// Fewer than `min_points` rows in the window returns the
/// `InsufficientData` sentinel rather than zero or an error, so callers
/// can say "data insufficient" instead of presenting a fabricated number.
/// Zero variance on either side is numerically undefined and resolves to
/// the same sentinel, never NaN.
pub fn correlate(
    pair: &AlignedSeriesPair,
    window: usize,
    min_points: usize,
) -> CorrelationResult {
    let rows = pair.tail(window);
    if rows.len() < min_points {
        return CorrelationResult::InsufficientData;
    }

    let xs: Vec<f64> = rows.iter().map(|r| r.close_a).collect();
    let ys: Vec<f64> = rows.iter().map(|r| r.close_b).collect();

    let mean_x = xs.as_slice().mean();
    let mean_y = ys.as_slice().mean();
    let sd_x = xs.as_slice().std_dev();
    let sd_y = ys.as_slice().std_dev();

    if sd_x < f64::EPSILON || sd_y < f64::EPSILON {
        return CorrelationResult::InsufficientData;
    }

    let n = rows.len() as f64;
    let covariance = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>()
        / (n - 1.0);

    // Float rounding can nudge the ratio just past the valid range.
    let r = (covariance / (sd_x * sd_y)).clamp(-1.0, 1.0);
    CorrelationResult::Coefficient(r)
}
