//! Draws the two normalized performance lines into a PNG for the
//! notification embed. Either line may be empty; the renderer draws what
//! it has rather than failing, and the whole chart is optional decoration
//! for the pipeline anyway.

use chrono::{Duration, NaiveDate, Utc};
use pair_core::{ChartRenderer, NormalizedSeries, PipelineError};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const PRIMARY_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xDB);
const SECONDARY_COLOR: RGBColor = RGBColor(0xE6, 0x7E, 0x22);

pub struct PngChartRenderer {
    width: u32,
    height: u32,
}

impl PngChartRenderer {
    pub fn new() -> Self {
        Self {
            width: 900,
            height: 480,
        }
    }

    fn scratch_path(primary: &str, secondary: &str) -> PathBuf {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or(0);
        std::env::temp_dir().join(format!(
            "pairwatch_{}_{}_{}.png",
            primary.replace('.', "-"),
            secondary.replace('.', "-"),
            nanos
        ))
    }

    fn draw(
        &self,
        path: &Path,
        primary: &NormalizedSeries,
        secondary: &NormalizedSeries,
        with_text: bool,
    ) -> Result<(), PipelineError> {
        let chart_err = |e: &dyn std::fmt::Display| PipelineError::Chart(e.to_string());

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| chart_err(&e))?;

        let all_points: Vec<&(NaiveDate, f64)> = primary
            .points
            .iter()
            .chain(secondary.points.iter())
            .collect();

        if all_points.is_empty() {
            // Nothing to plot; an empty frame is still a valid chart.
            root.present().map_err(|e| chart_err(&e))?;
            return Ok(());
        }

        let mut x_min = all_points.iter().map(|p| p.0).min().unwrap_or_default();
        let mut x_max = all_points.iter().map(|p| p.0).max().unwrap_or_default();
        if x_min == x_max {
            x_min = x_min - Duration::days(1);
            x_max = x_max + Duration::days(1);
        }
        let y_min = all_points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let y_max = all_points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max);
        let pad = ((y_max - y_min).abs() * 0.08).max(0.5);

        let title = format!("{} vs {} (rebased %)", primary.symbol, secondary.symbol);

        let mut builder = ChartBuilder::on(&root);
        builder.margin(12);
        if with_text {
            builder
                .caption(&title, ("sans-serif", 24))
                .x_label_area_size(32)
                .y_label_area_size(48);
        }
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, (y_min - pad)..(y_max + pad))
            .map_err(|e| chart_err(&e))?;

        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(WHITE.mix(0.6));
        if with_text {
            mesh.y_desc("Change since window start (%)").x_labels(8);
        } else {
            mesh.disable_axes();
        }
        mesh.draw().map_err(|e| chart_err(&e))?;

        for (series, color) in [(primary, PRIMARY_COLOR), (secondary, SECONDARY_COLOR)] {
            if series.points.is_empty() {
                tracing::warn!(symbol = %series.symbol, "no points for chart line");
                continue;
            }
            let drawn = chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(|e| chart_err(&e))?;
            if with_text {
                drawn.label(series.symbol.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            }
        }

        if with_text {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .draw()
                .map_err(|e| chart_err(&e))?;
        }

        root.present().map_err(|e| chart_err(&e))?;
        Ok(())
    }
}

impl Default for PngChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(
        &self,
        primary: &NormalizedSeries,
        secondary: &NormalizedSeries,
    ) -> Result<Vec<u8>, PipelineError> {
        let path = Self::scratch_path(&primary.symbol, &secondary.symbol);

        // Label drawing needs a system font; hosts without one still get
        // the bare lines rather than no chart at all.
        let result = self.draw(&path, primary, secondary, true).or_else(|e| {
            tracing::warn!(error = %e, "labeled chart failed, retrying without text");
            self.draw(&path, primary, secondary, false)
        });

        let bytes = result
            .and_then(|()| std::fs::read(&path).map_err(|e| PipelineError::Chart(e.to_string())));
        let _ = std::fs::remove_file(&path);
        bytes
    }
}
