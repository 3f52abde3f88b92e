//! Monthly totals line chart.

use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const CHART_SIZE: (u32, u32) = (1000, 500);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Render the month -> total line chart to an SVG file.
///
/// An empty totals map still produces a valid (blank) chart so the report
/// image link never dangles.
pub fn render_monthly_totals(
    totals: &BTreeMap<String, f64>,
    output_path: &Path,
) -> Result<(), ChartError> {
    let months: Vec<&String> = totals.keys().collect();
    let values: Vec<f64> = totals.values().copied().collect();

    let root = SVGBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    if !months.is_empty() {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        // Pad the y range so single-point and flat series stay visible
        let pad = ((max - min).abs() * 0.05).max(1.0);
        let y_range = (min - pad)..(max + pad);

        let mut chart = ChartBuilder::on(&root)
            .caption("Monthly Financial Report", ("sans-serif", 28))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0usize..months.len(), y_range)
            .map_err(|e| ChartError::Render(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc("Month")
            .y_desc("Total Amount (USD)")
            .x_labels(months.len())
            .x_label_formatter(&|idx| {
                months
                    .get(*idx)
                    .map(|m| m.to_string())
                    .unwrap_or_default()
            })
            .draw()
            .map_err(|e| ChartError::Render(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i, *v)),
                &BLUE,
            ))
            .map_err(|e| ChartError::Render(e.to_string()))?;

        chart
            .draw_series(
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| Circle::new((i, *v), 4, BLUE.filled())),
            )
            .map_err(|e| ChartError::Render(e.to_string()))?;
    }

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    info!(
        "Rendered monthly totals chart ({} months) to {}",
        months.len(),
        output_path.display()
    );
    Ok(())
}
