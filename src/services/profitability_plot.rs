use plotters::prelude::*;
use thiserror::Error;

use crate::domain::derived_metrics::{DerivedMetrics, ProjectionSource};
use crate::domain::site::SiteDataset;

#[derive(Error, Debug)]
pub enum ProfitabilityPlotError {
    #[error("dataset has no monthly records to plot")]
    EmptyDataset,
    #[error("month {0} is too large to plot")]
    MonthOutOfRange(u32),
    #[error("failed to render profitability plot: {0}")]
    Render(String),
}

pub fn write_profitability_png(
    output_path: &str,
    dataset: &SiteDataset,
    metrics: &DerivedMetrics,
) -> Result<(), ProfitabilityPlotError> {
    if metrics.net_position.is_empty() {
        return Err(ProfitabilityPlotError::EmptyDataset);
    }

    let actual = dataset
        .monthly_data()
        .iter()
        .zip(&metrics.net_position)
        .map(|(record, position)| Ok((plot_month(record.month())?, *position)))
        .collect::<Result<Vec<(i32, f64)>, ProfitabilityPlotError>>()?;

    // The projected line starts at the last actual point so the two join up.
    let mut projected: Vec<(i32, f64)> = actual.last().copied().into_iter().collect();
    let mut running = metrics.net_position.last().copied().unwrap_or(0.0);
    for record in &metrics.projected_series {
        running += record.profit();
        projected.push((plot_month(record.month())?, running));
    }

    render_plot_png(output_path, dataset.site_name(), &actual, &projected, metrics.projection_source)
}

fn plot_month(month: u32) -> Result<i32, ProfitabilityPlotError> {
    i32::try_from(month).map_err(|_| ProfitabilityPlotError::MonthOutOfRange(month))
}

fn render_plot_png(
    output_path: &str,
    site_name: &str,
    actual: &[(i32, f64)],
    projected: &[(i32, f64)],
    projection_source: ProjectionSource,
) -> Result<(), ProfitabilityPlotError> {
    let points = || actual.iter().chain(projected.iter());
    let min_x = points().map(|(month, _)| *month).min().unwrap_or(1);
    let max_x = points().map(|(month, _)| *month).max().unwrap_or(1).max(min_x.saturating_add(1));
    let min_y = points().map(|(_, value)| *value).fold(0.0_f64, f64::min);
    let max_y = points().map(|(_, value)| *value).fold(0.0_f64, f64::max);
    let padding = ((max_y - min_y) * 0.05).max(1.0);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("Path to Profitability: {site_name}"), ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(90)
        .build_cartesian_2d(min_x..max_x, (min_y - padding)..(max_y + padding))
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Month")
        .y_desc("Net position")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|month| format!("M{month}"))
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?;

    let break_even_color = RGBColor(120, 120, 120);
    chart
        .draw_series(LineSeries::new(
            [(min_x, 0.0), (max_x, 0.0)],
            ShapeStyle::from(&break_even_color).stroke_width(1),
        ))
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?
        .label("Break-even")
        .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], ShapeStyle::from(&break_even_color)));

    let actual_color = RGBColor(30, 122, 204);
    chart
        .draw_series(LineSeries::new(
            actual.iter().copied(),
            ShapeStyle::from(&actual_color).stroke_width(3),
        ))
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?
        .label("Actual")
        .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], ShapeStyle::from(&actual_color)));

    if projected.len() > 1 {
        let projected_color = RGBColor(230, 145, 30);
        let label = match projection_source {
            ProjectionSource::Supplied => "Projected",
            ProjectionSource::Synthesized => "Projected (illustrative)",
        };
        chart
            .draw_series(LineSeries::new(
                projected.iter().copied(),
                ShapeStyle::from(&projected_color).stroke_width(2),
            ))
            .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?
            .label(label)
            .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], ShapeStyle::from(&projected_color)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ProfitabilityPlotError::Render(e.to_string()))?;
    Ok(())
}
