use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::derived_metrics::{DerivedMetrics, ProjectionSource};
use crate::domain::monthly_record::{Breakdown, MonthlyRecord};
use crate::domain::site::SiteDataset;
use crate::services::site_yaml::MonthRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Serialize)]
struct DerivedMetricsRecord {
    site_name: String,
    initial_investment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    investment_breakdown: Option<Breakdown>,
    total_stalls: u32,
    peak_capacity: u32,
    total_revenue: f64,
    total_costs: f64,
    total_profit: f64,
    current_roi: f64,
    break_even_month: Option<u32>,
    months_to_break_even: Option<u32>,
    growth_rate: f64,
    projection_source: &'static str,
    profitable_months: usize,
    average_monthly_profit: f64,
    cumulative_profit: Vec<f64>,
    cumulative_revenue: Vec<f64>,
    net_position: Vec<f64>,
    #[serde(skip_serializing_if = "Breakdown::is_empty")]
    revenue_breakdown_totals: Breakdown,
    #[serde(skip_serializing_if = "Breakdown::is_empty")]
    costs_breakdown_totals: Breakdown,
    projected_series: Vec<MonthRecord>,
}

pub fn projection_source_name(source: ProjectionSource) -> &'static str {
    match source {
        ProjectionSource::Supplied => "supplied",
        ProjectionSource::Synthesized => "synthesized",
    }
}

pub fn serialize_metrics<W: Write>(
    writer: &mut W,
    dataset: &SiteDataset,
    metrics: &DerivedMetrics,
    format: OutputFormat,
) -> io::Result<()> {
    let record = DerivedMetricsRecord {
        site_name: dataset.site_name().to_string(),
        initial_investment: dataset.initial_investment(),
        investment_breakdown: dataset.investment_breakdown().cloned(),
        total_stalls: dataset.total_stalls(),
        peak_capacity: dataset.peak_capacity(),
        total_revenue: metrics.totals.total_revenue,
        total_costs: metrics.totals.total_costs,
        total_profit: metrics.totals.total_profit,
        current_roi: metrics.current_roi,
        break_even_month: metrics.break_even.month(),
        months_to_break_even: metrics.months_to_break_even,
        growth_rate: metrics.growth_rate,
        projection_source: projection_source_name(metrics.projection_source),
        profitable_months: metrics.profitable_months,
        average_monthly_profit: metrics.average_monthly_profit,
        cumulative_profit: metrics.cumulative_profit.clone(),
        cumulative_revenue: metrics.cumulative_revenue.clone(),
        net_position: metrics.net_position.clone(),
        revenue_breakdown_totals: metrics.revenue_breakdown_totals.clone(),
        costs_breakdown_totals: metrics.costs_breakdown_totals.clone(),
        projected_series: metrics.projected_series.iter().map(MonthRecord::from).collect(),
    };
    write_formatted(writer, &record, format)
}

pub fn serialize_projection<W: Write>(
    writer: &mut W,
    records: &[MonthlyRecord],
    format: OutputFormat,
) -> io::Result<()> {
    let records: Vec<MonthRecord> = records.iter().map(MonthRecord::from).collect();
    write_formatted(writer, &records, format)
}

fn write_formatted<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    format: OutputFormat,
) -> io::Result<()> {
    let contents = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(io::Error::other)?,
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(io::Error::other)?,
    };
    writer.write_all(contents.as_bytes())
}
