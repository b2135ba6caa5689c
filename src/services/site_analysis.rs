use std::io;

use thiserror::Error;
use tracing::info;

use crate::domain::derived_metrics::{DerivedMetrics, ProjectionSource};
use crate::domain::monthly_record::MonthlyRecord;
use crate::domain::site::SiteDataset;
use crate::services::insights::{generate_insights, SiteInsights};
use crate::services::metrics_engine::{compute_derived_metrics, resolve_projection, MetricsError};
use crate::services::metrics_output::{serialize_metrics, serialize_projection, OutputFormat};
use crate::services::profitability_plot::{write_profitability_png, ProfitabilityPlotError};
use crate::services::projection_config_yaml::{
    load_projection_config, ProjectionConfigYamlError, ProjectionOverrides,
};
use crate::services::site_yaml::{load_site_from_yaml_file, SiteYamlError};

#[derive(Error, Debug)]
pub enum SiteAnalysisError {
    #[error(transparent)]
    Site(#[from] SiteYamlError),
    #[error(transparent)]
    Config(#[from] ProjectionConfigYamlError),
    #[error("failed to compute metrics: {0}")]
    Metrics(#[from] MetricsError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error(transparent)]
    Plot(#[from] ProfitabilityPlotError),
}

#[derive(Debug, Clone)]
pub struct SiteAnalysis {
    pub dataset: SiteDataset,
    pub metrics: DerivedMetrics,
}

pub fn analyze_site_file(
    input_path: &str,
    config_path: Option<&str>,
    overrides: &ProjectionOverrides,
) -> Result<SiteAnalysis, SiteAnalysisError> {
    let config = load_projection_config(config_path, overrides)?;
    let dataset = load_site_from_yaml_file(input_path)?;
    let metrics = compute_derived_metrics(&dataset, &config)?;
    info!(
        site = dataset.site_name(),
        roi = metrics.current_roi,
        "computed derived metrics"
    );
    Ok(SiteAnalysis { dataset, metrics })
}

pub fn write_metrics_file(
    input_path: &str,
    output_path: &str,
    format: OutputFormat,
    config_path: Option<&str>,
    overrides: &ProjectionOverrides,
) -> Result<SiteAnalysis, SiteAnalysisError> {
    let analysis = analyze_site_file(input_path, config_path, overrides)?;
    let mut buffer = Vec::new();
    serialize_metrics(&mut buffer, &analysis.dataset, &analysis.metrics, format)?;
    std::fs::write(output_path, buffer)?;
    Ok(analysis)
}

pub fn write_projection_file(
    input_path: &str,
    output_path: &str,
    format: OutputFormat,
    config_path: Option<&str>,
    overrides: &ProjectionOverrides,
) -> Result<(Vec<MonthlyRecord>, ProjectionSource), SiteAnalysisError> {
    let config = load_projection_config(config_path, overrides)?;
    let dataset = load_site_from_yaml_file(input_path)?;
    let (projected, source) = resolve_projection(&dataset, &config)?;

    let mut buffer = Vec::new();
    serialize_projection(&mut buffer, &projected, format)?;
    std::fs::write(output_path, buffer)?;
    Ok((projected, source))
}

pub fn insights_from_site_file(
    input_path: &str,
    config_path: Option<&str>,
    overrides: &ProjectionOverrides,
) -> Result<(SiteAnalysis, SiteInsights), SiteAnalysisError> {
    let analysis = analyze_site_file(input_path, config_path, overrides)?;
    let insights = generate_insights(&analysis.dataset, &analysis.metrics);
    Ok((analysis, insights))
}

pub fn plot_profitability_from_yaml_file(
    input_path: &str,
    output_path: &str,
    config_path: Option<&str>,
    overrides: &ProjectionOverrides,
) -> Result<(), SiteAnalysisError> {
    let dataset = load_site_from_yaml_file(input_path)?;
    if dataset.monthly_data().is_empty() {
        return Err(ProfitabilityPlotError::EmptyDataset.into());
    }
    let config = load_projection_config(config_path, overrides)?;
    let metrics = compute_derived_metrics(&dataset, &config)?;
    write_profitability_png(output_path, &dataset, &metrics)?;
    Ok(())
}
