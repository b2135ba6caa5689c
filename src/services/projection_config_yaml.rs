use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::projection_config::{ProjectionConfig, ProjectionConfigError};

#[derive(Error, Debug)]
pub enum ProjectionConfigYamlError {
    #[error("failed to read projection config: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse projection config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid projection config: {0}")]
    Invalid(#[from] ProjectionConfigError),
}

// Every key is optional; missing keys keep their defaults.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ProjectionConfigRecord {
    horizon_months: Option<usize>,
    recent_window: Option<usize>,
    fallback_growth_rate: Option<f64>,
    cost_inflation_rate: Option<f64>,
    cost_scale: Option<f64>,
    seasonal_factors: Option<[f64; 12]>,
}

/// Command-line overrides applied on top of the file (or the defaults).
#[derive(Debug, Clone, Default)]
pub struct ProjectionOverrides {
    pub horizon_months: Option<usize>,
    pub recent_window: Option<usize>,
}

pub fn load_projection_config(
    path: Option<&str>,
    overrides: &ProjectionOverrides,
) -> Result<ProjectionConfig, ProjectionConfigYamlError> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            deserialize_projection_config_from_yaml_str(&contents)?
        }
        None => ProjectionConfig::default(),
    };

    if let Some(horizon) = overrides.horizon_months {
        config.horizon_months = horizon;
    }
    if let Some(window) = overrides.recent_window {
        config.recent_window = window;
    }
    config.validate()?;
    Ok(config)
}

pub fn deserialize_projection_config_from_yaml_str(
    input: &str,
) -> Result<ProjectionConfig, ProjectionConfigYamlError> {
    let record: ProjectionConfigRecord = if input.trim().is_empty() {
        ProjectionConfigRecord::default()
    } else {
        serde_yaml::from_str(input)?
    };
    let defaults = ProjectionConfig::default();

    let config = ProjectionConfig {
        horizon_months: record.horizon_months.unwrap_or(defaults.horizon_months),
        recent_window: record.recent_window.unwrap_or(defaults.recent_window),
        fallback_growth_rate: record
            .fallback_growth_rate
            .unwrap_or(defaults.fallback_growth_rate),
        cost_inflation_rate: record
            .cost_inflation_rate
            .unwrap_or(defaults.cost_inflation_rate),
        cost_scale: record.cost_scale.unwrap_or(defaults.cost_scale),
        seasonal_factors: record.seasonal_factors.unwrap_or(defaults.seasonal_factors),
    };
    config.validate()?;
    Ok(config)
}
