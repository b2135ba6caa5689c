use thiserror::Error;

pub const DEFAULT_SEASONAL_FACTORS: [f64; 12] =
    [1.0, 0.9, 0.8, 0.9, 1.1, 1.2, 1.3, 1.3, 1.2, 1.1, 1.0, 0.9];

#[derive(Error, Debug, PartialEq)]
pub enum ProjectionConfigError {
    #[error("projection horizon must be at least one month")]
    InvalidHorizon,
    #[error("growth window must cover at least two months, got {0}")]
    InvalidWindow(usize),
    #[error("{name} must be a finite rate above -100%, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("cost scale must be a finite positive number, got {0}")]
    InvalidCostScale(f64),
    #[error("seasonal factor for month {month} must be a finite positive number, got {value}")]
    InvalidSeasonalFactor { month: usize, value: f64 },
}

/// Constants of the projection heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub horizon_months: usize,
    pub recent_window: usize,
    pub fallback_growth_rate: f64,
    pub cost_inflation_rate: f64,
    pub cost_scale: f64,
    pub seasonal_factors: [f64; 12],
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: 24,
            recent_window: 3,
            fallback_growth_rate: 0.05,
            cost_inflation_rate: 0.02,
            cost_scale: 0.8,
            seasonal_factors: DEFAULT_SEASONAL_FACTORS,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ProjectionConfigError> {
        if self.horizon_months == 0 {
            return Err(ProjectionConfigError::InvalidHorizon);
        }
        if self.recent_window < 2 {
            return Err(ProjectionConfigError::InvalidWindow(self.recent_window));
        }
        check_rate("fallback growth rate", self.fallback_growth_rate)?;
        check_rate("cost inflation rate", self.cost_inflation_rate)?;
        if !self.cost_scale.is_finite() || self.cost_scale <= 0.0 {
            return Err(ProjectionConfigError::InvalidCostScale(self.cost_scale));
        }
        check_seasonal_factors(&self.seasonal_factors)
    }
}

pub fn check_seasonal_factors(factors: &[f64; 12]) -> Result<(), ProjectionConfigError> {
    for (index, value) in factors.iter().enumerate() {
        if !value.is_finite() || *value <= 0.0 {
            return Err(ProjectionConfigError::InvalidSeasonalFactor {
                month: index + 1,
                value: *value,
            });
        }
    }
    Ok(())
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ProjectionConfigError> {
    if !value.is_finite() || value <= -1.0 {
        return Err(ProjectionConfigError::InvalidRate { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ProjectionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_single_month_window() {
        let config = ProjectionConfig {
            recent_window: 1,
            ..ProjectionConfig::default()
        };
        assert_eq!(config.validate(), Err(ProjectionConfigError::InvalidWindow(1)));
    }

    #[test]
    fn rejects_zero_horizon() {
        let config = ProjectionConfig {
            horizon_months: 0,
            ..ProjectionConfig::default()
        };
        assert_eq!(config.validate(), Err(ProjectionConfigError::InvalidHorizon));
    }

    #[test]
    fn rejects_rate_that_wipes_out_the_base() {
        let config = ProjectionConfig {
            cost_inflation_rate: -1.0,
            ..ProjectionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ProjectionConfigError::InvalidRate { name: "cost inflation rate", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_seasonal_factor() {
        let mut factors = DEFAULT_SEASONAL_FACTORS;
        factors[6] = 0.0;
        let config = ProjectionConfig {
            seasonal_factors: factors,
            ..ProjectionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ProjectionConfigError::InvalidSeasonalFactor { month: 7, value: 0.0 })
        );
    }
}
