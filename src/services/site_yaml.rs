use std::io;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::monthly_record::{Breakdown, MonthlyRecord, RecordError};
use crate::domain::site::{DatasetError, SiteDataset};

// Source figures are rounded to whole currency units, so a stated profit
// may be off by one from revenue minus costs.
const PROFIT_TOLERANCE: f64 = 1.0;

#[derive(Error, Debug)]
pub enum SiteYamlError {
    #[error("failed to read site yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse site yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid date format: {0}")]
    InvalidDate(String),
    #[error("stated profit {stated} in month {month} does not match revenue minus costs ({computed})")]
    ProfitMismatch { month: u32, stated: f64, computed: f64 },
    #[error("invalid monthly record: {0}")]
    Record(#[from] RecordError),
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

#[derive(Deserialize)]
struct SiteRecord {
    site_name: String,
    initial_investment: f64,
    #[serde(default)]
    total_stalls: u32,
    #[serde(default)]
    peak_capacity: u32,
    start_date: Option<String>,
    investment_breakdown: Option<Breakdown>,
    seasonal_factors: Option<[f64; 12]>,
    monthly_data: Vec<MonthRecord>,
    projected_monthly_data: Option<Vec<MonthRecord>>,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct MonthRecord {
    month: u32,
    revenue: f64,
    costs: f64,
    profit: Option<f64>,
    #[serde(default)]
    energy_dispensed_kwh: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    revenue_breakdown: Option<Breakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    costs_breakdown: Option<Breakdown>,
}

impl From<&MonthlyRecord> for MonthRecord {
    fn from(record: &MonthlyRecord) -> Self {
        Self {
            month: record.month(),
            revenue: record.revenue(),
            costs: record.costs(),
            profit: Some(record.profit()),
            energy_dispensed_kwh: record.energy_dispensed_kwh(),
            revenue_breakdown: record.revenue_breakdown().cloned(),
            costs_breakdown: record.costs_breakdown().cloned(),
        }
    }
}

pub fn load_site_from_yaml_file(path: &str) -> Result<SiteDataset, SiteYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_site_from_yaml_str(&contents)
}

pub fn deserialize_site_from_yaml_str(input: &str) -> Result<SiteDataset, SiteYamlError> {
    let record: SiteRecord = serde_yaml::from_str(input)?;

    let monthly_data = records_from_yaml(record.monthly_data)?;
    let projected_monthly_data = records_from_yaml(record.projected_monthly_data.unwrap_or_default())?;
    debug!(
        site = record.site_name.as_str(),
        months = monthly_data.len(),
        projected = projected_monthly_data.len(),
        "loaded site dataset"
    );

    let mut dataset = SiteDataset::new(
        record.site_name,
        record.initial_investment,
        monthly_data,
        projected_monthly_data,
    )?
    .with_capacity(record.total_stalls, record.peak_capacity);

    if let Some(date) = parse_date_opt(record.start_date.as_deref())? {
        dataset = dataset.with_start_date(date);
    }
    if let Some(breakdown) = record.investment_breakdown {
        dataset = dataset.with_investment_breakdown(breakdown);
    }
    if let Some(factors) = record.seasonal_factors {
        dataset = dataset.with_seasonal_factors(factors);
    }
    Ok(dataset)
}

fn records_from_yaml(records: Vec<MonthRecord>) -> Result<Vec<MonthlyRecord>, SiteYamlError> {
    records.into_iter().map(record_from_yaml).collect()
}

fn record_from_yaml(record: MonthRecord) -> Result<MonthlyRecord, SiteYamlError> {
    let mut monthly = MonthlyRecord::new(
        record.month,
        record.revenue,
        record.costs,
        record.energy_dispensed_kwh,
    )?;

    if let Some(stated) = record.profit {
        let computed = monthly.profit();
        if !stated.is_finite() || (stated - computed).abs() > PROFIT_TOLERANCE {
            return Err(SiteYamlError::ProfitMismatch {
                month: record.month,
                stated,
                computed,
            });
        }
    }
    if let Some(breakdown) = record.revenue_breakdown {
        monthly = monthly.with_revenue_breakdown(breakdown)?;
    }
    if let Some(breakdown) = record.costs_breakdown {
        monthly = monthly.with_costs_breakdown(breakdown)?;
    }
    Ok(monthly)
}

fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>, SiteYamlError> {
    match value {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| SiteYamlError::InvalidDate(raw.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{chargeup_cafe, on_date, CHARGEUP_CAFE_YAML};

    #[test]
    fn parses_sample_site() {
        let dataset = deserialize_site_from_yaml_str(CHARGEUP_CAFE_YAML).unwrap();

        assert_eq!(dataset, chargeup_cafe());
        assert_eq!(dataset.total_stalls(), 6);
        assert_eq!(dataset.peak_capacity(), 2400);
        assert!(dataset.projected_monthly_data().is_empty());
    }

    #[test]
    fn parses_optional_site_fields() {
        let yaml = "site_name: Demo
initial_investment: 1000
start_date: 2025-03-01
investment_breakdown:
  hardware: 600
  installation: 400
seasonal_factors: [1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1]
monthly_data:
  - month: 1
    revenue: 500
    costs: 300
    revenue_breakdown:
      charging_sessions: 450
      tax_credits: 50
    costs_breakdown:
      utility: 200
projected_monthly_data:
  - month: 2
    revenue: 600
    costs: 300
";
        let dataset = deserialize_site_from_yaml_str(yaml).unwrap();

        assert_eq!(dataset.start_date(), Some(on_date(2025, 3, 1)));
        assert_eq!(dataset.investment_breakdown().unwrap()["hardware"], 600.0);
        assert_eq!(dataset.seasonal_factors().unwrap()[6], 2.0);
        let first = &dataset.monthly_data()[0];
        assert_eq!(first.profit(), 200.0);
        assert_eq!(first.energy_dispensed_kwh(), 0.0);
        assert_eq!(first.revenue_breakdown().unwrap()["tax_credits"], 50.0);
        assert_eq!(first.costs_breakdown().unwrap()["utility"], 200.0);
        assert_eq!(dataset.projected_monthly_data()[0].month(), 2);
    }

    #[test]
    fn rejects_profit_that_contradicts_revenue_and_costs() {
        let yaml = "site_name: Demo
initial_investment: 1000
monthly_data:
  - { month: 1, revenue: 500, costs: 300, profit: 250 }
";
        let error = deserialize_site_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            SiteYamlError::ProfitMismatch { month: 1, .. }
        ));
    }

    #[test]
    fn rejects_invalid_start_date() {
        let yaml = "site_name: Demo
initial_investment: 1000
start_date: March 2025
monthly_data: []
";
        let error = deserialize_site_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(error, SiteYamlError::InvalidDate(value) if value == "March 2025"));
    }

    #[test]
    fn rejects_out_of_order_months() {
        let yaml = "site_name: Demo
initial_investment: 1000
monthly_data:
  - { month: 2, revenue: 1, costs: 0 }
  - { month: 1, revenue: 1, costs: 0 }
";
        let error = deserialize_site_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            SiteYamlError::Dataset(DatasetError::NonIncreasingMonths { previous: 2, next: 1 })
        ));
    }

    #[test]
    fn rejects_negative_revenue() {
        let yaml = "site_name: Demo
initial_investment: 1000
monthly_data:
  - { month: 1, revenue: -1, costs: 0 }
";
        let error = deserialize_site_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(error, SiteYamlError::Record(RecordError::InvalidAmount { .. })));
    }

    #[test]
    fn reports_missing_file() {
        let error = load_site_from_yaml_file("/nonexistent/site.yaml").unwrap_err();
        assert!(matches!(error, SiteYamlError::Read(_)));
    }
}
