//! Heuristic extrapolation of future months from recent history.
//!
//! The projection compounds the recent average month-over-month revenue
//! growth, inflates costs at a fixed rate and applies a seasonal multiplier
//! per calendar month. It is illustrative, not a fitted forecast: callers
//! should present the output as such.

use tracing::debug;

use crate::domain::monthly_record::{Breakdown, MonthlyRecord};
use crate::domain::projection_config::{check_seasonal_factors, ProjectionConfig};
use crate::domain::site::SiteDataset;
use crate::services::metrics_engine::MetricsError;

const ENERGY_PRICE_PER_KWH: f64 = 0.45;
const ENERGY_UPLIFT: f64 = 1.1;
const MIN_GROWTH_MONTHS: usize = 2;

/// Mean month-over-month revenue growth over up to the last
/// `recent_window` months.
///
/// Pairs whose earlier month has no revenue are skipped. Fails with
/// `InsufficientHistory` when fewer than two months exist or no pair can be
/// compared.
pub fn estimate_growth_rate(
    records: &[MonthlyRecord],
    recent_window: usize,
) -> Result<f64, MetricsError> {
    if records.is_empty() {
        return Err(MetricsError::EmptyDataset);
    }
    if records.len() < MIN_GROWTH_MONTHS {
        return Err(MetricsError::InsufficientHistory {
            required: MIN_GROWTH_MONTHS,
            available: records.len(),
        });
    }

    let window = &records[records.len().saturating_sub(recent_window)..];
    let rates: Vec<f64> = window
        .windows(2)
        .filter(|pair| pair[0].revenue() > 0.0)
        .map(|pair| (pair[1].revenue() - pair[0].revenue()) / pair[0].revenue())
        .collect();

    if rates.is_empty() {
        return Err(MetricsError::InsufficientHistory {
            required: MIN_GROWTH_MONTHS,
            available: 0,
        });
    }

    Ok(rates.iter().sum::<f64>() / rates.len() as f64)
}

/// Growth rate used for projections: the estimate when history allows one,
/// the configured fallback otherwise.
pub fn growth_rate_or_fallback(
    records: &[MonthlyRecord],
    config: &ProjectionConfig,
) -> Result<f64, MetricsError> {
    match estimate_growth_rate(records, config.recent_window) {
        Ok(rate) => Ok(rate),
        Err(MetricsError::InsufficientHistory { required, available }) => {
            debug!(
                required,
                available,
                fallback = config.fallback_growth_rate,
                "not enough history for a growth estimate, using fallback rate"
            );
            Ok(config.fallback_growth_rate)
        }
        Err(e) => Err(e),
    }
}

pub fn project_future_months(
    dataset: &SiteDataset,
    config: &ProjectionConfig,
) -> Result<Vec<MonthlyRecord>, MetricsError> {
    config.validate()?;
    let seasonal_factors = match dataset.seasonal_factors() {
        Some(factors) => {
            check_seasonal_factors(factors)?;
            factors
        }
        None => &config.seasonal_factors,
    };

    let history = dataset.monthly_data();
    let last = history.last().ok_or(MetricsError::EmptyDataset)?;
    let rate = growth_rate_or_fallback(history, config)?;
    debug!(
        site = dataset.site_name(),
        rate,
        horizon = config.horizon_months,
        "projecting future months"
    );

    (1..=config.horizon_months)
        .map(|step| project_month(dataset, last, step, rate, seasonal_factors, config))
        .collect()
}

fn project_month(
    dataset: &SiteDataset,
    last: &MonthlyRecord,
    step: usize,
    rate: f64,
    seasonal_factors: &[f64; 12],
    config: &ProjectionConfig,
) -> Result<MonthlyRecord, MetricsError> {
    let index = step - 1;
    let month = u32::try_from(step)
        .ok()
        .and_then(|step| last.month().checked_add(step))
        .ok_or(MetricsError::MonthOutOfRange {
            last: last.month(),
            step,
        })?;
    let seasonal = seasonal_factors[dataset.month_of_year(month).unwrap_or(index % 12)];
    let year_multiplier = (index / 12 + 1) as f64;
    let exponent = step as f64;

    let revenue = last.revenue() * (1.0 + rate).powf(exponent) * seasonal * year_multiplier;
    let costs = last.costs()
        * (1.0 + config.cost_inflation_rate).powf(exponent)
        * seasonal
        * config.cost_scale;
    let energy = revenue / ENERGY_PRICE_PER_KWH * ENERGY_UPLIFT;

    let revenue = revenue.round();
    let costs = costs.round();
    let mut record = MonthlyRecord::new(month, revenue, costs, energy.round())?;
    if let Some(breakdown) = last.revenue_breakdown() {
        record = record.with_revenue_breakdown(scale_breakdown(breakdown, last.revenue(), revenue))?;
    }
    if let Some(breakdown) = last.costs_breakdown() {
        record = record.with_costs_breakdown(scale_breakdown(breakdown, last.costs(), costs))?;
    }
    Ok(record)
}

// Keeps each component's share of the total. Shares are taken against the
// component sum when rounding slack pushed it past the total.
fn scale_breakdown(breakdown: &Breakdown, base_total: f64, new_total: f64) -> Breakdown {
    let base = base_total.max(breakdown.values().sum());
    breakdown
        .iter()
        .map(|(name, value)| {
            let share = if base > 0.0 { value / base } else { 0.0 };
            (name.clone(), (share * new_total).round())
        })
        .collect()
}
