use thiserror::Error;
use tracing::{debug, info};

use crate::domain::derived_metrics::{BreakEven, DerivedMetrics, ProjectionSource, Totals};
use crate::domain::monthly_record::{Breakdown, MonthlyRecord, RecordError};
use crate::domain::projection_config::{ProjectionConfig, ProjectionConfigError};
use crate::domain::site::SiteDataset;
use crate::services::projection::{growth_rate_or_fallback, project_future_months};

const TOTALS_TOLERANCE: f64 = 1e-6;

#[derive(Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("dataset has no monthly records")]
    EmptyDataset,
    #[error("initial investment must be positive, got {0}")]
    InvalidInvestment(f64),
    #[error("growth estimation needs {required} months of comparable history, found {available}")]
    InsufficientHistory { required: usize, available: usize },
    #[error("cannot project {step} months past month {last}")]
    MonthOutOfRange { last: u32, step: usize },
    #[error("invalid projection config: {0}")]
    InvalidConfig(#[from] ProjectionConfigError),
    #[error("failed to build projected month: {0}")]
    InvalidProjection(#[from] RecordError),
}

/// Per-month value accumulated by [`compute_cumulative_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Revenue,
    Costs,
    Profit,
}

impl SeriesField {
    fn value(&self, record: &MonthlyRecord) -> f64 {
        match self {
            SeriesField::Revenue => record.revenue(),
            SeriesField::Costs => record.costs(),
            SeriesField::Profit => record.profit(),
        }
    }
}

pub fn compute_totals(dataset: &SiteDataset) -> Result<Totals, MetricsError> {
    totals_for_records(dataset.monthly_data())
}

pub fn totals_for_records(records: &[MonthlyRecord]) -> Result<Totals, MetricsError> {
    if records.is_empty() {
        return Err(MetricsError::EmptyDataset);
    }

    let total_revenue: f64 = records.iter().map(MonthlyRecord::revenue).sum();
    let total_costs: f64 = records.iter().map(MonthlyRecord::costs).sum();
    let total_profit = total_revenue - total_costs;
    debug_assert!({
        let summed: f64 = records.iter().map(MonthlyRecord::profit).sum();
        (summed - total_profit).abs() <= TOTALS_TOLERANCE * total_revenue.max(1.0)
    });

    Ok(Totals {
        total_revenue,
        total_costs,
        total_profit,
    })
}

/// Running total of `field` over `records`, starting from `seed`.
///
/// Element `i` is `seed` plus the sum of `field` over `records[..=i]`.
/// Pass `-initial_investment` as the seed to get the net position.
pub fn compute_cumulative_series(
    records: &[MonthlyRecord],
    field: SeriesField,
    seed: f64,
) -> Vec<f64> {
    records
        .iter()
        .scan(seed, |running, record| {
            *running += field.value(record);
            Some(*running)
        })
        .collect()
}

pub fn compute_roi(dataset: &SiteDataset) -> Result<f64, MetricsError> {
    check_investment(dataset)?;
    let totals = compute_totals(dataset)?;
    Ok(roi_percentage(totals.total_profit, dataset.initial_investment()))
}

/// First month whose cumulative profit exceeds the initial investment.
///
/// `cumulative_profit` is aligned with the dataset's actual months; those
/// are scanned first, then `projected` continues from the last actual
/// cumulative value. Profit is not monotonic, so every month is checked.
pub fn find_break_even_month(
    dataset: &SiteDataset,
    cumulative_profit: &[f64],
    projected: &[MonthlyRecord],
) -> BreakEven {
    let target = dataset.initial_investment();

    for (record, cumulative) in dataset.monthly_data().iter().zip(cumulative_profit) {
        if *cumulative > target {
            return BreakEven::Month(record.month());
        }
    }

    let mut running = cumulative_profit.last().copied().unwrap_or(0.0);
    for record in projected {
        running += record.profit();
        if running > target {
            return BreakEven::Month(record.month());
        }
    }

    BreakEven::NotReached
}

/// The dataset's own projection when it has one, a synthesized one otherwise.
pub fn resolve_projection(
    dataset: &SiteDataset,
    config: &ProjectionConfig,
) -> Result<(Vec<MonthlyRecord>, ProjectionSource), MetricsError> {
    let supplied = dataset.projected_monthly_data();
    if !supplied.is_empty() {
        debug!(months = supplied.len(), "using supplied projection");
        return Ok((supplied.to_vec(), ProjectionSource::Supplied));
    }

    info!(
        site = dataset.site_name(),
        "no projection supplied, synthesizing an illustrative one"
    );
    let projected = project_future_months(dataset, config)?;
    Ok((projected, ProjectionSource::Synthesized))
}

pub fn compute_derived_metrics(
    dataset: &SiteDataset,
    config: &ProjectionConfig,
) -> Result<DerivedMetrics, MetricsError> {
    config.validate()?;
    let history = dataset.monthly_data();
    let last_actual = history.last().ok_or(MetricsError::EmptyDataset)?;
    check_investment(dataset)?;

    let totals = compute_totals(dataset)?;
    let current_roi = compute_roi(dataset)?;
    let investment = dataset.initial_investment();
    let cumulative_profit = compute_cumulative_series(history, SeriesField::Profit, 0.0);
    let cumulative_revenue = compute_cumulative_series(history, SeriesField::Revenue, 0.0);
    let net_position = compute_cumulative_series(history, SeriesField::Profit, -investment);

    let growth_rate = growth_rate_or_fallback(history, config)?;
    let (projected_series, projection_source) = resolve_projection(dataset, config)?;
    let break_even = find_break_even_month(dataset, &cumulative_profit, &projected_series);
    let months_to_break_even = break_even
        .month()
        .map(|month| month.saturating_sub(last_actual.month()));

    Ok(DerivedMetrics {
        cumulative_profit,
        cumulative_revenue,
        net_position,
        totals,
        current_roi,
        break_even,
        months_to_break_even,
        growth_rate,
        projection_source,
        projected_series,
        profitable_months: history.iter().filter(|r| r.profit() > 0.0).count(),
        average_monthly_profit: totals.total_profit / history.len() as f64,
        revenue_breakdown_totals: sum_breakdowns(history.iter().filter_map(|r| r.revenue_breakdown())),
        costs_breakdown_totals: sum_breakdowns(history.iter().filter_map(|r| r.costs_breakdown())),
    })
}

fn check_investment(dataset: &SiteDataset) -> Result<(), MetricsError> {
    let investment = dataset.initial_investment();
    if !investment.is_finite() || investment <= 0.0 {
        return Err(MetricsError::InvalidInvestment(investment));
    }
    Ok(())
}

fn roi_percentage(total_profit: f64, investment: f64) -> f64 {
    (total_profit - investment) / investment * 100.0
}

fn sum_breakdowns<'a>(breakdowns: impl Iterator<Item = &'a Breakdown>) -> Breakdown {
    let mut totals = Breakdown::new();
    for breakdown in breakdowns {
        for (name, value) in breakdown {
            *totals.entry(name.clone()).or_insert(0.0) += value;
        }
    }
    totals
}
