use crate::domain::monthly_record::{Breakdown, MonthlyRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub total_revenue: f64,
    pub total_costs: f64,
    pub total_profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakEven {
    Month(u32),
    NotReached,
}

impl BreakEven {
    pub fn month(&self) -> Option<u32> {
        match self {
            BreakEven::Month(month) => Some(*month),
            BreakEven::NotReached => None,
        }
    }
}

/// Where the projected series of a [`DerivedMetrics`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionSource {
    /// Taken as-is from the dataset.
    Supplied,
    /// Extrapolated from recent history. Illustrative only.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub cumulative_profit: Vec<f64>,
    pub cumulative_revenue: Vec<f64>,
    pub net_position: Vec<f64>,
    pub totals: Totals,
    pub current_roi: f64,
    pub break_even: BreakEven,
    pub months_to_break_even: Option<u32>,
    pub growth_rate: f64,
    pub projection_source: ProjectionSource,
    pub projected_series: Vec<MonthlyRecord>,
    pub profitable_months: usize,
    pub average_monthly_profit: f64,
    pub revenue_breakdown_totals: Breakdown,
    pub costs_breakdown_totals: Breakdown,
}
