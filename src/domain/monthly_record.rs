use std::collections::BTreeMap;

use thiserror::Error;

/// Named non-negative components of a monthly total, e.g. `utility` or
/// `maintenance` for costs.
pub type Breakdown = BTreeMap<String, f64>;

// Each component of a breakdown may be rounded to whole currency units.
const ROUNDING_SLACK_PER_COMPONENT: f64 = 0.5;

#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("month numbers start at 1")]
    InvalidMonth,
    #[error("{field} in month {month} must be a finite non-negative number, got {value}")]
    InvalidAmount {
        month: u32,
        field: &'static str,
        value: f64,
    },
    #[error("{kind} breakdown component '{name}' in month {month} must be a finite non-negative number")]
    InvalidComponent {
        month: u32,
        kind: &'static str,
        name: String,
    },
    #[error("{kind} breakdown in month {month} sums to {sum}, exceeding the total of {total}")]
    BreakdownExceedsTotal {
        month: u32,
        kind: &'static str,
        sum: f64,
        total: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecord {
    month: u32,
    revenue: f64,
    costs: f64,
    energy_dispensed_kwh: f64,
    revenue_breakdown: Option<Breakdown>,
    costs_breakdown: Option<Breakdown>,
}

impl MonthlyRecord {
    pub fn new(
        month: u32,
        revenue: f64,
        costs: f64,
        energy_dispensed_kwh: f64,
    ) -> Result<Self, RecordError> {
        if month == 0 {
            return Err(RecordError::InvalidMonth);
        }
        check_amount(month, "revenue", revenue)?;
        check_amount(month, "costs", costs)?;
        check_amount(month, "energy dispensed", energy_dispensed_kwh)?;

        Ok(Self {
            month,
            revenue,
            costs,
            energy_dispensed_kwh,
            revenue_breakdown: None,
            costs_breakdown: None,
        })
    }

    pub fn with_revenue_breakdown(mut self, breakdown: Breakdown) -> Result<Self, RecordError> {
        check_breakdown(self.month, "revenue", &breakdown, self.revenue)?;
        self.revenue_breakdown = Some(breakdown);
        Ok(self)
    }

    pub fn with_costs_breakdown(mut self, breakdown: Breakdown) -> Result<Self, RecordError> {
        check_breakdown(self.month, "costs", &breakdown, self.costs)?;
        self.costs_breakdown = Some(breakdown);
        Ok(self)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn costs(&self) -> f64 {
        self.costs
    }

    /// Revenue minus costs. Negative for a loss-making month.
    pub fn profit(&self) -> f64 {
        self.revenue - self.costs
    }

    pub fn energy_dispensed_kwh(&self) -> f64 {
        self.energy_dispensed_kwh
    }

    pub fn revenue_breakdown(&self) -> Option<&Breakdown> {
        self.revenue_breakdown.as_ref()
    }

    pub fn costs_breakdown(&self) -> Option<&Breakdown> {
        self.costs_breakdown.as_ref()
    }
}

fn check_amount(month: u32, field: &'static str, value: f64) -> Result<(), RecordError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RecordError::InvalidAmount { month, field, value });
    }
    Ok(())
}

fn check_breakdown(
    month: u32,
    kind: &'static str,
    breakdown: &Breakdown,
    total: f64,
) -> Result<(), RecordError> {
    for (name, value) in breakdown {
        if !value.is_finite() || *value < 0.0 {
            return Err(RecordError::InvalidComponent {
                month,
                kind,
                name: name.clone(),
            });
        }
    }

    let sum: f64 = breakdown.values().sum();
    let slack = breakdown.len() as f64 * ROUNDING_SLACK_PER_COMPONENT;
    if sum > total + slack {
        return Err(RecordError::BreakdownExceedsTotal {
            month,
            kind,
            sum,
            total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(entries: &[(&str, f64)]) -> Breakdown {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn profit_is_revenue_minus_costs() {
        let record = MonthlyRecord::new(4, 5994.0, 12507.0, 11583.0).unwrap();
        assert_eq!(record.profit(), -6513.0);
    }

    #[test]
    fn month_zero_is_rejected() {
        let error = MonthlyRecord::new(0, 1.0, 1.0, 1.0).unwrap_err();
        assert_eq!(error, RecordError::InvalidMonth);
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        assert!(matches!(
            MonthlyRecord::new(1, -1.0, 0.0, 0.0),
            Err(RecordError::InvalidAmount { field: "revenue", .. })
        ));
        assert!(matches!(
            MonthlyRecord::new(1, 0.0, f64::NAN, 0.0),
            Err(RecordError::InvalidAmount { field: "costs", .. })
        ));
        assert!(matches!(
            MonthlyRecord::new(1, 0.0, 0.0, f64::INFINITY),
            Err(RecordError::InvalidAmount { field: "energy dispensed", .. })
        ));
    }

    #[test]
    fn breakdown_within_total_is_accepted() {
        let record = MonthlyRecord::new(1, 1000.0, 800.0, 2000.0)
            .unwrap()
            .with_revenue_breakdown(breakdown(&[("charging_sessions", 900.0), ("tax_credits", 100.0)]))
            .unwrap()
            .with_costs_breakdown(breakdown(&[("utility", 480.0), ("maintenance", 80.0)]))
            .unwrap();

        assert_eq!(record.revenue_breakdown().unwrap()["charging_sessions"], 900.0);
        assert_eq!(record.costs_breakdown().unwrap().len(), 2);
    }

    #[test]
    fn breakdown_tolerates_rounding_of_each_component() {
        let result = MonthlyRecord::new(1, 100.0, 0.0, 0.0)
            .unwrap()
            .with_revenue_breakdown(breakdown(&[("a", 50.5), ("b", 50.0)]));
        assert!(result.is_ok());
    }

    #[test]
    fn breakdown_exceeding_total_is_rejected() {
        let error = MonthlyRecord::new(3, 100.0, 50.0, 0.0)
            .unwrap()
            .with_costs_breakdown(breakdown(&[("utility", 40.0), ("financing", 30.0)]))
            .unwrap_err();

        assert!(matches!(
            error,
            RecordError::BreakdownExceedsTotal { month: 3, kind: "costs", .. }
        ));
    }

    #[test]
    fn negative_breakdown_component_is_rejected() {
        let error = MonthlyRecord::new(2, 100.0, 50.0, 0.0)
            .unwrap()
            .with_revenue_breakdown(breakdown(&[("advertising", -5.0)]))
            .unwrap_err();

        assert_eq!(
            error,
            RecordError::InvalidComponent {
                month: 2,
                kind: "revenue",
                name: "advertising".to_string(),
            }
        );
    }
}
