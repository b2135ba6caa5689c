use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::domain::monthly_record::{Breakdown, MonthlyRecord};

#[derive(Error, Debug, PartialEq)]
pub enum DatasetError {
    #[error("month {next} does not follow month {previous}; months must be strictly increasing")]
    NonIncreasingMonths { previous: u32, next: u32 },
}

/// One site's financial history, optionally followed by a projection.
///
/// Months in `monthly_data` followed by those in `projected_monthly_data`
/// form a single strictly increasing sequence. The records are never changed
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDataset {
    site_name: String,
    initial_investment: f64,
    total_stalls: u32,
    peak_capacity: u32,
    start_date: Option<NaiveDate>,
    investment_breakdown: Option<Breakdown>,
    seasonal_factors: Option<[f64; 12]>,
    monthly_data: Vec<MonthlyRecord>,
    projected_monthly_data: Vec<MonthlyRecord>,
}

impl SiteDataset {
    pub fn new(
        site_name: impl Into<String>,
        initial_investment: f64,
        monthly_data: Vec<MonthlyRecord>,
        projected_monthly_data: Vec<MonthlyRecord>,
    ) -> Result<Self, DatasetError> {
        check_month_sequence(monthly_data.iter().chain(projected_monthly_data.iter()))?;

        Ok(Self {
            site_name: site_name.into(),
            initial_investment,
            total_stalls: 0,
            peak_capacity: 0,
            start_date: None,
            investment_breakdown: None,
            seasonal_factors: None,
            monthly_data,
            projected_monthly_data,
        })
    }

    pub fn with_capacity(mut self, total_stalls: u32, peak_capacity: u32) -> Self {
        self.total_stalls = total_stalls;
        self.peak_capacity = peak_capacity;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_investment_breakdown(mut self, breakdown: Breakdown) -> Self {
        self.investment_breakdown = Some(breakdown);
        self
    }

    pub fn with_seasonal_factors(mut self, factors: [f64; 12]) -> Self {
        self.seasonal_factors = Some(factors);
        self
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn initial_investment(&self) -> f64 {
        self.initial_investment
    }

    pub fn total_stalls(&self) -> u32 {
        self.total_stalls
    }

    pub fn peak_capacity(&self) -> u32 {
        self.peak_capacity
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn investment_breakdown(&self) -> Option<&Breakdown> {
        self.investment_breakdown.as_ref()
    }

    pub fn seasonal_factors(&self) -> Option<&[f64; 12]> {
        self.seasonal_factors.as_ref()
    }

    pub fn monthly_data(&self) -> &[MonthlyRecord] {
        &self.monthly_data
    }

    /// The supplied projection, empty when the dataset carries none.
    pub fn projected_monthly_data(&self) -> &[MonthlyRecord] {
        &self.projected_monthly_data
    }

    /// Zero-based calendar month (0 = January) of the given month number,
    /// when the dataset knows the date of its first month.
    pub fn month_of_year(&self, month: u32) -> Option<usize> {
        self.start_date.map(|date| {
            let offset = date.month0() as usize + month.saturating_sub(1) as usize;
            offset % 12
        })
    }
}

fn check_month_sequence<'a>(
    records: impl Iterator<Item = &'a MonthlyRecord>,
) -> Result<(), DatasetError> {
    let mut previous: Option<u32> = None;
    for record in records {
        if let Some(previous) = previous {
            if record.month() <= previous {
                return Err(DatasetError::NonIncreasingMonths {
                    previous,
                    next: record.month(),
                });
            }
        }
        previous = Some(record.month());
    }
    Ok(())
}
