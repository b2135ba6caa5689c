use crate::domain::derived_metrics::DerivedMetrics;
use crate::domain::monthly_record::MonthlyRecord;
use crate::domain::site::SiteDataset;

const TREND_WINDOW: usize = 3;
const HIGH_ENERGY_COST_RATIO: f64 = 0.5;
const STRONG_GROWTH_PERCENT: f64 = 20.0;
const LIMITED_GROWTH_PERCENT: f64 = 5.0;
const PAYBACK_HORIZON_MONTHS: u32 = 60;
const UTILITY_COMPONENT: &str = "utility";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Positive,
    Negative,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

/// Months of recent-average profit needed to recover what is left of the
/// initial investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaybackEstimate {
    Reached,
    Months(u32),
    MoreThan(u32),
    /// Recent months do not make a profit.
    Undetermined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteInsights {
    pub insights: Vec<Insight>,
    pub payback: PaybackEstimate,
}

pub fn generate_insights(dataset: &SiteDataset, metrics: &DerivedMetrics) -> SiteInsights {
    let history = dataset.monthly_data();
    let mut insights = vec![profit_trend_insight(metrics.average_monthly_profit)];
    insights.extend(energy_cost_insight(history));
    insights.extend(revenue_growth_insight(history));

    SiteInsights {
        insights,
        payback: estimate_payback(
            history,
            dataset.initial_investment(),
            metrics.totals.total_profit,
        ),
    }
}

fn profit_trend_insight(average_monthly_profit: f64) -> Insight {
    if average_monthly_profit > 0.0 {
        Insight {
            kind: InsightKind::Positive,
            title: "Positive Monthly Trend".to_string(),
            description: format!(
                "Average monthly profit of ${average_monthly_profit:.0} indicates strong operational performance."
            ),
        }
    } else {
        Insight {
            kind: InsightKind::Negative,
            title: "Monthly Losses".to_string(),
            description: format!(
                "Average monthly loss of ${:.0} requires attention to operational efficiency.",
                average_monthly_profit.abs()
            ),
        }
    }
}

fn energy_cost_insight(history: &[MonthlyRecord]) -> Option<Insight> {
    let utility_costs: Vec<f64> = history
        .iter()
        .filter_map(|record| record.costs_breakdown())
        .filter_map(|breakdown| breakdown.get(UTILITY_COMPONENT).copied())
        .collect();
    if utility_costs.is_empty() {
        return None;
    }

    let months = history.len() as f64;
    let average_utility = utility_costs.iter().sum::<f64>() / months;
    let average_revenue = history.iter().map(MonthlyRecord::revenue).sum::<f64>() / months;
    if average_revenue <= 0.0 {
        return None;
    }

    let ratio = average_utility / average_revenue;
    (ratio > HIGH_ENERGY_COST_RATIO).then(|| Insight {
        kind: InsightKind::Negative,
        title: "High Energy Costs".to_string(),
        description: format!(
            "Energy costs represent {:.1}% of revenue. Consider time-of-use optimization or renewable energy sources.",
            ratio * 100.0
        ),
    })
}

fn revenue_growth_insight(history: &[MonthlyRecord]) -> Option<Insight> {
    let window = TREND_WINDOW.min(history.len());
    if window == 0 {
        return None;
    }
    let early = average_revenue(&history[..window]);
    let recent = average_revenue(&history[history.len() - window..]);
    if early <= 0.0 {
        return None;
    }

    let growth = (recent - early) / early * 100.0;
    if growth > STRONG_GROWTH_PERCENT {
        Some(Insight {
            kind: InsightKind::Positive,
            title: "Strong Revenue Growth".to_string(),
            description: format!(
                "Revenue has grown {growth:.1}% from early months, indicating increasing adoption."
            ),
        })
    } else if growth < LIMITED_GROWTH_PERCENT {
        Some(Insight {
            kind: InsightKind::Warning,
            title: "Limited Growth".to_string(),
            description: format!(
                "Revenue growth of {growth:.1}% suggests need for marketing or pricing optimization."
            ),
        })
    } else {
        None
    }
}

fn average_revenue(records: &[MonthlyRecord]) -> f64 {
    records.iter().map(MonthlyRecord::revenue).sum::<f64>() / records.len() as f64
}

pub fn estimate_payback(
    history: &[MonthlyRecord],
    initial_investment: f64,
    total_profit: f64,
) -> PaybackEstimate {
    let remaining = initial_investment - total_profit;
    if remaining <= 0.0 {
        return PaybackEstimate::Reached;
    }

    let window = TREND_WINDOW.min(history.len());
    if window == 0 {
        return PaybackEstimate::Undetermined;
    }
    let recent = &history[history.len() - window..];
    let average_profit = recent.iter().map(MonthlyRecord::profit).sum::<f64>() / window as f64;
    if average_profit <= 0.0 {
        return PaybackEstimate::Undetermined;
    }

    let months = (remaining / average_profit).ceil();
    if months > PAYBACK_HORIZON_MONTHS as f64 {
        PaybackEstimate::MoreThan(PAYBACK_HORIZON_MONTHS)
    } else {
        PaybackEstimate::Months(months as u32)
    }
}
