use crate::domain::derived_metrics::{BreakEven, DerivedMetrics};
use crate::domain::site::SiteDataset;
use crate::services::insights::{InsightKind, PaybackEstimate, SiteInsights};
use crate::services::metrics_engine::totals_for_records;
use crate::services::metrics_output::projection_source_name;

pub fn format_metrics_report(dataset: &SiteDataset, metrics: &DerivedMetrics) -> String {
    let break_even = match metrics.break_even {
        BreakEven::Month(month) => format!("month {month}"),
        BreakEven::NotReached => "not reached".to_string(),
    };
    let months_to_break_even = match metrics.months_to_break_even {
        Some(months) => months.to_string(),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Site Metrics Report".to_string());
    lines.push(format!("Site: {}", dataset.site_name()));
    lines.push(format!("Months of history: {}", dataset.monthly_data().len()));
    lines.push(format!(
        "Initial investment: {}",
        format_amount(dataset.initial_investment())
    ));
    lines.push(format!("Total revenue: {}", format_amount(metrics.totals.total_revenue)));
    lines.push(format!("Total costs: {}", format_amount(metrics.totals.total_costs)));
    lines.push(format!("Total profit: {}", format_amount(metrics.totals.total_profit)));
    lines.push(format!("ROI: {:.1}%", metrics.current_roi));
    lines.push(format!(
        "Profitable months: {}/{}",
        metrics.profitable_months,
        dataset.monthly_data().len()
    ));
    lines.push(format!("Growth rate: {:.2}%", metrics.growth_rate * 100.0));
    lines.push(format!(
        "Projection: {} ({} months)",
        projection_source_name(metrics.projection_source),
        metrics.projected_series.len()
    ));
    if let Ok(projected) = totals_for_records(&metrics.projected_series) {
        lines.push(format!(
            "Projected totals: revenue {}, costs {}, profit {}",
            format_amount(projected.total_revenue),
            format_amount(projected.total_costs),
            format_amount(projected.total_profit)
        ));
    }
    lines.push(format!("Break-even: {break_even}"));
    lines.push(format!("Months to break-even: {months_to_break_even}"));

    lines.join("\n")
}

pub fn format_insights(insights: &SiteInsights) -> String {
    let mut lines = Vec::new();
    lines.push("Insights".to_string());
    for insight in &insights.insights {
        lines.push(format!(
            "[{}] {}: {}",
            insight_label(insight.kind),
            insight.title,
            insight.description
        ));
    }
    lines.push(format!("Payback: {}", format_payback(insights.payback)));
    lines.join("\n")
}

fn insight_label(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Positive => "+",
        InsightKind::Negative => "-",
        InsightKind::Warning => "!",
    }
}

fn format_payback(payback: PaybackEstimate) -> String {
    match payback {
        PaybackEstimate::Reached => "investment recovered".to_string(),
        PaybackEstimate::Months(months) => format!("{months} months"),
        PaybackEstimate::MoreThan(months) => format!("{months}+ months"),
        PaybackEstimate::Undetermined => "TBD".to_string(),
    }
}

fn format_amount(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.0}", value.abs())
    } else {
        format!("${value:.0}")
    }
}
