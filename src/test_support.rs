use chrono::NaiveDate;

use crate::domain::monthly_record::MonthlyRecord;
use crate::domain::site::SiteDataset;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn record(month: u32, revenue: f64, costs: f64) -> MonthlyRecord {
    MonthlyRecord::new(month, revenue, costs, 0.0).unwrap()
}

// Months numbered from 1; a month with negative profit is all costs.
pub fn site_with_profits(initial_investment: f64, profits: &[f64]) -> SiteDataset {
    let records = profits
        .iter()
        .enumerate()
        .map(|(index, profit)| {
            let month = index as u32 + 1;
            if *profit >= 0.0 {
                record(month, *profit, 0.0)
            } else {
                record(month, 0.0, -profit)
            }
        })
        .collect();
    SiteDataset::new("Test Site", initial_investment, records, vec![]).unwrap()
}

pub const CHARGEUP_CAFE_YAML: &str = "site_name: ChargeUp Cafe
initial_investment: 142960
total_stalls: 6
peak_capacity: 2400
monthly_data:
  - { month: 1, revenue: 7971, costs: 7149, profit: 822, energy_dispensed_kwh: 15403 }
  - { month: 2, revenue: 6800, costs: 6243, profit: 557, energy_dispensed_kwh: 13141 }
  - { month: 3, revenue: 6596, costs: 6124, profit: 472, energy_dispensed_kwh: 12745 }
  - { month: 4, revenue: 5994, costs: 12507, profit: -6513, energy_dispensed_kwh: 11583 }
  - { month: 5, revenue: 9271, costs: 8423, profit: 848, energy_dispensed_kwh: 17915 }
  - { month: 6, revenue: 11421, costs: 9744, profit: 1677, energy_dispensed_kwh: 22070 }
  - { month: 7, revenue: 11992, costs: 11533, profit: 459, energy_dispensed_kwh: 23174 }
  - { month: 8, revenue: 12592, costs: 10212, profit: 2380, energy_dispensed_kwh: 24332 }
  - { month: 9, revenue: 13222, costs: 10060, profit: 3162, energy_dispensed_kwh: 25549 }
  - { month: 10, revenue: 13883, costs: 9874, profit: 4009, energy_dispensed_kwh: 26826 }
  - { month: 11, revenue: 14577, costs: 9941, profit: 4636, energy_dispensed_kwh: 28168 }
  - { month: 12, revenue: 15306, costs: 10301, profit: 5004, energy_dispensed_kwh: 29576 }
";

pub fn chargeup_cafe() -> SiteDataset {
    let months: [(u32, f64, f64, f64); 12] = [
        (1, 7971.0, 7149.0, 15403.0),
        (2, 6800.0, 6243.0, 13141.0),
        (3, 6596.0, 6124.0, 12745.0),
        (4, 5994.0, 12507.0, 11583.0),
        (5, 9271.0, 8423.0, 17915.0),
        (6, 11421.0, 9744.0, 22070.0),
        (7, 11992.0, 11533.0, 23174.0),
        (8, 12592.0, 10212.0, 24332.0),
        (9, 13222.0, 10060.0, 25549.0),
        (10, 13883.0, 9874.0, 26826.0),
        (11, 14577.0, 9941.0, 28168.0),
        (12, 15306.0, 10301.0, 29576.0),
    ];
    let records = months
        .iter()
        .map(|(month, revenue, costs, energy)| {
            MonthlyRecord::new(*month, *revenue, *costs, *energy).unwrap()
        })
        .collect();

    SiteDataset::new("ChargeUp Cafe", 142960.0, records, vec![])
        .unwrap()
        .with_capacity(6, 2400)
}
