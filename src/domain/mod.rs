pub mod derived_metrics;
pub mod monthly_record;
pub mod projection_config;
pub mod site;
