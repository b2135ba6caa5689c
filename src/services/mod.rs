pub mod insights;
pub mod metrics_engine;
pub mod metrics_output;
pub mod profitability_plot;
pub mod projection;
pub mod projection_config_yaml;
pub mod site_analysis;
pub mod site_yaml;
