pub mod base_commands;
pub mod completions_cmd;
pub mod insights_cmd;
pub mod metrics_cmd;
pub mod plot_profitability_cmd;
pub mod project_cmd;
pub mod report_format;
