use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::services::metrics_output::OutputFormat;
use crate::services::projection_config_yaml::ProjectionOverrides;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectionArgs {
    /// Optional projection config YAML file
    #[arg(short, long)]
    pub config: Option<String>,
    /// Number of months to project when the site has no projection
    #[arg(long)]
    pub horizon: Option<usize>,
    /// Number of trailing months used to estimate revenue growth
    #[arg(long)]
    pub window: Option<usize>,
}

impl ProjectionArgs {
    pub fn overrides(&self) -> ProjectionOverrides {
        ProjectionOverrides {
            horizon_months: self.horizon,
            recent_window: self.window,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute derived metrics for a site and write them to a file
    Metrics {
        /// Site YAML file
        #[arg(short, long)]
        input: String,
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
        #[command(flatten)]
        projection: ProjectionArgs,
    },
    /// Write the projected months for a site
    Project {
        /// Site YAML file
        #[arg(short, long)]
        input: String,
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
        #[command(flatten)]
        projection: ProjectionArgs,
    },
    /// Print observations and a payback estimate for a site
    Insights {
        /// Site YAML file
        #[arg(short, long)]
        input: String,
        #[command(flatten)]
        projection: ProjectionArgs,
    },
    /// Plot net position over actual and projected months into a PNG chart
    PlotProfitability {
        /// Site YAML file
        #[arg(short, long)]
        input: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
        #[command(flatten)]
        projection: ProjectionArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
