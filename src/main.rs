mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::completions_cmd::completions_command;
use crate::commands::insights_cmd::insights_command;
use crate::commands::metrics_cmd::metrics_command;
use crate::commands::plot_profitability_cmd::plot_profitability_command;
use crate::commands::project_cmd::project_command;

fn main() -> ExitCode {
    init_logging();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Metrics { .. } => metrics_command(cmd),
        cmd @ Commands::Project { .. } => project_command(cmd),
        cmd @ Commands::Insights { .. } => insights_command(cmd),
        cmd @ Commands::PlotProfitability { .. } => plot_profitability_command(cmd),
        cmd @ Commands::Completions { .. } => completions_command(cmd),
    }
}

// Logs go to stderr so command output on stdout stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
