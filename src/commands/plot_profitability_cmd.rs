use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::services::site_analysis::plot_profitability_from_yaml_file;

pub fn plot_profitability_command(cmd: Commands) -> ExitCode {
    if let Commands::PlotProfitability {
        input,
        output,
        projection,
    } = cmd
    {
        match plot_profitability_from_yaml_file(
            &input,
            &output,
            projection.config.as_deref(),
            &projection.overrides(),
        ) {
            Ok(()) => println!("Profitability plot written to {output}"),
            Err(e) => {
                eprintln!("Failed to plot profitability: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
