use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_metrics_report;
use crate::services::site_analysis::write_metrics_file;

pub fn metrics_command(cmd: Commands) -> ExitCode {
    if let Commands::Metrics {
        input,
        output,
        format,
        projection,
    } = cmd
    {
        let analysis = match write_metrics_file(
            &input,
            &output,
            format,
            projection.config.as_deref(),
            &projection.overrides(),
        ) {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Failed to compute site metrics: {e}");
                return ExitCode::FAILURE;
            }
        };

        println!("{}", format_metrics_report(&analysis.dataset, &analysis.metrics));
        println!("Metrics written to {output}");
    }
    ExitCode::SUCCESS
}
