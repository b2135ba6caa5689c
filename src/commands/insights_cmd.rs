use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_insights;
use crate::services::site_analysis::insights_from_site_file;

pub fn insights_command(cmd: Commands) -> ExitCode {
    if let Commands::Insights { input, projection } = cmd {
        match insights_from_site_file(&input, projection.config.as_deref(), &projection.overrides()) {
            Ok((analysis, insights)) => {
                println!("Site: {}", analysis.dataset.site_name());
                println!("{}", format_insights(&insights));
            }
            Err(e) => {
                eprintln!("Failed to analyze site: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
