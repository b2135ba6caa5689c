use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::services::metrics_output::projection_source_name;
use crate::services::site_analysis::write_projection_file;

pub fn project_command(cmd: Commands) -> ExitCode {
    if let Commands::Project {
        input,
        output,
        format,
        projection,
    } = cmd
    {
        match write_projection_file(
            &input,
            &output,
            format,
            projection.config.as_deref(),
            &projection.overrides(),
        ) {
            Ok((projected, source)) => {
                println!(
                    "Projection ({}) of {} months written to {output}",
                    projection_source_name(source),
                    projected.len()
                );
            }
            Err(e) => {
                eprintln!("Failed to project site: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
