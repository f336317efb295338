//! `liftoff config`: inspect merged settings.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                return output.json(&config.settings);
            }
            let yaml =
                serde_yaml::to_string(&config.settings).with_cli_context(|| "serializing settings")?;
            output.print(yaml.trim_end())?;
        }

        ConfigCommands::Path => {
            if output.is_json() {
                return output.json(&config.locations);
            }
            output.header("Settings locations (lowest precedence first):")?;
            for location in &config.locations {
                let marker = if location.exists { "\u{2713}" } else { "-" };
                output.print(&format!("  {marker} {}", location.origin))?;
            }
        }
    }

    Ok(())
}
