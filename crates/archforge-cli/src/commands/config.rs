//! `archforge config show|path`

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<std::path::PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            output.json(&config)?;
            output.header("Effective configuration:")?;
            output.print(&config.to_toml()?)?;
        }
        ConfigCommands::Path => {
            let path = config_file.unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}
