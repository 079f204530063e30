//! `archforge cache clear|update`

use archforge_adapters::TemplateCache;
use tracing::instrument;

use crate::{
    cli::CacheCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(cmd: CacheCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cache = TemplateCache::new(config.cache_dir());

    match cmd {
        CacheCommands::Clear => {
            let removed = cache.clear()?;
            output.success(&format!(
                "Removed {removed} cached template(s) from {}",
                cache.dir().display()
            ))?;
        }
        CacheCommands::Update { from } => {
            let from = from
                .or_else(|| config.templates.local_dir.clone())
                .ok_or_else(|| CliError::ConfigError {
                    message: "no template directory to update the cache from".into(),
                    source: None,
                })?;
            let copied = cache.update(&from)?;
            output.success(&format!(
                "Cached {copied} template(s) from {} in {}",
                from.display(),
                cache.dir().display()
            ))?;
        }
    }

    Ok(())
}
