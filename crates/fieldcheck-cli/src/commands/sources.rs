//! Sources command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use fieldcheck_engine::SourceRegistry;

/// Execute the sources command.
pub async fn execute_sources(config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = SourceRegistry::from_config(&config.engine.sources);
    println!("{}", formatter.format_sources(&registry.entries())?);
    Ok(())
}
