//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    if args.init {
        if path.exists() && !args.force {
            return Err(CliError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        Config::default().save_to(path)?;
        println!(
            "{}",
            formatter.success(&format!("Wrote default configuration to {}", path.display()))
        );
        return Ok(());
    }

    println!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
    println!("{}", config.to_toml()?);
    Ok(())
}
