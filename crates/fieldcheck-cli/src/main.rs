//! Fieldcheck CLI - verify assistant responses against reference data.

use clap::Parser;
use fieldcheck_cli::commands;
use fieldcheck_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> fieldcheck_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    // A broken file must not block rewriting it
    let config = match &cli.command {
        Command::Config(args) if args.init => Config::default(),
        _ => Config::load_from(&config_path)?,
    };

    let database = match cli.database {
        Some(path) => path,
        None => config.database_path()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Verify(args) => {
            commands::execute_verify(args, &config, &database, &formatter).await?;
        }
        Command::Seed(args) => {
            commands::execute_seed(args, &database, &formatter).await?;
        }
        Command::Sources => {
            commands::execute_sources(&config, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?;
        }
    }

    Ok(())
}
