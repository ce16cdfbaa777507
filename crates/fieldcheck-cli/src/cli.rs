//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use fieldcheck_domain::DomainCategory;
use std::path::PathBuf;

/// Fieldcheck CLI - Verify agricultural assistant responses against reference data.
#[derive(Debug, Parser)]
#[command(name = "fieldcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FIELDCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference database path
    #[arg(short, long, global = true, env = "FIELDCHECK_DB")]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (reliability tier or corrected text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a response
    Verify(VerifyArgs),

    /// Load reference data from a JSON seed file
    Seed(SeedArgs),

    /// List the sources reported per category
    Sources,

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Response text (read from stdin when omitted or "-")
    pub text: Option<String>,

    /// Domain category of the response
    #[arg(short = 'k', long, value_enum, default_value = "general")]
    pub category: CategoryArg,

    /// Crop the response is about
    #[arg(long)]
    pub crop: Option<String>,

    /// State for weather lookups
    #[arg(long, requires = "district")]
    pub state: Option<String>,

    /// District for weather lookups
    #[arg(long, requires = "state")]
    pub district: Option<String>,

    /// Print the response with corrections appended
    #[arg(long)]
    pub corrected: bool,
}

/// Arguments for the seed command.
#[derive(Debug, Parser)]
pub struct SeedArgs {
    /// JSON file with crops and weather observations
    pub file: PathBuf,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the default configuration file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file when initializing
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryArg {
    /// Crop agronomy (yield, duration, season)
    Crop,
    /// Current weather (temperature, humidity, rain)
    Weather,
    /// Farm finance schemes
    Finance,
    /// Anything else
    General,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<CategoryArg> for DomainCategory {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Crop => DomainCategory::Crop,
            CategoryArg::Weather => DomainCategory::Weather,
            CategoryArg::Finance => DomainCategory::Finance,
            CategoryArg::General => DomainCategory::General,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "fieldcheck",
            "verify",
            "Rice yields about 4000 kg per hectare.",
            "--category",
            "crop",
            "--crop",
            "Rice",
        ]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.category, CategoryArg::Crop);
                assert_eq!(args.crop.as_deref(), Some("Rice"));
                assert!(!args.corrected);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_verify_defaults_to_general_and_stdin() {
        let cli = Cli::parse_from(["fieldcheck", "verify"]);
        match cli.command {
            Command::Verify(args) => {
                assert!(args.text.is_none());
                assert_eq!(args.category, CategoryArg::General);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_state_requires_district() {
        let result = Cli::try_parse_from(["fieldcheck", "verify", "text", "--state", "Maharashtra"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["fieldcheck", "sources", "-f", "json", "-vv", "--no-color"]);
        assert!(matches!(cli.command, Command::Sources));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_category_conversion() {
        let category: DomainCategory = CategoryArg::Finance.into();
        assert_eq!(category, DomainCategory::Finance);
    }
}
