//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fieldcheck_domain::traits::RecordGateway;
use fieldcheck_domain::{DomainCategory, VerificationContext};
use fieldcheck_engine::VerificationEngine;
use fieldcheck_store::{MemoryGateway, SqliteReferenceStore};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Execute the verify command.
pub async fn execute_verify(
    args: VerifyArgs,
    config: &Config,
    database: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let text = match args.text.as_deref() {
        Some(text) if text != "-" => text.to_string(),
        _ => read_stdin()?,
    };
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Response text is empty".to_string()));
    }

    // Verifying only reads reference data, so a missing database is not created
    if database.exists() {
        let store = SqliteReferenceStore::open_read_only(database)?;
        run(store, &text, &args, config, formatter).await
    } else {
        warn!(
            "Reference database {} does not exist; record lookups will find nothing",
            database.display()
        );
        run(MemoryGateway::new(), &text, &args, config, formatter).await
    }
}

async fn run<G: RecordGateway>(
    gateway: G,
    text: &str,
    args: &VerifyArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let engine = VerificationEngine::new(gateway, config.engine.clone())?;

    let category: DomainCategory = args.category.into();
    let context = build_context(args);

    let detailed = engine.verify_detailed(text, category, &context).await;
    let corrected = args
        .corrected
        .then(|| engine.add_corrections(text, &detailed.report));

    println!("{}", formatter.format_report(&detailed, corrected.as_deref())?);

    Ok(())
}

fn build_context(args: &VerifyArgs) -> VerificationContext {
    let mut context = VerificationContext::new();
    if let Some(crop) = &args.crop {
        context = context.with_crop(crop.clone());
    }
    if let (Some(state), Some(district)) = (&args.state, &args.district) {
        context = context.with_location(state.clone(), district.clone());
    }
    context
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CategoryArg;
    use crate::config::OutputFormat;

    fn args() -> VerifyArgs {
        VerifyArgs {
            text: Some("Rice yields about 4000 kg per hectare.".to_string()),
            category: CategoryArg::Crop,
            crop: Some("Rice".to_string()),
            state: Some("Maharashtra".to_string()),
            district: Some("Pune".to_string()),
            corrected: false,
        }
    }

    #[test]
    fn test_build_context() {
        let context = build_context(&args());
        assert_eq!(context.crop_name.as_deref(), Some("Rice"));
        let location = context.location.unwrap();
        assert_eq!(location.state, "Maharashtra");
        assert_eq!(location.district, "Pune");
    }

    #[tokio::test]
    async fn test_missing_database_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("reference.db");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_verify(args(), &Config::default(), &database, &formatter)
            .await
            .unwrap();
        assert!(!database.exists());
    }

    #[tokio::test]
    async fn test_existing_database_is_left_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("reference.db");
        SqliteReferenceStore::new(&database).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_verify(args(), &Config::default(), &database, &formatter)
            .await
            .unwrap();
        let stats = SqliteReferenceStore::new(&database).unwrap().stats().unwrap();
        assert_eq!(stats.crops, 0);
    }

    #[test]
    fn test_build_context_without_location() {
        let mut args = args();
        args.state = None;
        args.district = None;
        args.crop = None;
        assert_eq!(build_context(&args), VerificationContext::new());
    }
}
