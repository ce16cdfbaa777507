//! Seed command implementation.

use crate::cli::SeedArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fieldcheck_store::SqliteReferenceStore;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the seed command.
pub async fn execute_seed(args: SeedArgs, database: &Path, formatter: &Formatter) -> Result<()> {
    if !args.file.exists() {
        return Err(CliError::InvalidInput(format!(
            "Seed file not found: {}",
            args.file.display()
        )));
    }

    if let Some(parent) = database.parent() {
        fs::create_dir_all(parent)?;
    }

    let store = SqliteReferenceStore::new(database)?;
    let summary = store.seed_from_json_file(&args.file)?;
    info!(
        "Seeded {} from {}",
        database.display(),
        args.file.display()
    );

    let stats = store.stats()?;
    println!("{}", formatter.seed_result(&summary, &stats));

    Ok(())
}
