//! Fieldcheck Storage Layer
//!
//! Reference data for the verification engine: crop agronomy records and
//! district weather observations.
//!
//! # Architecture
//!
//! - [`SqliteReferenceStore`]: SQLite-backed store implementing
//!   [`RecordGateway`], with case-insensitive crop names and aliases and the
//!   latest observation per district
//! - [`MemoryGateway`]: immutable in-memory gateway for embedding and tests
//! - [`ReferenceSeed`]: JSON seed format loadable into either
//!
//! # Examples
//!
//! ```no_run
//! use fieldcheck_store::SqliteReferenceStore;
//!
//! let store = SqliteReferenceStore::new("fieldcheck.db").unwrap();
//! let seeded = store.seed_from_json_file("reference.json").unwrap();
//! println!("{} crops loaded", seeded.crops);
//! ```

#![warn(missing_docs)]

mod memory;
mod seed;

pub use memory::MemoryGateway;
pub use seed::{ReferenceSeed, SeedSummary, WeatherSeed};

use async_trait::async_trait;
use fieldcheck_domain::traits::RecordGateway;
use fieldcheck_domain::{CropRecord, Season, WeatherRecord, YieldUnit};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Seed file could not be read
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid JSON
    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A previous holder of the connection panicked
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

/// Row counts of the reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Crop records
    pub crops: usize,
    /// Crop aliases
    pub aliases: usize,
    /// Weather observations (all timestamps)
    pub observations: usize,
}

/// SQLite-based reference store
///
/// The connection sits behind a mutex so one store can serve concurrent
/// lookups from the engine. Name, alias, state and district comparisons are
/// case-insensitive.
pub struct SqliteReferenceStore {
    conn: Mutex<Connection>,
}

impl SqliteReferenceStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an existing store for lookups only
    ///
    /// Fails instead of creating the file when it does not exist, and never
    /// touches the schema.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a fresh in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Insert or replace a crop record and its aliases
    ///
    /// An alias already pointing at another crop is moved to this one.
    pub fn upsert_crop(&self, record: &CropRecord) -> Result<(), StoreError> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidData("crop name must not be empty".to_string()));
        }
        if !(record.average_yield > 0.0) || !record.average_yield.is_finite() {
            return Err(StoreError::InvalidData(format!(
                "average yield of '{}' must be positive, got {}",
                name, record.average_yield
            )));
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO crops (name, season, average_yield, yield_unit, duration_max_days)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name) DO UPDATE SET
             season = excluded.season,
             average_yield = excluded.average_yield,
             yield_unit = excluded.yield_unit,
             duration_max_days = excluded.duration_max_days",
            params![
                name,
                record.season.as_str(),
                record.average_yield,
                record.yield_unit.as_str(),
                record.duration_max_days,
            ],
        )?;

        tx.execute("DELETE FROM crop_aliases WHERE crop_name = ?1", params![name])?;
        for alias in record.aliases.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
            if alias.eq_ignore_ascii_case(name) {
                continue;
            }
            tx.execute(
                "INSERT INTO crop_aliases (alias, crop_name) VALUES (?1, ?2)
                 ON CONFLICT(alias) DO UPDATE SET crop_name = excluded.crop_name",
                params![alias, name],
            )?;
        }

        tx.commit()?;
        debug!("Stored crop '{}' with {} alias(es)", name, record.aliases.len());
        Ok(())
    }

    /// Find a crop by canonical name or alias
    pub fn get_crop(&self, name_or_alias: &str) -> Result<Option<CropRecord>, StoreError> {
        let key = name_or_alias.trim();
        let conn = self.lock()?;

        let row = conn
            .query_row(
                "SELECT name, season, average_yield, yield_unit, duration_max_days
                 FROM crops WHERE name = ?1
                 UNION ALL
                 SELECT c.name, c.season, c.average_yield, c.yield_unit, c.duration_max_days
                 FROM crops c JOIN crop_aliases a ON a.crop_name = c.name
                 WHERE a.alias = ?1
                 LIMIT 1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, u32>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((name, season, average_yield, yield_unit, duration_max_days)) = row else {
            return Ok(None);
        };

        let season = Season::parse(&season)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown season: {}", season)))?;
        let yield_unit = YieldUnit::parse(&yield_unit)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown yield unit: {}", yield_unit)))?;

        let mut stmt =
            conn.prepare("SELECT alias FROM crop_aliases WHERE crop_name = ?1 ORDER BY alias")?;
        let aliases = stmt
            .query_map(params![&name], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CropRecord {
            name,
            aliases,
            season,
            average_yield,
            yield_unit,
            duration_max_days,
        }))
    }

    /// Canonical names of every stored crop, sorted
    pub fn crop_names(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT name FROM crops ORDER BY name COLLATE NOCASE")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Record a weather observation for a district
    ///
    /// A second observation with the same timestamp replaces the first.
    pub fn record_weather(
        &self,
        state: &str,
        district: &str,
        record: &WeatherRecord,
    ) -> Result<(), StoreError> {
        let (state, district) = (state.trim(), district.trim());
        if state.is_empty() || district.is_empty() {
            return Err(StoreError::InvalidData(
                "state and district must not be empty".to_string(),
            ));
        }
        let observed_at = i64::try_from(record.observed_at).map_err(|_| {
            StoreError::InvalidData(format!("observation time {} out of range", record.observed_at))
        })?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO weather_observations (state, district, observed_at, temperature_c, humidity_pct)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(state, district, observed_at) DO UPDATE SET
             temperature_c = excluded.temperature_c, humidity_pct = excluded.humidity_pct",
            params![state, district, observed_at, record.temperature_c, record.humidity_pct],
        )?;
        Ok(())
    }

    /// Latest weather observation for a district
    pub fn latest_weather(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Option<WeatherRecord>, StoreError> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT temperature_c, humidity_pct, observed_at
                 FROM weather_observations
                 WHERE state = ?1 AND district = ?2
                 ORDER BY observed_at DESC LIMIT 1",
                params![state.trim(), district.trim()],
                |row| {
                    Ok(WeatherRecord {
                        temperature_c: row.get(0)?,
                        humidity_pct: row.get(1)?,
                        observed_at: row.get::<_, i64>(2)?.max(0) as u64,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Row counts of the reference tables
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let conn = self.lock()?;
        let count = |table: &str| -> Result<usize, StoreError> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
            Ok(n.max(0) as usize)
        };
        Ok(StoreStats {
            crops: count("crops")?,
            aliases: count("crop_aliases")?,
            observations: count("weather_observations")?,
        })
    }

    /// Load every record of a seed, replacing existing entries
    pub fn seed(&self, seed: &ReferenceSeed) -> Result<SeedSummary, StoreError> {
        for crop in &seed.crops {
            self.upsert_crop(crop)?;
        }
        for entry in &seed.weather {
            self.record_weather(&entry.state, &entry.district, &entry.record)?;
        }
        Ok(seed.summary())
    }

    /// Load a JSON seed file
    pub fn seed_from_json_file<P: AsRef<Path>>(&self, path: P) -> Result<SeedSummary, StoreError> {
        let seed = ReferenceSeed::from_json_file(path)?;
        self.seed(&seed)
    }
}

#[async_trait]
impl RecordGateway for SqliteReferenceStore {
    type Error = StoreError;

    async fn lookup_crop_record(&self, name_or_alias: &str) -> Result<Option<CropRecord>, StoreError> {
        self.get_crop(name_or_alias)
    }

    async fn lookup_current_weather(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Option<WeatherRecord>, StoreError> {
        self.latest_weather(state, district)
    }
}

impl std::fmt::Debug for SqliteReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteReferenceStore").finish_non_exhaustive()
    }
}
