//! In-memory record gateway

use crate::ReferenceSeed;
use async_trait::async_trait;
use fieldcheck_domain::traits::RecordGateway;
use fieldcheck_domain::{CropRecord, WeatherRecord};
use std::collections::HashMap;
use std::convert::Infallible;

/// Immutable in-memory gateway
///
/// Built up front and then only read, so it needs no locking. Lookups are
/// case-insensitive; for a district with several observations the latest
/// one is kept.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    crops: Vec<CropRecord>,
    index: HashMap<String, usize>,
    weather: HashMap<(String, String), WeatherRecord>,
}

fn key(s: &str) -> String {
    s.trim().to_lowercase()
}

impl MemoryGateway {
    /// Create an empty gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a gateway from a seed
    pub fn from_seed(seed: &ReferenceSeed) -> Self {
        let mut gateway = Self::new();
        for crop in &seed.crops {
            gateway = gateway.with_crop(crop.clone());
        }
        for entry in &seed.weather {
            gateway = gateway.with_weather(&entry.state, &entry.district, entry.record.clone());
        }
        gateway
    }

    /// Add (or replace) a crop record
    pub fn with_crop(mut self, record: CropRecord) -> Self {
        let existing = self.index.get(&key(&record.name)).copied();
        let slot = match existing {
            Some(slot) => {
                self.index.retain(|_, v| *v != slot);
                self.crops[slot] = record;
                slot
            }
            None => {
                self.crops.push(record);
                self.crops.len() - 1
            }
        };

        let record = &self.crops[slot];
        for alias in &record.aliases {
            self.index.insert(key(alias), slot);
        }
        self.index.insert(key(&record.name), slot);
        self
    }

    /// Add a weather observation, keeping the latest per district
    pub fn with_weather(mut self, state: &str, district: &str, record: WeatherRecord) -> Self {
        let district_key = (key(state), key(district));
        let newer = self
            .weather
            .get(&district_key)
            .map_or(true, |existing| record.observed_at >= existing.observed_at);
        if newer {
            self.weather.insert(district_key, record);
        }
        self
    }

    /// Number of crop records
    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }
}

#[async_trait]
impl RecordGateway for MemoryGateway {
    type Error = Infallible;

    async fn lookup_crop_record(&self, name_or_alias: &str) -> Result<Option<CropRecord>, Infallible> {
        Ok(self
            .index
            .get(&key(name_or_alias))
            .map(|&slot| self.crops[slot].clone()))
    }

    async fn lookup_current_weather(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Option<WeatherRecord>, Infallible> {
        Ok(self.weather.get(&(key(state), key(district))).cloned())
    }
}
