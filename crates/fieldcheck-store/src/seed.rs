//! JSON seed format for reference data
//!
//! ```json
//! {
//!   "crops": [
//!     {
//!       "name": "Rice",
//!       "aliases": ["paddy", "dhan"],
//!       "season": "kharif",
//!       "average_yield": 4000,
//!       "yield_unit": "kg_per_hectare",
//!       "duration_max_days": 150
//!     }
//!   ],
//!   "weather": [
//!     {
//!       "state": "Maharashtra",
//!       "district": "Pune",
//!       "temperature_c": 31.5,
//!       "humidity_pct": 62,
//!       "observed_at": 1718000000
//!     }
//!   ]
//! }
//! ```

use crate::StoreError;
use fieldcheck_domain::{CropRecord, WeatherRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Weather observation tagged with its district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeed {
    /// State name
    pub state: String,
    /// District name
    pub district: String,
    /// The observation
    #[serde(flatten)]
    pub record: WeatherRecord,
}

/// Reference data to load into a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSeed {
    /// Crop records
    #[serde(default)]
    pub crops: Vec<CropRecord>,
    /// Weather observations
    #[serde(default)]
    pub weather: Vec<WeatherSeed>,
}

/// Number of records a seed contained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    /// Crop records loaded
    pub crops: usize,
    /// Weather observations loaded
    pub observations: usize,
}

impl ReferenceSeed {
    /// Parse a seed from JSON text
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a seed file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Record counts
    pub fn summary(&self) -> SeedSummary {
        SeedSummary {
            crops: self.crops.len(),
            observations: self.weather.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_domain::{Season, YieldUnit};

    #[test]
    fn test_parse_seed() {
        let seed = ReferenceSeed::from_json(
            r#"{
                "crops": [{
                    "name": "Wheat",
                    "season": "rabi",
                    "average_yield": 35,
                    "yield_unit": "quintal_per_hectare",
                    "duration_max_days": 140
                }],
                "weather": [{
                    "state": "Punjab",
                    "district": "Ludhiana",
                    "temperature_c": 18.5,
                    "humidity_pct": 70,
                    "observed_at": 1700000000
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(seed.crops[0].season, Season::Rabi);
        assert_eq!(seed.crops[0].yield_unit, YieldUnit::QuintalPerHectare);
        assert!(seed.crops[0].aliases.is_empty());
        assert_eq!(seed.weather[0].record.temperature_c, 18.5);
        assert_eq!(seed.summary(), SeedSummary { crops: 1, observations: 1 });
    }

    #[test]
    fn test_sections_are_optional() {
        let seed = ReferenceSeed::from_json("{}").unwrap();
        assert_eq!(seed, ReferenceSeed::default());
    }

    #[test]
    fn test_rejects_unknown_season() {
        let result = ReferenceSeed::from_json(
            r#"{"crops": [{"name": "Rice", "season": "winter", "average_yield": 1,
                "yield_unit": "kg_per_hectare", "duration_max_days": 1}]}"#,
        );
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
