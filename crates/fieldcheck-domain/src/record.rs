//! Reference records fetched from the record gateway
//!
//! Records are read-only snapshots; nothing in the engine mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indian cropping season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon season (sown June-July)
    Kharif,
    /// Winter season (sown October-November)
    Rabi,
    /// Summer season between rabi and kharif
    Zaid,
    /// Grown year-round
    Perennial,
}

impl Season {
    /// Seasons that can be asserted in a claim (perennial is only a record value)
    pub const CLAIMABLE: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    /// Get the season name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
            Season::Perennial => "perennial",
        }
    }

    /// Parse a season from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "zaid" | "zayed" => Some(Season::Zaid),
            "perennial" => Some(Season::Perennial),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid season: {}", s))
    }
}

/// Unit an average yield is recorded in (always per hectare)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldUnit {
    /// Kilograms per hectare
    KgPerHectare,
    /// Quintals (100 kg) per hectare
    QuintalPerHectare,
    /// Tonnes (1000 kg) per hectare
    TonnePerHectare,
}

impl YieldUnit {
    /// Kilograms in one unit of this yield measure
    pub fn kilograms(&self) -> f64 {
        match self {
            YieldUnit::KgPerHectare => 1.0,
            YieldUnit::QuintalPerHectare => 100.0,
            YieldUnit::TonnePerHectare => 1000.0,
        }
    }

    /// Short label used in corrections
    pub fn label(&self) -> &'static str {
        match self {
            YieldUnit::KgPerHectare => "kg/hectare",
            YieldUnit::QuintalPerHectare => "quintals/hectare",
            YieldUnit::TonnePerHectare => "tonnes/hectare",
        }
    }

    /// Parse a unit from its storage name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg_per_hectare" | "kg/ha" | "kg" => Some(YieldUnit::KgPerHectare),
            "quintal_per_hectare" | "q/ha" | "quintal" => Some(YieldUnit::QuintalPerHectare),
            "tonne_per_hectare" | "t/ha" | "tonne" => Some(YieldUnit::TonnePerHectare),
            _ => None,
        }
    }

    /// Storage name of the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            YieldUnit::KgPerHectare => "kg_per_hectare",
            YieldUnit::QuintalPerHectare => "quintal_per_hectare",
            YieldUnit::TonnePerHectare => "tonne_per_hectare",
        }
    }
}

/// Agronomic reference data for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    /// Canonical crop name (e.g. "Rice")
    pub name: String,

    /// Alternative names the crop is looked up by (e.g. "paddy", "dhan")
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Main growing season
    pub season: Season,

    /// Average yield, expressed in `yield_unit`
    pub average_yield: f64,

    /// Unit of `average_yield`
    pub yield_unit: YieldUnit,

    /// Maximum crop duration from sowing to harvest, in days
    pub duration_max_days: u32,
}

impl CropRecord {
    /// Average yield converted to kilograms per hectare
    pub fn average_yield_kg(&self) -> f64 {
        self.average_yield * self.yield_unit.kilograms()
    }
}

/// Current weather observation for one district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Current temperature in degrees Celsius
    pub temperature_c: f64,

    /// Current relative humidity in percent
    pub humidity_pct: f64,

    /// Observation time (seconds since the Unix epoch)
    pub observed_at: u64,
}

/// A reference record of any domain
#[derive(Debug, Clone, PartialEq)]
pub enum DomainRecord {
    /// Crop agronomy record
    Crop(CropRecord),
    /// Current weather record
    Weather(WeatherRecord),
}

/// Result of asking the gateway for the record a claim needs
///
/// Absence and failure are ordinary values here; verifiers decide how to
/// score them.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLookup {
    /// The record exists
    Found(DomainRecord),

    /// No record matches (unknown crop, no observation for the district)
    NotFound {
        /// What was looked up, for the correction text
        subject: String,
    },

    /// The gateway errored or timed out
    Failed {
        /// What was looked up
        subject: String,
        /// Gateway error message (logged, not shown to users)
        reason: String,
    },

    /// No lookup applies (finance, general, or the context named nothing)
    NotApplicable,
}

impl RecordLookup {
    /// The crop record, if this lookup found one
    pub fn crop(&self) -> Option<&CropRecord> {
        match self {
            RecordLookup::Found(DomainRecord::Crop(record)) => Some(record),
            _ => None,
        }
    }

    /// The weather record, if this lookup found one
    pub fn weather(&self) -> Option<&WeatherRecord> {
        match self {
            RecordLookup::Found(DomainRecord::Weather(record)) => Some(record),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse() {
        assert_eq!(Season::parse("Kharif"), Some(Season::Kharif));
        assert_eq!(Season::parse("zayed"), Some(Season::Zaid));
        assert_eq!(Season::parse("monsoon"), None);
    }

    #[test]
    fn test_average_yield_kg() {
        let record = CropRecord {
            name: "Wheat".to_string(),
            aliases: vec![],
            season: Season::Rabi,
            average_yield: 35.0,
            yield_unit: YieldUnit::QuintalPerHectare,
            duration_max_days: 150,
        };
        assert_eq!(record.average_yield_kg(), 3500.0);
    }

    #[test]
    fn test_lookup_accessors() {
        let weather = WeatherRecord {
            temperature_c: 31.0,
            humidity_pct: 70.0,
            observed_at: 1_700_000_000,
        };
        let lookup = RecordLookup::Found(DomainRecord::Weather(weather.clone()));
        assert_eq!(lookup.weather(), Some(&weather));
        assert!(lookup.crop().is_none());
        assert!(RecordLookup::NotApplicable.weather().is_none());
    }
}
