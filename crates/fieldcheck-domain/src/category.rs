//! Domain categories - which verifier and which reference records apply

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject domain of a response
///
/// The category is supplied by the caller and selects exactly one verifier
/// for every claim in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainCategory {
    /// Crop agronomy (yield, duration, season)
    Crop,

    /// Current weather (temperature, humidity, rain)
    Weather,

    /// Farm finance schemes (income support, credit, insurance)
    Finance,

    /// Anything else; no reference data is consulted
    General,
}

impl DomainCategory {
    /// All categories, in declaration order
    pub const ALL: [DomainCategory; 4] = [
        DomainCategory::Crop,
        DomainCategory::Weather,
        DomainCategory::Finance,
        DomainCategory::General,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCategory::Crop => "crop",
            DomainCategory::Weather => "weather",
            DomainCategory::Finance => "finance",
            DomainCategory::General => "general",
        }
    }

    /// Parse a category from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "crop" | "crops" => Some(DomainCategory::Crop),
            "weather" => Some(DomainCategory::Weather),
            "finance" | "financial" => Some(DomainCategory::Finance),
            "general" => Some(DomainCategory::General),
            _ => None,
        }
    }

    /// Whether verifying this category requires a gateway lookup
    pub fn needs_record(&self) -> bool {
        matches!(self, DomainCategory::Crop | DomainCategory::Weather)
    }
}

impl fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DomainCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid domain category: {}", s))
    }
}
