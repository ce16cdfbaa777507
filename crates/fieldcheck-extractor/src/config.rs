//! Configuration for the claim extractor

use serde::{Deserialize, Serialize};

/// Configuration for the claim extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Fragments with this many characters or fewer (after trimming) are dropped
    pub min_claim_chars: usize,

    /// Treat a `.` between two digits as a decimal point, not a terminator
    #[serde(default = "default_true")]
    pub keep_decimal_points: bool,

    /// Words whose trailing `.` does not end a sentence (case-insensitive)
    #[serde(default = "default_abbreviations")]
    pub abbreviations: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_abbreviations() -> Vec<String> {
    ["rs", "approx", "avg", "viz", "govt", "dr"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_claim_chars: 10,
            keep_decimal_points: true,
            abbreviations: default_abbreviations(),
        }
    }
}

impl ExtractorConfig {
    /// Literal preset: every `.`, `!` and `?` terminates a sentence
    pub fn literal() -> Self {
        Self {
            min_claim_chars: 10,
            keep_decimal_points: false,
            abbreviations: Vec::new(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.abbreviations.iter().any(|a| a.trim().is_empty()) {
            return Err("abbreviations must not contain empty entries".to_string());
        }
        if self
            .abbreviations
            .iter()
            .any(|a| !a.chars().all(|c| c.is_alphabetic()))
        {
            return Err("abbreviations may only contain letters".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
