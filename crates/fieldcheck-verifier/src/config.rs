//! Verifier configuration

use crate::VerifierError;
use serde::{Deserialize, Serialize};

/// Tolerances and confidence levels for the domain verifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum relative yield deviation still counted as correct (strict `<`)
    pub yield_tolerance: f64,

    /// Maximum relative crop duration deviation still counted as correct (strict `<`)
    pub duration_tolerance: f64,

    /// Maximum absolute temperature difference in °C (strict `<`)
    pub temperature_tolerance_c: f64,

    /// Maximum absolute humidity difference in percentage points (strict `<`)
    pub humidity_tolerance_pct: f64,

    /// Confidence of a check that agrees with a numeric reference value
    pub match_confidence: f64,

    /// Confidence of a check that agrees with a categorical or exact fact
    pub exact_match_confidence: f64,

    /// Confidence of a check that contradicts the reference data
    pub mismatch_confidence: f64,

    /// Confidence of a claim with nothing checkable in it
    pub neutral_confidence: f64,

    /// Confidence of a rain mention (no numeric cross-check exists)
    pub rain_confidence: f64,

    /// Confidence of every claim in the general category
    pub general_confidence: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            yield_tolerance: 0.30,
            duration_tolerance: 0.20,
            temperature_tolerance_c: 5.0,
            humidity_tolerance_pct: 15.0,
            match_confidence: 0.9,
            exact_match_confidence: 0.95,
            mismatch_confidence: 0.3,
            neutral_confidence: 0.6,
            rain_confidence: 0.7,
            general_confidence: 0.7,
        }
    }
}

impl VerifierConfig {
    /// Create a strict configuration (tighter tolerances)
    pub fn strict() -> Self {
        Self {
            yield_tolerance: 0.15,
            duration_tolerance: 0.10,
            temperature_tolerance_c: 3.0,
            humidity_tolerance_pct: 10.0,
            mismatch_confidence: 0.2,
            neutral_confidence: 0.5,
            ..Self::default()
        }
    }

    /// Create a lenient configuration (wider tolerances)
    pub fn lenient() -> Self {
        Self {
            yield_tolerance: 0.40,
            duration_tolerance: 0.30,
            temperature_tolerance_c: 7.0,
            humidity_tolerance_pct: 20.0,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), VerifierError> {
        let tolerances = [
            ("yield_tolerance", self.yield_tolerance),
            ("duration_tolerance", self.duration_tolerance),
            ("temperature_tolerance_c", self.temperature_tolerance_c),
            ("humidity_tolerance_pct", self.humidity_tolerance_pct),
        ];
        for (name, value) in tolerances {
            if !(value > 0.0) || !value.is_finite() {
                return Err(VerifierError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let confidences = [
            ("match_confidence", self.match_confidence),
            ("exact_match_confidence", self.exact_match_confidence),
            ("mismatch_confidence", self.mismatch_confidence),
            ("neutral_confidence", self.neutral_confidence),
            ("rain_confidence", self.rain_confidence),
            ("general_confidence", self.general_confidence),
        ];
        for (name, value) in confidences {
            if !(0.0..=1.0).contains(&value) {
                return Err(VerifierError::Config(format!(
                    "{} {} is outside [0.0, 1.0]",
                    name, value
                )));
            }
        }

        if self.mismatch_confidence >= self.match_confidence {
            return Err(VerifierError::Config(format!(
                "mismatch_confidence {} must be less than match_confidence {}",
                self.mismatch_confidence, self.match_confidence
            )));
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, VerifierError> {
        toml::from_str(toml_str)
            .map_err(|e| VerifierError::Config(format!("Failed to parse TOML: {}", e)))
    }
}
