//! Engine configuration
//!
//! One TOML document configures every stage:
//!
//! ```toml
//! correction_delimiter = "Corrections from verified reference data:"
//! lookup_timeout_ms = 2000
//!
//! [extractor]
//! min_claim_chars = 10
//!
//! [verifier]
//! yield_tolerance = 0.3
//!
//! [aggregation]
//! default_threshold = 0.7
//! finance_threshold = 0.8
//!
//! [reliability]
//! high = 0.8
//! medium = 0.6
//!
//! [sources]
//! crop = ["ICAR Database"]
//!
//! [sources.trust]
//! "ICAR Database" = 0.95
//! ```

use crate::EngineError;
use fieldcheck_domain::{DomainCategory, ReliabilityThresholds};
use fieldcheck_extractor::ExtractorConfig;
use fieldcheck_synthesizer::DEFAULT_DELIMITER;
use fieldcheck_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for a [`VerificationEngine`](crate::VerificationEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Line placed between a response and its appended corrections
    pub correction_delimiter: String,

    /// Per-lookup deadline in milliseconds; unset means no deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_timeout_ms: Option<u64>,

    /// Claim extraction
    pub extractor: ExtractorConfig,

    /// Domain verifier tolerances and confidences
    pub verifier: VerifierConfig,

    /// Pass thresholds for the overall verdict
    pub aggregation: AggregationConfig,

    /// Reliability tier bounds
    pub reliability: ReliabilityThresholds,

    /// Provenance strings and trust scores
    pub sources: SourcesConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            correction_delimiter: DEFAULT_DELIMITER.to_string(),
            lookup_timeout_ms: None,
            extractor: ExtractorConfig::default(),
            verifier: VerifierConfig::default(),
            aggregation: AggregationConfig::default(),
            reliability: ReliabilityThresholds::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Strict preset: tighter verifier tolerances and a higher bar to pass
    pub fn strict() -> Self {
        Self {
            verifier: VerifierConfig::strict(),
            aggregation: AggregationConfig {
                default_threshold: 0.75,
                finance_threshold: 0.85,
            },
            ..Self::default()
        }
    }

    /// Lenient preset: wider verifier tolerances
    pub fn lenient() -> Self {
        Self {
            verifier: VerifierConfig::lenient(),
            ..Self::default()
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), EngineError> {
        self.extractor
            .validate()
            .map_err(|e| EngineError::Config(format!("[extractor] {}", e)))?;
        self.verifier.validate()?;
        self.aggregation.validate()?;
        self.reliability
            .validate()
            .map_err(|e| EngineError::Config(format!("[reliability] {}", e)))?;
        self.sources.validate()?;

        if self.lookup_timeout_ms == Some(0) {
            return Err(EngineError::Config(
                "lookup_timeout_ms must be greater than zero when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, EngineError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Thresholds the mean confidence must exceed for an overall pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Threshold for crop, weather and general responses
    pub default_threshold: f64,

    /// Threshold for finance responses (misinformation costs more here)
    pub finance_threshold: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            default_threshold: 0.7,
            finance_threshold: 0.8,
        }
    }
}

impl AggregationConfig {
    /// Threshold for a category
    pub fn threshold_for(&self, category: DomainCategory) -> f64 {
        match category {
            DomainCategory::Finance => self.finance_threshold,
            DomainCategory::Crop | DomainCategory::Weather | DomainCategory::General => {
                self.default_threshold
            }
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("default_threshold", self.default_threshold),
            ("finance_threshold", self.finance_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::Config(format!(
                    "[aggregation] {} {} is outside [0.0, 1.0]",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Provenance strings per category and the trust table
///
/// The report's sources are chosen statically per category; they never
/// depend on which record was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Sources reported for crop responses
    pub crop: Vec<String>,
    /// Sources reported for weather responses
    pub weather: Vec<String>,
    /// Sources reported for finance responses
    pub finance: Vec<String>,
    /// Sources reported for general responses
    pub general: Vec<String>,
    /// Trust score per source name, in [0.0, 1.0]
    pub trust: BTreeMap<String, f64>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let trust = [
            ("ICAR Database", 0.95),
            ("India Meteorological Department", 0.9),
            ("Ministry of Agriculture & Farmers Welfare", 0.95),
            ("Agricultural Knowledge Base", 0.7),
        ]
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect();

        Self {
            crop: vec!["ICAR Database".to_string()],
            weather: vec!["India Meteorological Department".to_string()],
            finance: vec!["Ministry of Agriculture & Farmers Welfare".to_string()],
            general: vec!["Agricultural Knowledge Base".to_string()],
            trust,
        }
    }
}

impl SourcesConfig {
    /// Sources configured for a category
    pub fn for_category(&self, category: DomainCategory) -> &[String] {
        match category {
            DomainCategory::Crop => &self.crop,
            DomainCategory::Weather => &self.weather,
            DomainCategory::Finance => &self.finance,
            DomainCategory::General => &self.general,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        for category in DomainCategory::ALL {
            if self.for_category(category).iter().any(|s| s.trim().is_empty()) {
                return Err(EngineError::Config(format!(
                    "[sources] {} contains an empty source name",
                    category
                )));
            }
        }
        if let Some((name, score)) = self
            .trust
            .iter()
            .find(|(_, score)| !(0.0..=1.0).contains(*score))
        {
            return Err(EngineError::Config(format!(
                "[sources.trust] score {} for '{}' is outside [0.0, 1.0]",
                score, name
            )));
        }
        Ok(())
    }
}
