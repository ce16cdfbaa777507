//! Reliability module - coarse tiers of an aggregate confidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reliability tier of a verified response
///
/// Tiers are a pure, monotonic function of the aggregate confidence:
/// - High: confidence above 0.8
/// - Medium: confidence above 0.6
/// - Low: everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    /// Confidence at or below the medium bound
    Low,

    /// Confidence above the medium bound, at or below the high bound
    Medium,

    /// Confidence above the high bound
    High,
}

impl Reliability {
    /// Classify a confidence with the default bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldcheck_domain::Reliability;
    ///
    /// assert_eq!(Reliability::from_confidence(0.85), Reliability::High);
    /// assert_eq!(Reliability::from_confidence(0.8), Reliability::Medium);
    /// assert_eq!(Reliability::from_confidence(0.4), Reliability::Low);
    /// ```
    pub fn from_confidence(confidence: f64) -> Self {
        ReliabilityThresholds::default().classify(confidence)
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Reliability::High => "high",
            Reliability::Medium => "medium",
            Reliability::Low => "low",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(Reliability::High),
            "medium" => Some(Reliability::Medium),
            "low" => Some(Reliability::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds (exclusive) of the high and medium tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityThresholds {
    /// Confidence must exceed this to be high
    pub high: f64,
    /// Confidence must exceed this to be medium
    pub medium: f64,
}

impl Default for ReliabilityThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            medium: 0.6,
        }
    }
}

impl ReliabilityThresholds {
    /// Map a confidence onto a tier (strict comparisons)
    pub fn classify(&self, confidence: f64) -> Reliability {
        if confidence > self.high {
            Reliability::High
        } else if confidence > self.medium {
            Reliability::Medium
        } else {
            Reliability::Low
        }
    }

    /// Check that both bounds lie in [0, 1] and medium < high
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.high) || !(0.0..=1.0).contains(&self.medium) {
            return Err(format!(
                "reliability bounds must be in [0.0, 1.0] (high: {}, medium: {})",
                self.high, self.medium
            ));
        }
        if self.medium >= self.high {
            return Err(format!(
                "medium bound {} must be less than high bound {}",
                self.medium, self.high
            ));
        }
        Ok(())
    }
}
