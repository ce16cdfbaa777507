//! Per-claim verification outcome

use serde::{Deserialize, Serialize};

/// Verdict on a single claim, produced by exactly one verifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the claim agrees with the reference data
    pub verified: bool,

    /// Confidence in the verdict [0.0, 1.0]
    pub confidence: f64,

    /// Human-readable statement of the true value, when the claim is wrong
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

impl VerificationOutcome {
    /// A claim that agrees with the reference data
    pub fn verified(confidence: f64) -> Self {
        Self {
            verified: true,
            confidence: confidence.clamp(0.0, 1.0),
            correction: None,
        }
    }

    /// A claim that contradicts the reference data
    pub fn refuted(confidence: f64, correction: impl Into<String>) -> Self {
        Self {
            verified: false,
            confidence: confidence.clamp(0.0, 1.0),
            correction: Some(correction.into()),
        }
    }

    /// A claim with nothing checkable in it
    ///
    /// Absence of a checkable assertion is not a contradiction, so the
    /// claim counts as verified at the given moderate confidence.
    pub fn neutral(confidence: f64) -> Self {
        Self::verified(confidence)
    }

    /// A claim whose reference data is missing or unreachable
    pub fn unavailable(correction: impl Into<String>) -> Self {
        Self::refuted(0.0, correction)
    }

    /// The correction text, if non-empty
    pub fn correction_text(&self) -> Option<&str> {
        self.correction.as_deref().filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(VerificationOutcome::verified(1.4).confidence, 1.0);
        assert_eq!(VerificationOutcome::refuted(-0.2, "x").confidence, 0.0);
    }

    #[test]
    fn test_unavailable_outcome() {
        let outcome = VerificationOutcome::unavailable("No reliable data available");
        assert!(!outcome.verified);
        assert_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.correction_text(), Some("No reliable data available"));
    }

    #[test]
    fn test_blank_correction_is_ignored() {
        let outcome = VerificationOutcome::refuted(0.3, "  ");
        assert_eq!(outcome.correction_text(), None);
    }
}
