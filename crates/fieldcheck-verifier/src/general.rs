//! Verifier for responses outside the crop, weather and finance domains

use crate::VerifierConfig;
use fieldcheck_domain::traits::Verifier;
use fieldcheck_domain::{Claim, DomainCategory, RecordLookup, VerificationOutcome};

/// Accepts every claim at a fixed, moderate confidence
///
/// There is no reference data for general agricultural advice, so nothing is
/// ever refuted here.
#[derive(Debug, Clone, Default)]
pub struct GeneralVerifier {
    config: VerifierConfig,
}

impl GeneralVerifier {
    /// Create a new general verifier
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }
}

impl Verifier for GeneralVerifier {
    fn category(&self) -> DomainCategory {
        DomainCategory::General
    }

    fn verify(&self, _claim: &Claim, _record: &RecordLookup) -> VerificationOutcome {
        VerificationOutcome::neutral(self.config.general_confidence)
    }
}
