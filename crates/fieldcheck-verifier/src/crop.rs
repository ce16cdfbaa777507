//! Crop claim verification

use crate::checks::{format_amount, relative_deviation, CheckKind, CheckSet, GATEWAY_UNAVAILABLE};
use crate::VerifierConfig;
use fieldcheck_domain::traits::Verifier;
use fieldcheck_domain::{Claim, CropRecord, DomainCategory, RecordLookup, Season, VerificationOutcome};
use fieldcheck_extractor::quantity::{quantities_of, Dimension};
use tracing::debug;

/// Verifies yield, duration and season assertions against a crop record
#[derive(Debug, Clone, Default)]
pub struct CropVerifier {
    config: VerifierConfig,
}

impl CropVerifier {
    /// Create a new crop verifier
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Yield claim: a number followed by a mass unit
    fn check_yield(&self, claim: &Claim, crop: &CropRecord, checks: &mut CheckSet) {
        let actual_kg = crop.average_yield_kg();
        for quantity in quantities_of(claim.text(), Dimension::Mass) {
            let Some(deviation) = relative_deviation(quantity.base_value(), actual_kg) else {
                continue;
            };
            if deviation < self.config.yield_tolerance {
                checks.pass(CheckKind::Yield, self.config.match_confidence);
            } else {
                checks.fail(
                    CheckKind::Yield,
                    self.config.mismatch_confidence,
                    format!(
                        "The average yield of {} is about {} {}.",
                        crop.name,
                        format_amount(crop.average_yield),
                        crop.yield_unit.label()
                    ),
                );
            }
        }
    }

    /// Duration claim: a number followed by days, weeks or months
    fn check_duration(&self, claim: &Claim, crop: &CropRecord, checks: &mut CheckSet) {
        let actual_days = f64::from(crop.duration_max_days);
        for quantity in quantities_of(claim.text(), Dimension::Duration) {
            let Some(deviation) = relative_deviation(quantity.base_value(), actual_days) else {
                continue;
            };
            if deviation < self.config.duration_tolerance {
                checks.pass(CheckKind::Duration, self.config.match_confidence);
            } else {
                checks.fail(
                    CheckKind::Duration,
                    self.config.mismatch_confidence,
                    format!(
                        "{} takes up to {} days from sowing to harvest.",
                        crop.name, crop.duration_max_days
                    ),
                );
            }
        }
    }

    /// Season claim: one or more of kharif, rabi, zaid mentioned
    fn check_season(&self, claim: &Claim, crop: &CropRecord, checks: &mut CheckSet) {
        let lower = claim.lowercase();
        let mentioned: Vec<Season> = Season::CLAIMABLE
            .into_iter()
            .filter(|s| lower.contains(s.as_str()) || (*s == Season::Zaid && lower.contains("zayed")))
            .collect();

        if mentioned.is_empty() {
            return;
        }

        if mentioned.contains(&crop.season) {
            checks.pass(CheckKind::Season, self.config.exact_match_confidence);
        } else {
            checks.fail(
                CheckKind::Season,
                self.config.mismatch_confidence,
                format!("{} is grown in the {} season.", crop.name, crop.season),
            );
        }
    }
}

impl Verifier for CropVerifier {
    fn category(&self) -> DomainCategory {
        DomainCategory::Crop
    }

    fn verify(&self, claim: &Claim, record: &RecordLookup) -> VerificationOutcome {
        let crop = match record {
            RecordLookup::NotFound { subject } => {
                return VerificationOutcome::unavailable(format!(
                    "No reliable data is available for the crop '{}'.",
                    subject
                ));
            }
            RecordLookup::Failed { .. } => {
                return VerificationOutcome::unavailable(GATEWAY_UNAVAILABLE);
            }
            _ => match record.crop() {
                Some(crop) => crop,
                None => return VerificationOutcome::neutral(self.config.neutral_confidence),
            },
        };

        let mut checks = CheckSet::new();
        self.check_yield(claim, crop, &mut checks);
        self.check_duration(claim, crop, &mut checks);
        self.check_season(claim, crop, &mut checks);

        debug!(
            "Crop claim {} against '{}': {:?}",
            claim.position(),
            crop.name,
            checks.results().iter().map(|r| (r.kind, r.passed)).collect::<Vec<_>>()
        );

        checks.into_outcome(self.config.neutral_confidence)
    }
}
