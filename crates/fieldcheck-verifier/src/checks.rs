//! Individual checks within a claim and how they fold into one outcome

use fieldcheck_domain::VerificationOutcome;
use std::fmt;

/// Correction used when the gateway failed or timed out
pub const GATEWAY_UNAVAILABLE: &str =
    "Reference data is temporarily unavailable, so this information could not be verified.";

/// Kind of assertion a check looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Crop yield (number + mass unit)
    Yield,
    /// Crop duration (number + days/weeks/months)
    Duration,
    /// Crop season keyword
    Season,
    /// Temperature (number + °C)
    Temperature,
    /// Relative humidity (number + % with "humidity")
    Humidity,
    /// Rain or precipitation mention
    Rain,
    /// PM-KISAN annual amount
    IncomeSupport,
    /// Kisan Credit Card interest rate
    CreditInterest,
    /// PMFBY premium percentage for a season
    InsurancePremium,
}

impl CheckKind {
    /// Get the check name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Yield => "yield",
            CheckKind::Duration => "duration",
            CheckKind::Season => "season",
            CheckKind::Temperature => "temperature",
            CheckKind::Humidity => "humidity",
            CheckKind::Rain => "rain",
            CheckKind::IncomeSupport => "income_support",
            CheckKind::CreditInterest => "credit_interest",
            CheckKind::InsurancePremium => "insurance_premium",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// What was checked
    pub kind: CheckKind,
    /// Whether the claim agreed with the reference value
    pub passed: bool,
    /// Confidence of this check
    pub confidence: f64,
    /// Correction, when the check failed
    pub correction: Option<String>,
}

/// Checks accumulated for one claim
#[derive(Debug, Default)]
pub(crate) struct CheckSet {
    results: Vec<CheckResult>,
}

impl CheckSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pass(&mut self, kind: CheckKind, confidence: f64) {
        self.results.push(CheckResult {
            kind,
            passed: true,
            confidence,
            correction: None,
        });
    }

    pub(crate) fn fail(&mut self, kind: CheckKind, confidence: f64, correction: String) {
        self.results.push(CheckResult {
            kind,
            passed: false,
            confidence,
            correction: Some(correction),
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub(crate) fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Fold the checks into one outcome
    ///
    /// No checks gives a neutral outcome. Otherwise the claim is verified
    /// only if every check passed, takes the lowest check confidence, and
    /// carries the failed checks' corrections joined by a space (duplicates
    /// dropped).
    pub(crate) fn into_outcome(self, neutral_confidence: f64) -> VerificationOutcome {
        if self.results.is_empty() {
            return VerificationOutcome::neutral(neutral_confidence);
        }

        let confidence = self
            .results
            .iter()
            .map(|r| r.confidence)
            .fold(f64::INFINITY, f64::min);

        let mut corrections: Vec<&str> = Vec::new();
        for correction in self.results.iter().filter_map(|r| r.correction.as_deref()) {
            if !corrections.contains(&correction) {
                corrections.push(correction);
            }
        }

        if corrections.is_empty() {
            VerificationOutcome::verified(confidence)
        } else {
            VerificationOutcome::refuted(confidence, corrections.join(" "))
        }
    }
}

/// Format a number without a trailing ".0" and with at most one decimal
pub(crate) fn format_amount(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Relative deviation of `claimed` from a positive `actual`
pub(crate) fn relative_deviation(claimed: f64, actual: f64) -> Option<f64> {
    (actual > 0.0).then(|| (claimed - actual).abs() / actual)
}
