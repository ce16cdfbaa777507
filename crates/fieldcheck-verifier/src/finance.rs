//! Finance claim verification against compiled scheme facts
//!
//! Finance claims are never looked up in the record gateway. The facts for
//! the schemes farmers ask about most are compiled in and can be replaced
//! through [`FinanceFacts`].

use crate::checks::{format_amount, CheckKind, CheckSet};
use crate::VerifierConfig;
use fieldcheck_domain::traits::Verifier;
use fieldcheck_domain::{Claim, DomainCategory, RecordLookup, VerificationOutcome};
use fieldcheck_extractor::quantity::{plain_numbers, quantities_of, Dimension};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INCOME_SUPPORT_KEYWORDS: [&str; 4] = ["pm-kisan", "pm kisan", "pmkisan", "kisan samman"];
const CREDIT_CARD_KEYWORDS: [&str; 2] = ["kisan credit card", "kcc"];
const CROP_INSURANCE_KEYWORDS: [&str; 4] = ["pmfby", "fasal bima", "crop insurance", "crop-insurance"];
const INSTALMENT_KEYWORDS: [&str; 2] = ["instal", "four months"];

/// Words that mark a bare number as a scheme amount ("6000 per year")
const AMOUNT_CUES: [&str; 10] = [
    "per year",
    "a year",
    "every year",
    "each year",
    "per annum",
    "annually",
    "yearly",
    "per instal",
    "each instal",
    "every instal",
];

/// Words that end one premium clause and start the next
const CLAUSE_SEPARATORS: [&str; 6] = [",", ";", " and ", " but ", " while ", " whereas "];

const AMOUNT_EPSILON: f64 = 0.5;
const RATE_EPSILON: f64 = 1e-6;

/// Farmer's premium share for one class of crops under PMFBY
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumRate {
    /// Name used in corrections ("kharif")
    pub label: String,
    /// Words that select this rate when found in a claim
    pub keywords: Vec<String>,
    /// Premium as a percentage of the sum insured
    pub rate_pct: f64,
}

impl PremiumRate {
    /// Create a premium rate selected by its label alone
    pub fn new(label: impl Into<String>, rate_pct: f64) -> Self {
        let label = label.into();
        Self {
            keywords: vec![label.to_lowercase()],
            label,
            rate_pct,
        }
    }

    /// Add a selecting keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into().to_lowercase());
        self
    }

    /// Byte spans of every keyword occurrence in lowercased text
    fn mentions_in(&self, lower: &str) -> Vec<(usize, usize)> {
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .flat_map(|k| lower.match_indices(k.as_str()).map(|(i, m)| (i, i + m.len())))
            .collect()
    }
}

/// A season keyword found in a claim, with the rate it selects
#[derive(Debug, Clone, Copy)]
struct RateMention<'a> {
    start: usize,
    end: usize,
    rate: &'a PremiumRate,
}

/// Bare numbers directly followed by an amount cue
///
/// Years ("launched in 2019") and counts ("1100 lakh families") carry no cue
/// and are left alone.
fn bare_amounts(text: &str) -> Vec<f64> {
    let lower = text.to_ascii_lowercase();
    plain_numbers(text)
        .into_iter()
        .filter(|n| {
            let after = lower[n.end..].trim_start();
            AMOUNT_CUES.iter().any(|cue| after.starts_with(cue))
        })
        .map(|n| n.value)
        .collect()
}

/// Byte range of the clause containing `pos`
fn clause_around(lower: &str, pos: usize) -> (usize, usize) {
    let bytes = lower.as_bytes();
    let mut start = 0;
    let mut end = lower.len();
    for separator in CLAUSE_SEPARATORS {
        for (i, _) in lower.match_indices(separator) {
            // Digit-group commas ("1,00,000") do not separate clauses
            if separator == ","
                && i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit())
            {
                continue;
            }
            let sep_end = i + separator.len();
            if sep_end <= pos {
                start = start.max(sep_end);
            } else if i >= pos {
                end = end.min(i);
            }
        }
    }
    (start, end)
}

fn gap(a: (usize, usize), b: (usize, usize)) -> usize {
    if a.1 <= b.0 {
        b.0 - a.1
    } else if b.1 <= a.0 {
        a.0 - b.1
    } else {
        0
    }
}

/// Rate named closest to a percentage, preferring keywords in its own clause
fn nearest_rate<'a>(
    lower: &str,
    mentions: &[RateMention<'a>],
    start: usize,
    end: usize,
) -> Option<&'a PremiumRate> {
    let (clause_start, clause_end) = clause_around(lower, start);
    let in_clause: Vec<&RateMention<'a>> = mentions
        .iter()
        .filter(|m| m.start >= clause_start && m.start < clause_end)
        .collect();
    let candidates: Vec<&RateMention<'a>> = if in_clause.is_empty() {
        mentions.iter().collect()
    } else {
        in_clause
    };

    candidates
        .into_iter()
        .min_by_key(|m| gap((m.start, m.end), (start, end)))
        .map(|m| m.rate)
}

/// Scheme facts the finance verifier checks against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceFacts {
    /// PM-KISAN income support per year, in rupees
    pub income_support_annual: f64,
    /// PM-KISAN instalment, in rupees
    pub income_support_instalment: f64,
    /// Lowest Kisan Credit Card interest rate, in percent per year
    pub credit_interest_min_pct: f64,
    /// Highest Kisan Credit Card interest rate, in percent per year
    pub credit_interest_max_pct: f64,
    /// PMFBY premium rates
    pub premium_rates: Vec<PremiumRate>,
}

impl Default for FinanceFacts {
    fn default() -> Self {
        Self {
            income_support_annual: 6000.0,
            income_support_instalment: 2000.0,
            credit_interest_min_pct: 7.0,
            credit_interest_max_pct: 9.0,
            premium_rates: vec![
                PremiumRate::new("kharif", 2.0),
                PremiumRate::new("rabi", 1.5),
                PremiumRate::new("commercial and horticultural", 5.0)
                    .with_keyword("commercial")
                    .with_keyword("horticultur"),
            ],
        }
    }
}

impl FinanceFacts {
    fn income_support_correction(&self) -> String {
        format!(
            "PM-KISAN provides Rs. {} per year to eligible farmer families, paid in instalments of Rs. {}.",
            format_amount(self.income_support_annual),
            format_amount(self.income_support_instalment)
        )
    }

    fn credit_interest_correction(&self) -> String {
        format!(
            "Kisan Credit Card loans carry interest of {}% to {}% per year.",
            format_amount(self.credit_interest_min_pct),
            format_amount(self.credit_interest_max_pct)
        )
    }

    fn premium_correction(&self) -> String {
        let rates: Vec<String> = self
            .premium_rates
            .iter()
            .map(|r| format!("{}% for {} crops", format_amount(r.rate_pct), r.label))
            .collect();
        format!(
            "Under PMFBY the farmer's premium is {} (share of the sum insured).",
            rates.join(", ")
        )
    }
}

/// Verifies income support, credit and insurance claims against [`FinanceFacts`]
#[derive(Debug, Clone, Default)]
pub struct FinanceVerifier {
    config: VerifierConfig,
    facts: FinanceFacts,
}

impl FinanceVerifier {
    /// Create a finance verifier with the default scheme facts
    pub fn new(config: VerifierConfig) -> Self {
        Self {
            config,
            facts: FinanceFacts::default(),
        }
    }

    /// Replace the scheme facts
    pub fn with_facts(mut self, facts: FinanceFacts) -> Self {
        self.facts = facts;
        self
    }

    /// Scheme facts in use
    pub fn facts(&self) -> &FinanceFacts {
        &self.facts
    }

    fn check_income_support(&self, claim: &Claim, checks: &mut CheckSet) {
        if !claim.mentions_any(&INCOME_SUPPORT_KEYWORDS) {
            return;
        }

        let mut amounts: Vec<f64> = quantities_of(claim.text(), Dimension::Currency)
            .into_iter()
            .map(|q| q.value)
            .collect();
        if amounts.is_empty() {
            amounts = bare_amounts(claim.text());
        }

        let instalments_mentioned = claim.mentions_any(&INSTALMENT_KEYWORDS);
        for amount in amounts {
            let annual = (amount - self.facts.income_support_annual).abs() < AMOUNT_EPSILON;
            let instalment = instalments_mentioned
                && (amount - self.facts.income_support_instalment).abs() < AMOUNT_EPSILON;
            if annual || instalment {
                checks.pass(CheckKind::IncomeSupport, self.config.exact_match_confidence);
            } else {
                checks.fail(
                    CheckKind::IncomeSupport,
                    self.config.mismatch_confidence,
                    self.facts.income_support_correction(),
                );
            }
        }
    }

    fn check_credit_interest(&self, claim: &Claim, checks: &mut CheckSet) {
        if !claim.mentions_any(&CREDIT_CARD_KEYWORDS) {
            return;
        }
        let band = self.facts.credit_interest_min_pct - RATE_EPSILON
            ..=self.facts.credit_interest_max_pct + RATE_EPSILON;
        for quantity in quantities_of(claim.text(), Dimension::Ratio) {
            if band.contains(&quantity.value) {
                checks.pass(CheckKind::CreditInterest, self.config.match_confidence);
            } else {
                checks.fail(
                    CheckKind::CreditInterest,
                    self.config.mismatch_confidence,
                    self.facts.credit_interest_correction(),
                );
            }
        }
    }

    fn rate_mentions(&self, lower: &str) -> Vec<RateMention<'_>> {
        let mut mentions: Vec<RateMention<'_>> = self
            .facts
            .premium_rates
            .iter()
            .flat_map(|rate| {
                rate.mentions_in(lower)
                    .into_iter()
                    .map(move |(start, end)| RateMention { start, end, rate })
            })
            .collect();
        mentions.sort_by_key(|m| m.start);
        mentions
    }

    fn check_insurance_premium(&self, claim: &Claim, checks: &mut CheckSet) {
        if !claim.mentions_any(&CROP_INSURANCE_KEYWORDS) {
            return;
        }
        // ASCII lowering keeps byte offsets aligned with the quantities
        let lower = claim.text().to_ascii_lowercase();
        let mentions = self.rate_mentions(&lower);
        if mentions.is_empty() {
            return;
        }

        for quantity in quantities_of(claim.text(), Dimension::Ratio) {
            let Some(rate) = nearest_rate(&lower, &mentions, quantity.start, quantity.end) else {
                continue;
            };
            if (quantity.value - rate.rate_pct).abs() < RATE_EPSILON {
                checks.pass(CheckKind::InsurancePremium, self.config.exact_match_confidence);
            } else {
                checks.fail(
                    CheckKind::InsurancePremium,
                    self.config.mismatch_confidence,
                    self.facts.premium_correction(),
                );
            }
        }
    }
}

impl Verifier for FinanceVerifier {
    fn category(&self) -> DomainCategory {
        DomainCategory::Finance
    }

    fn verify(&self, claim: &Claim, _record: &RecordLookup) -> VerificationOutcome {
        let mut checks = CheckSet::new();
        self.check_income_support(claim, &mut checks);
        self.check_credit_interest(claim, &mut checks);
        self.check_insurance_premium(claim, &mut checks);

        debug!(
            "Finance claim {}: {:?}",
            claim.position(),
            checks.results().iter().map(|r| (r.kind, r.passed)).collect::<Vec<_>>()
        );

        checks.into_outcome(self.config.neutral_confidence)
    }
}
