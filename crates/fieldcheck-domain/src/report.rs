//! Aggregate report - the engine's externally visible output

use crate::Reliability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Verdict on a whole response
///
/// Serialized with camelCase field names; this JSON shape is the contract
/// with the surrounding HTTP service. Sources are kept in a sorted set so
/// identical inputs serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    /// Every claim verified and confidence above the domain threshold
    pub overall_verification: bool,

    /// Arithmetic mean of the per-claim confidences
    pub confidence: f64,

    /// Number of claims whose outcome was verified
    pub verified_claims: usize,

    /// Number of claims extracted from the response
    pub total_claims: usize,

    /// Provenance of the reference data consulted
    pub sources: BTreeSet<String>,

    /// Correction texts of the unverified claims, in claim order
    pub corrections: Vec<String>,

    /// Reliability tier of `confidence`
    pub reliability: Reliability,
}

impl AggregateReport {
    /// Report for a response with nothing to verify
    pub fn empty() -> Self {
        Self {
            overall_verification: false,
            confidence: 0.0,
            verified_claims: 0,
            total_claims: 0,
            sources: BTreeSet::new(),
            corrections: Vec::new(),
            reliability: Reliability::Low,
        }
    }

    /// Whether any corrections were produced
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }
}
