//! Folding per-claim outcomes into the response verdict

use crate::config::AggregationConfig;
use fieldcheck_domain::{AggregateReport, DomainCategory, ReliabilityThresholds, VerificationOutcome};
use std::collections::BTreeSet;

/// Combines claim outcomes into an [`AggregateReport`]
#[derive(Debug, Clone, Default)]
pub struct ConfidenceAggregator {
    aggregation: AggregationConfig,
    reliability: ReliabilityThresholds,
}

impl ConfidenceAggregator {
    /// Create an aggregator
    pub fn new(aggregation: AggregationConfig, reliability: ReliabilityThresholds) -> Self {
        Self {
            aggregation,
            reliability,
        }
    }

    /// Aggregate the outcomes of one response
    ///
    /// Confidence is the arithmetic mean of the claim confidences. The
    /// response passes only when every claim is verified and the mean
    /// exceeds the category threshold. Zero outcomes give the empty report.
    pub fn aggregate(
        &self,
        category: DomainCategory,
        outcomes: &[VerificationOutcome],
        sources: BTreeSet<String>,
    ) -> AggregateReport {
        if outcomes.is_empty() {
            return AggregateReport::empty();
        }

        let total_claims = outcomes.len();
        let verified_claims = outcomes.iter().filter(|o| o.verified).count();
        let confidence =
            outcomes.iter().map(|o| o.confidence).sum::<f64>() / total_claims as f64;

        let corrections = outcomes
            .iter()
            .filter(|o| !o.verified)
            .filter_map(|o| o.correction_text())
            .map(str::to_string)
            .collect();

        let overall_verification = verified_claims == total_claims
            && confidence > self.aggregation.threshold_for(category);

        AggregateReport {
            overall_verification,
            confidence,
            verified_claims,
            total_claims,
            sources,
            corrections,
            reliability: self.reliability.classify(confidence),
        }
    }
}
