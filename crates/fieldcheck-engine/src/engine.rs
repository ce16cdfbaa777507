//! Verification engine
//!
//! Orchestrates extraction, per-claim record lookups, verification,
//! aggregation and correction synthesis for one response at a time.

use crate::aggregator::ConfidenceAggregator;
use crate::sources::SourceRegistry;
use crate::{EngineConfig, EngineError};
use fieldcheck_domain::traits::{RecordGateway, Verifier};
use fieldcheck_domain::{
    AggregateReport, Claim, DomainCategory, DomainRecord, RecordLookup, VerificationContext,
    VerificationOutcome,
};
use fieldcheck_extractor::ClaimExtractor;
use fieldcheck_synthesizer::Synthesizer;
use fieldcheck_verifier::VerifierRegistry;
use futures::future::join_all;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Correction for claims of a category nothing is registered to verify
const NO_VERIFIER: &str = "No verification rules are available for this topic, so this information could not be verified.";

/// What the record lookup for a claim came back with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    /// A record was found
    Found,
    /// No record matched
    NotFound,
    /// The gateway failed or timed out
    Failed,
    /// No lookup was needed
    NotApplicable,
}

impl LookupStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Found => "found",
            LookupStatus::NotFound => "not_found",
            LookupStatus::Failed => "failed",
            LookupStatus::NotApplicable => "not_applicable",
        }
    }
}

impl From<&RecordLookup> for LookupStatus {
    fn from(lookup: &RecordLookup) -> Self {
        match lookup {
            RecordLookup::Found(_) => LookupStatus::Found,
            RecordLookup::NotFound { .. } => LookupStatus::NotFound,
            RecordLookup::Failed { .. } => LookupStatus::Failed,
            RecordLookup::NotApplicable => LookupStatus::NotApplicable,
        }
    }
}

/// Verdict on one claim, for display alongside the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimVerdict {
    /// Ordinal position of the claim in the response
    pub position: usize,
    /// Claim text
    pub claim: String,
    /// Outcome of the record lookup
    pub lookup: LookupStatus,
    /// Verifier outcome
    #[serde(flatten)]
    pub outcome: VerificationOutcome,
}

/// Aggregate report plus the per-claim verdicts it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedReport {
    /// Response verdict
    pub report: AggregateReport,
    /// One verdict per claim, in response order
    pub claims: Vec<ClaimVerdict>,
}

/// Response text with corrections appended, and the report behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedResponse {
    /// Original text, followed by corrections when there are any
    pub text: String,
    /// Response verdict
    pub report: AggregateReport,
}

/// Claim verification engine over a record gateway
///
/// The engine holds no per-call state, so one instance can serve many
/// concurrent calls through `&self`.
pub struct VerificationEngine<G: RecordGateway> {
    gateway: G,
    extractor: ClaimExtractor,
    verifiers: VerifierRegistry,
    aggregator: ConfidenceAggregator,
    sources: SourceRegistry,
    synthesizer: Synthesizer,
    lookup_timeout: Option<Duration>,
}

impl<G: RecordGateway> VerificationEngine<G> {
    /// Create an engine from a validated configuration
    pub fn new(gateway: G, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::from_validated(gateway, config))
    }

    /// Create an engine with the default configuration
    pub fn with_defaults(gateway: G) -> Self {
        Self::from_validated(gateway, EngineConfig::default())
    }

    fn from_validated(gateway: G, config: EngineConfig) -> Self {
        info!(
            "Verification engine ready (lookup timeout: {})",
            config
                .lookup_timeout_ms
                .map(|ms| format!("{} ms", ms))
                .unwrap_or_else(|| "none".to_string())
        );

        Self {
            gateway,
            verifiers: VerifierRegistry::with_defaults(&config.verifier),
            sources: SourceRegistry::from_config(&config.sources),
            extractor: ClaimExtractor::new(config.extractor),
            aggregator: ConfidenceAggregator::new(config.aggregation, config.reliability),
            synthesizer: Synthesizer::new(config.correction_delimiter),
            lookup_timeout: config.lookup_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Replace the verifier for the verifier's category
    pub fn with_verifier(mut self, verifier: Box<dyn Verifier>) -> Self {
        self.verifiers.register(verifier);
        self
    }

    /// Replace every verifier
    pub fn with_registry(mut self, verifiers: VerifierRegistry) -> Self {
        self.verifiers = verifiers;
        self
    }

    /// The record gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The source table
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Verify a response and return its aggregate report
    ///
    /// Never fails: missing records, gateway errors and timeouts all become
    /// unverified claims with explanatory corrections.
    pub async fn verify_response(
        &self,
        response: &str,
        category: DomainCategory,
        context: &VerificationContext,
    ) -> AggregateReport {
        self.verify_detailed(response, category, context).await.report
    }

    /// Verify a response and keep the per-claim verdicts
    pub async fn verify_detailed(
        &self,
        response: &str,
        category: DomainCategory,
        context: &VerificationContext,
    ) -> DetailedReport {
        let claims = self.extractor.extract(response);
        debug!("Extracted {} claim(s) for category '{}'", claims.len(), category);

        if claims.is_empty() {
            return DetailedReport {
                report: AggregateReport::empty(),
                claims: Vec::new(),
            };
        }

        // Claims are independent, so their lookups run concurrently
        let lookups = join_all(claims.iter().map(|_| self.lookup(category, context))).await;

        let verifier = match self.verifiers.require(category) {
            Ok(verifier) => Some(verifier),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        let verdicts: Vec<ClaimVerdict> = claims
            .iter()
            .zip(lookups.iter())
            .map(|(claim, lookup)| ClaimVerdict {
                position: claim.position(),
                claim: claim.text().to_string(),
                lookup: LookupStatus::from(lookup),
                outcome: Self::judge(verifier, claim, lookup),
            })
            .collect();

        let outcomes: Vec<VerificationOutcome> =
            verdicts.iter().map(|v| v.outcome.clone()).collect();
        let report =
            self.aggregator
                .aggregate(category, &outcomes, self.sources.sources_for(category));

        info!(
            "Verified {}/{} claim(s), confidence {:.2} ({})",
            report.verified_claims, report.total_claims, report.confidence, report.reliability
        );

        DetailedReport {
            report,
            claims: verdicts,
        }
    }

    /// Verify a response and append its corrections to it
    pub async fn corrected_response(
        &self,
        response: &str,
        category: DomainCategory,
        context: &VerificationContext,
    ) -> CorrectedResponse {
        let report = self.verify_response(response, category, context).await;
        CorrectedResponse {
            text: self.add_corrections(response, &report),
            report,
        }
    }

    /// Append a report's corrections to a response
    pub fn add_corrections(&self, response: &str, report: &AggregateReport) -> String {
        self.synthesizer.apply(response, report)
    }

    fn judge(verifier: Option<&dyn Verifier>, claim: &Claim, lookup: &RecordLookup) -> VerificationOutcome {
        match verifier {
            Some(verifier) => verifier.verify(claim, lookup),
            None => VerificationOutcome::unavailable(NO_VERIFIER),
        }
    }

    /// Fetch the record a claim of this category needs
    async fn lookup(&self, category: DomainCategory, context: &VerificationContext) -> RecordLookup {
        match category {
            DomainCategory::Crop => {
                let Some(name) = context
                    .crop_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                else {
                    return RecordLookup::NotApplicable;
                };
                let result = self
                    .bounded(self.gateway.lookup_crop_record(name))
                    .await
                    .map(|record| record.map(DomainRecord::Crop));
                resolve(name.to_string(), result)
            }
            DomainCategory::Weather => {
                let Some(location) = context.location.as_ref() else {
                    return RecordLookup::NotApplicable;
                };
                let subject = format!("{}, {}", location.district, location.state);
                let result = self
                    .bounded(
                        self.gateway
                            .lookup_current_weather(&location.state, &location.district),
                    )
                    .await
                    .map(|record| record.map(DomainRecord::Weather));
                resolve(subject, result)
            }
            DomainCategory::Finance | DomainCategory::General => RecordLookup::NotApplicable,
        }
    }

    /// Apply the lookup deadline, if one is configured
    async fn bounded<T, E, F>(&self, lookup: F) -> Result<T, String>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        match self.lookup_timeout {
            Some(limit) => match tokio::time::timeout(limit, lookup).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(format!("lookup timed out after {} ms", limit.as_millis())),
            },
            None => lookup.await.map_err(|e| e.to_string()),
        }
    }
}

fn resolve(subject: String, result: Result<Option<DomainRecord>, String>) -> RecordLookup {
    match result {
        Ok(Some(record)) => RecordLookup::Found(record),
        Ok(None) => {
            debug!("No reference record for '{}'", subject);
            RecordLookup::NotFound { subject }
        }
        Err(reason) => {
            warn!("Record lookup for '{}' failed: {}", subject, reason);
            RecordLookup::Failed { subject, reason }
        }
    }
}

impl<G: RecordGateway> std::fmt::Debug for VerificationEngine<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEngine")
            .field("verifiers", &self.verifiers)
            .field("sources", &self.sources)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish_non_exhaustive()
    }
}
