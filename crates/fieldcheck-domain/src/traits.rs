//! Trait definitions for external interactions
//!
//! These traits define the boundaries between verification logic and the
//! surrounding system. Implementations live in other crates.

use crate::{Claim, CropRecord, DomainCategory, RecordLookup, VerificationOutcome, WeatherRecord};
use async_trait::async_trait;

/// Read-only access to crop and weather reference data
///
/// Implemented by the infrastructure layer (fieldcheck-store) or by the host
/// service. `Ok(None)` means no record exists; `Err` means the gateway itself
/// failed. Implementations must be safe to call concurrently.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Error type for gateway operations
    type Error: std::fmt::Display + Send;

    /// Look up a crop by canonical name or alias
    async fn lookup_crop_record(&self, name_or_alias: &str)
        -> Result<Option<CropRecord>, Self::Error>;

    /// Look up the latest weather observation for a district
    async fn lookup_current_weather(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Option<WeatherRecord>, Self::Error>;
}

/// A domain verifier
///
/// Implemented by the application layer (fieldcheck-verifier). Verification is
/// a pure function of the claim and the record lookup, so verifiers can be
/// shared across concurrent calls.
pub trait Verifier: Send + Sync {
    /// Category this verifier handles
    fn category(&self) -> DomainCategory;

    /// Check one claim against the record it needs
    fn verify(&self, claim: &Claim, record: &RecordLookup) -> VerificationOutcome;
}
