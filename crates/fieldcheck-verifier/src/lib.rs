//! Fieldcheck Verifiers
//!
//! Rule-based domain verifiers that compare a claim against reference data.
//!
//! The crate provides:
//! - Crop verification (yield, duration, season) against a crop record
//! - Weather verification (temperature, humidity, rain) against a current observation
//! - Finance verification (PM-KISAN, Kisan Credit Card, PMFBY) against compiled facts
//! - A general verifier for responses outside the three domains
//! - A registry selecting one verifier per domain category
//!
//! A claim with nothing checkable in it gets a neutral outcome; it is never
//! counted as a contradiction.
//!
//! # Examples
//!
//! ```
//! use fieldcheck_domain::traits::Verifier;
//! use fieldcheck_domain::{Claim, DomainCategory, RecordLookup};
//! use fieldcheck_verifier::{VerifierConfig, VerifierRegistry};
//!
//! let registry = VerifierRegistry::with_defaults(&VerifierConfig::default());
//! let finance = registry.get(DomainCategory::Finance).unwrap();
//!
//! let claim = Claim::new("PM-KISAN gives farmers Rs. 6000 every year", 0);
//! let outcome = finance.verify(&claim, &RecordLookup::NotApplicable);
//! assert!(outcome.verified);
//! ```

#![warn(missing_docs)]

mod checks;
mod config;
mod crop;
mod error;
mod finance;
mod general;
mod registry;
mod weather;

pub use checks::{CheckKind, CheckResult, GATEWAY_UNAVAILABLE};
pub use config::VerifierConfig;
pub use crop::CropVerifier;
pub use error::VerifierError;
pub use finance::{FinanceFacts, FinanceVerifier, PremiumRate};
pub use general::GeneralVerifier;
pub use registry::VerifierRegistry;
pub use weather::WeatherVerifier;
