//! Verifier error types

use fieldcheck_domain::DomainCategory;
use thiserror::Error;

/// Errors that can occur while configuring verifiers
///
/// Verification itself never fails; these only surface at setup time.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No verifier registered for a category
    #[error("No verifier registered for category '{0}'")]
    NotRegistered(DomainCategory),
}
