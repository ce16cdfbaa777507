//! One verifier per domain category

use crate::{
    CropVerifier, FinanceVerifier, GeneralVerifier, VerifierConfig, VerifierError, WeatherVerifier,
};
use fieldcheck_domain::traits::Verifier;
use fieldcheck_domain::DomainCategory;
use std::collections::HashMap;
use tracing::debug;

/// Selects the verifier for a category
///
/// Built once and shared read-only; registering a verifier for a category
/// that already has one replaces it.
#[derive(Default)]
pub struct VerifierRegistry {
    verifiers: HashMap<DomainCategory, Box<dyn Verifier>>,
}

impl VerifierRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in verifier for every category
    pub fn with_defaults(config: &VerifierConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CropVerifier::new(config.clone())));
        registry.register(Box::new(WeatherVerifier::new(config.clone())));
        registry.register(Box::new(FinanceVerifier::new(config.clone())));
        registry.register(Box::new(GeneralVerifier::new(config.clone())));
        registry
    }

    /// Register a verifier under its own category
    pub fn register(&mut self, verifier: Box<dyn Verifier>) {
        let category = verifier.category();
        if self.verifiers.insert(category, verifier).is_some() {
            debug!("Replaced verifier for category '{}'", category);
        }
    }

    /// Get the verifier for a category
    pub fn get(&self, category: DomainCategory) -> Option<&dyn Verifier> {
        self.verifiers.get(&category).map(|v| v.as_ref())
    }

    /// Get the verifier for a category, or an error naming the category
    pub fn require(&self, category: DomainCategory) -> Result<&dyn Verifier, VerifierError> {
        self.get(category)
            .ok_or(VerifierError::NotRegistered(category))
    }

    /// Categories with a registered verifier
    pub fn categories(&self) -> Vec<DomainCategory> {
        DomainCategory::ALL
            .into_iter()
            .filter(|c| self.verifiers.contains_key(c))
            .collect()
    }
}

impl std::fmt::Debug for VerifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierRegistry")
            .field("categories", &self.categories())
            .finish()
    }
}
