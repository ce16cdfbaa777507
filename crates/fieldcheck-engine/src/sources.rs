//! Provenance and trust table
//!
//! Built once from [`SourcesConfig`] when the engine is constructed and
//! never mutated afterwards.

use crate::config::SourcesConfig;
use fieldcheck_domain::DomainCategory;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One row of the source table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceEntry {
    /// Category the source is reported for
    pub category: DomainCategory,
    /// Human-readable source name
    pub name: String,
    /// Trust score, when the table has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<f64>,
}

/// Immutable map from category to provenance strings, plus trust scores
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    provenance: BTreeMap<DomainCategory, BTreeSet<String>>,
    trust: BTreeMap<String, f64>,
}

impl SourceRegistry {
    /// Build the registry from configuration
    pub fn from_config(config: &SourcesConfig) -> Self {
        let provenance = DomainCategory::ALL
            .into_iter()
            .map(|category| {
                let names = config
                    .for_category(category)
                    .iter()
                    .map(|s| s.trim().to_string())
                    .collect();
                (category, names)
            })
            .collect();

        Self {
            provenance,
            trust: config.trust.clone(),
        }
    }

    /// Sources reported for a category
    pub fn sources_for(&self, category: DomainCategory) -> BTreeSet<String> {
        self.provenance.get(&category).cloned().unwrap_or_default()
    }

    /// Trust score of a source
    pub fn trust(&self, name: &str) -> Option<f64> {
        self.trust.get(name).copied()
    }

    /// Every (category, source) pair, in category order
    pub fn entries(&self) -> Vec<SourceEntry> {
        self.provenance
            .iter()
            .flat_map(|(category, names)| {
                names.iter().map(move |name| SourceEntry {
                    category: *category,
                    name: name.clone(),
                    trust: self.trust(name),
                })
            })
            .collect()
    }
}
