//! Fieldcheck Extractor
//!
//! Splits assistant responses into atomic claims and pulls number + unit
//! quantities out of claim text.
//!
//! # Overview
//!
//! Extraction is the first step of every verification call:
//!
//! ```text
//! Response → ClaimExtractor → Claims → Verifier (uses quantity::*) → Outcomes
//! ```
//!
//! # Key Features
//!
//! - **Sentence segmentation**: Split on runs of `.`, `!` and `?`, dropping
//!   fragments of 10 characters or fewer
//! - **Decimal and abbreviation guards**: `4.5 tonnes` and `Rs. 6000` stay in
//!   one claim
//! - **Shared quantity parsing**: One place that recognizes masses, durations,
//!   temperatures, percentages and rupee amounts, so every verifier parses
//!   numbers the same way
//!
//! # Example Usage
//!
//! ```
//! use fieldcheck_extractor::{ClaimExtractor, ExtractorConfig};
//! use fieldcheck_extractor::quantity::{extract_quantities, Unit};
//!
//! let extractor = ClaimExtractor::new(ExtractorConfig::default());
//! let claims = extractor.extract("Rice yields about 4000 kg per hectare. Ok!");
//! assert_eq!(claims.len(), 1);
//!
//! let quantities = extract_quantities(claims[0].text());
//! assert_eq!(quantities[0].unit, Unit::Kilogram);
//! assert_eq!(quantities[0].value, 4000.0);
//! ```

#![warn(missing_docs)]

mod config;
mod extractor;
pub mod quantity;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use extractor::ClaimExtractor;
