//! Fieldcheck Domain Layer
//!
//! This crate contains the core value objects and trait interfaces for
//! Fieldcheck, the claim verification engine for agricultural assistant
//! responses. Every other crate in the workspace depends on it.
//!
//! ## Key Concepts
//!
//! - **Claim**: An atomic, independently checkable sentence from a response
//! - **Domain category**: crop, weather, finance or general
//! - **Reference record**: A trusted crop or weather fact fetched from a gateway
//! - **Verification outcome**: Per-claim verdict with confidence and correction
//! - **Aggregate report**: The per-response verdict returned to callers
//! - **Reliability**: Coarse high/medium/low tier of an aggregate confidence
//!
//! ## Architecture
//!
//! - Only `serde` (for the report contract) and `async-trait` (for the
//!   gateway seam) as dependencies
//! - Pure value types and classification logic
//! - Lookups and verification rules live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod claim;
pub mod context;
pub mod outcome;
pub mod record;
pub mod reliability;
pub mod report;
pub mod traits;

// Re-exports for convenience
pub use category::DomainCategory;
pub use claim::Claim;
pub use context::{Location, VerificationContext};
pub use outcome::VerificationOutcome;
pub use record::{CropRecord, DomainRecord, RecordLookup, Season, WeatherRecord, YieldUnit};
pub use reliability::{Reliability, ReliabilityThresholds};
pub use report::AggregateReport;
