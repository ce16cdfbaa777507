//! Fieldcheck Engine
//!
//! Verifies assistant responses about crops, weather and farm finance
//! against trusted reference data and scores how reliable they are.
//!
//! # Pipeline
//!
//! ```text
//! response ─► ClaimExtractor ─► claims ─► (record lookup per claim, concurrent)
//!                                           │
//!                                           ▼
//!                      Verifier for the category ─► outcomes
//!                                                      │
//!                                                      ▼
//!             ConfidenceAggregator ─► AggregateReport ─► Synthesizer (optional)
//! ```
//!
//! The engine never fails a verification call. A missing record or a failed
//! gateway lowers the confidence of the affected claims and adds an
//! explanatory correction instead.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use fieldcheck_domain::traits::RecordGateway;
//! use fieldcheck_domain::{CropRecord, DomainCategory, Reliability, Season, VerificationContext, WeatherRecord, YieldUnit};
//! use fieldcheck_engine::VerificationEngine;
//!
//! struct OneCrop(CropRecord);
//!
//! #[async_trait]
//! impl RecordGateway for OneCrop {
//!     type Error = std::convert::Infallible;
//!
//!     async fn lookup_crop_record(&self, name: &str) -> Result<Option<CropRecord>, Self::Error> {
//!         Ok(self.0.name.eq_ignore_ascii_case(name).then(|| self.0.clone()))
//!     }
//!
//!     async fn lookup_current_weather(&self, _: &str, _: &str) -> Result<Option<WeatherRecord>, Self::Error> {
//!         Ok(None)
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let engine = VerificationEngine::with_defaults(OneCrop(CropRecord {
//!     name: "Rice".to_string(),
//!     aliases: vec![],
//!     season: Season::Kharif,
//!     average_yield: 4000.0,
//!     yield_unit: YieldUnit::KgPerHectare,
//!     duration_max_days: 150,
//! }));
//!
//! let report = engine
//!     .verify_response(
//!         "Rice yields about 4000 kg per hectare. It is grown in the kharif season.",
//!         DomainCategory::Crop,
//!         &VerificationContext::new().with_crop("Rice"),
//!     )
//!     .await;
//!
//! assert!(report.overall_verification);
//! assert_eq!(report.reliability, Reliability::High);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod aggregator;
pub mod config;
mod engine;
mod error;
pub mod sources;

pub use aggregator::ConfidenceAggregator;
pub use config::{AggregationConfig, EngineConfig, SourcesConfig};
pub use engine::{ClaimVerdict, CorrectedResponse, DetailedReport, LookupStatus, VerificationEngine};
pub use error::EngineError;
pub use sources::{SourceEntry, SourceRegistry};
