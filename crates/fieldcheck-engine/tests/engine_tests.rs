//! Integration tests for the verification engine

use async_trait::async_trait;
use fieldcheck_domain::traits::RecordGateway;
use fieldcheck_domain::{
    CropRecord, DomainCategory, Reliability, Season, VerificationContext, WeatherRecord, YieldUnit,
};
use fieldcheck_engine::{EngineConfig, LookupStatus, VerificationEngine};
use fieldcheck_verifier::{VerifierRegistry, GATEWAY_UNAVAILABLE};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const RICE_RESPONSE: &str =
    "Rice yields about 4000 kg per hectare. It is grown in the kharif season.";

/// In-test gateway with a call counter and optional failure modes
#[derive(Default)]
struct FakeGateway {
    crops: HashMap<String, CropRecord>,
    weather: HashMap<(String, String), WeatherRecord>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeGateway {
    fn with_crop(mut self, record: CropRecord) -> Self {
        self.crops.insert(record.name.to_lowercase(), record);
        self
    }

    fn with_weather(mut self, state: &str, district: &str, record: WeatherRecord) -> Self {
        self.weather
            .insert((state.to_lowercase(), district.to_lowercase()), record);
        self
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err("connection refused".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl RecordGateway for FakeGateway {
    type Error = String;

    async fn lookup_crop_record(&self, name_or_alias: &str) -> Result<Option<CropRecord>, String> {
        self.enter().await?;
        let key = name_or_alias.to_lowercase();
        Ok(self
            .crops
            .values()
            .find(|c| c.name.to_lowercase() == key || c.aliases.iter().any(|a| a.to_lowercase() == key))
            .cloned())
    }

    async fn lookup_current_weather(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Option<WeatherRecord>, String> {
        self.enter().await?;
        Ok(self
            .weather
            .get(&(state.to_lowercase(), district.to_lowercase()))
            .cloned())
    }
}

fn rice(season: Season) -> CropRecord {
    CropRecord {
        name: "Rice".to_string(),
        aliases: vec!["paddy".to_string()],
        season,
        average_yield: 4000.0,
        yield_unit: YieldUnit::KgPerHectare,
        duration_max_days: 150,
    }
}

fn pune(temperature_c: f64) -> WeatherRecord {
    WeatherRecord {
        temperature_c,
        humidity_pct: 60.0,
        observed_at: 1_718_000_000,
    }
}

fn crop_context(name: &str) -> VerificationContext {
    VerificationContext::new().with_crop(name)
}

fn weather_context() -> VerificationContext {
    VerificationContext::new().with_location("Maharashtra", "Pune")
}

#[tokio::test]
async fn test_zero_claims() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default());
    let report = engine
        .verify_response("Yes. Sure!", DomainCategory::Crop, &crop_context("Rice"))
        .await;

    assert_eq!(report.total_claims, 0);
    assert_eq!(report.verified_claims, 0);
    assert_eq!(report.confidence, 0.0);
    assert!(!report.overall_verification);
    assert!(report.sources.is_empty());
    assert_eq!(engine.gateway().calls(), 0);
}

#[tokio::test]
async fn test_rice_kharif_scenario() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let report = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;

    assert_eq!(report.total_claims, 2);
    assert_eq!(report.verified_claims, 2);
    assert!(report.confidence >= 0.9);
    assert!(report.overall_verification);
    assert_eq!(report.reliability, Reliability::High);
    assert!(report.corrections.is_empty());
    assert!(report.sources.contains("ICAR Database"));
}

#[tokio::test]
async fn test_rice_rabi_scenario() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Rabi)));
    let report = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;

    assert!(!report.overall_verification);
    assert_eq!(report.verified_claims, 1);
    assert_eq!(report.corrections.len(), 1);
    assert!(report.corrections[0].contains("rabi"));
}

#[tokio::test]
async fn test_alias_lookup() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let report = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Paddy"))
        .await;
    assert!(report.overall_verification);
}

#[tokio::test]
async fn test_identical_inputs_give_identical_json() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Rabi)));
    let context = crop_context("Rice");

    let first = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &context)
        .await;
    let second = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &context)
        .await;

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn test_report_json_shape() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let report = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["overallVerification"], true);
    assert_eq!(json["verifiedClaims"], 2);
    assert_eq!(json["totalClaims"], 2);
    assert_eq!(json["sources"], serde_json::json!(["ICAR Database"]));
    assert_eq!(json["reliability"], "high");
}

#[tokio::test]
async fn test_one_lookup_per_claim() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;
    assert_eq!(engine.gateway().calls(), 2);
}

#[tokio::test]
async fn test_failing_gateway_degrades_to_low() {
    let engine = VerificationEngine::with_defaults(FakeGateway::failing());
    let report = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;

    assert!(!report.overall_verification);
    assert_eq!(report.verified_claims, 0);
    assert_eq!(report.confidence, 0.0);
    assert_eq!(report.reliability, Reliability::Low);
    assert_eq!(report.corrections, vec![GATEWAY_UNAVAILABLE, GATEWAY_UNAVAILABLE]);
}

#[tokio::test]
async fn test_unknown_crop() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let detailed = engine
        .verify_detailed(
            "Quinoa grows well in the rabi season.",
            DomainCategory::Crop,
            &crop_context("Quinoa"),
        )
        .await;

    assert_eq!(detailed.claims.len(), 1);
    assert_eq!(detailed.claims[0].lookup, LookupStatus::NotFound);
    assert!(!detailed.report.overall_verification);
    assert!(detailed.report.corrections[0].contains("Quinoa"));
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let gateway = FakeGateway {
        delay: Some(Duration::from_millis(500)),
        ..FakeGateway::default().with_crop(rice(Season::Kharif))
    };
    let config = EngineConfig {
        lookup_timeout_ms: Some(20),
        ..EngineConfig::default()
    };
    let engine = VerificationEngine::new(gateway, config).unwrap();

    let detailed = engine
        .verify_detailed(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;

    assert!(detailed.claims.iter().all(|c| c.lookup == LookupStatus::Failed));
    assert_eq!(detailed.report.reliability, Reliability::Low);
}

#[tokio::test]
async fn test_crop_without_context_is_neutral() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default());
    let report = engine
        .verify_response(RICE_RESPONSE, DomainCategory::Crop, &VerificationContext::new())
        .await;

    assert_eq!(report.verified_claims, 2);
    assert!((report.confidence - 0.6).abs() < 1e-9);
    assert!(!report.overall_verification);
    assert_eq!(report.reliability, Reliability::Low);
    assert_eq!(engine.gateway().calls(), 0);
}

#[tokio::test]
async fn test_yield_fifty_percent_above() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let report = engine
        .verify_response(
            "Rice yields about 6000 kg per hectare.",
            DomainCategory::Crop,
            &crop_context("Rice"),
        )
        .await;

    assert!(!report.overall_verification);
    assert!(report.corrections[0].contains("4000"));
}

#[tokio::test]
async fn test_weather_temperature_bound() {
    let gateway = FakeGateway::default().with_weather("Maharashtra", "Pune", pune(30.0));
    let engine = VerificationEngine::with_defaults(gateway);

    let close = engine
        .verify_response("It is around 33°C in Pune right now.", DomainCategory::Weather, &weather_context())
        .await;
    assert!(close.overall_verification);
    assert!(close.sources.contains("India Meteorological Department"));

    let edge = engine
        .verify_response("It is around 35°C in Pune right now.", DomainCategory::Weather, &weather_context())
        .await;
    assert!(!edge.overall_verification);
    assert!(edge.corrections[0].contains("30°C"));
}

#[tokio::test]
async fn test_weather_missing_district() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default());
    let report = engine
        .verify_response(
            "Heavy rain is expected in Nashik tonight.",
            DomainCategory::Weather,
            &VerificationContext::new().with_location("Maharashtra", "Nashik"),
        )
        .await;

    assert_eq!(report.verified_claims, 0);
    assert!(report.corrections[0].contains("Nashik, Maharashtra"));
}

#[tokio::test]
async fn test_finance_threshold() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default());

    // Two exact facts pass comfortably
    let report = engine
        .verify_response(
            "PM-KISAN gives Rs. 6000 per year to farmers. Kisan Credit Card loans charge about 7% interest.",
            DomainCategory::Finance,
            &VerificationContext::new(),
        )
        .await;
    assert_eq!(report.total_claims, 2);
    assert!(report.overall_verification);
    assert!(report.sources.contains("Ministry of Agriculture & Farmers Welfare"));

    // 0.75 clears the crop bar but not the finance bar
    let report = engine
        .verify_response(
            "KCC loans charge around 8% interest. Banks also offer savings accounts to farmers.",
            DomainCategory::Finance,
            &VerificationContext::new(),
        )
        .await;
    assert_eq!(report.verified_claims, 2);
    assert!((report.confidence - 0.75).abs() < 1e-9);
    assert!(!report.overall_verification);
    assert_eq!(report.reliability, Reliability::Medium);
    assert_eq!(engine.gateway().calls(), 0);
}

#[tokio::test]
async fn test_general_category() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default());
    let report = engine
        .verify_response(
            "Mulching keeps soil moisture for longer. Drip irrigation saves water.",
            DomainCategory::General,
            &VerificationContext::new(),
        )
        .await;

    assert_eq!(report.verified_claims, 2);
    assert!((report.confidence - 0.7).abs() < 1e-9);
    assert!(!report.overall_verification);
    assert_eq!(report.reliability, Reliability::Medium);
    assert!(report.sources.contains("Agricultural Knowledge Base"));
}

#[tokio::test]
async fn test_corrected_response_keeps_original_prefix() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Rabi)));
    let corrected = engine
        .corrected_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;

    assert!(corrected.text.starts_with(RICE_RESPONSE));
    assert!(corrected.text.ends_with(&corrected.report.corrections[0]));

    let engine = VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let corrected = engine
        .corrected_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
        .await;
    assert_eq!(corrected.text, RICE_RESPONSE);
}

#[tokio::test]
async fn test_missing_verifier_never_fails() {
    let engine = VerificationEngine::with_defaults(FakeGateway::default()).with_registry(VerifierRegistry::new());
    let report = engine
        .verify_response(
            "Mulching keeps soil moisture for longer.",
            DomainCategory::General,
            &VerificationContext::new(),
        )
        .await;

    assert_eq!(report.total_claims, 1);
    assert_eq!(report.verified_claims, 0);
    assert_eq!(report.reliability, Reliability::Low);
    assert_eq!(report.corrections.len(), 1);
    assert!(report.corrections[0].contains("could not be verified"));
}

#[tokio::test]
async fn test_default_engine_matches_default_config() {
    let context = VerificationContext::new().with_crop("Rice");
    let response = "Rice yields about 4000 kg per hectare. It is grown in the rabi season.";

    let defaults =
        VerificationEngine::with_defaults(FakeGateway::default().with_crop(rice(Season::Kharif)));
    let configured = VerificationEngine::new(
        FakeGateway::default().with_crop(rice(Season::Kharif)),
        EngineConfig::default(),
    )
    .unwrap();

    let a = defaults.verify_response(response, DomainCategory::Crop, &context).await;
    let b = configured.verify_response(response, DomainCategory::Crop, &context).await;
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let mut config = EngineConfig::default();
    config.aggregation.finance_threshold = 2.0;
    assert!(VerificationEngine::new(FakeGateway::default(), config).is_err());
}

#[tokio::test]
async fn test_concurrent_calls_share_one_engine() {
    let engine = std::sync::Arc::new(VerificationEngine::with_defaults(
        FakeGateway::default().with_crop(rice(Season::Kharif)),
    ));

    let runs = (0..8).map(|_| {
        let engine = engine.clone();
        async move {
            engine
                .verify_response(RICE_RESPONSE, DomainCategory::Crop, &crop_context("Rice"))
                .await
        }
    });
    let reports = futures::future::join_all(runs).await;

    assert!(reports.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(engine.gateway().calls(), 16);
}
