//! Weather claim verification

use crate::checks::{format_amount, CheckKind, CheckSet, GATEWAY_UNAVAILABLE};
use crate::VerifierConfig;
use fieldcheck_domain::traits::Verifier;
use fieldcheck_domain::{Claim, DomainCategory, RecordLookup, VerificationOutcome, WeatherRecord};
use fieldcheck_extractor::quantity::{quantities_of, Dimension};
use tracing::debug;

const RAIN_KEYWORDS: [&str; 6] = ["rain", "precipitation", "shower", "drizzle", "downpour", "monsoon"];

/// Verifies temperature, humidity and rain assertions against current weather
///
/// Tolerances are absolute: relative tolerance is meaningless near 0°C.
#[derive(Debug, Clone, Default)]
pub struct WeatherVerifier {
    config: VerifierConfig,
}

impl WeatherVerifier {
    /// Create a new weather verifier
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    fn check_temperature(&self, claim: &Claim, weather: &WeatherRecord, checks: &mut CheckSet) {
        for quantity in quantities_of(claim.text(), Dimension::Temperature) {
            if (quantity.value - weather.temperature_c).abs() < self.config.temperature_tolerance_c {
                checks.pass(CheckKind::Temperature, self.config.match_confidence);
            } else {
                checks.fail(
                    CheckKind::Temperature,
                    self.config.mismatch_confidence,
                    format!(
                        "The current temperature is {}°C.",
                        format_amount(weather.temperature_c)
                    ),
                );
            }
        }
    }

    fn check_humidity(&self, claim: &Claim, weather: &WeatherRecord, checks: &mut CheckSet) {
        if !claim.mentions_any(&["humidity"]) {
            return;
        }
        for quantity in quantities_of(claim.text(), Dimension::Ratio) {
            if (quantity.value - weather.humidity_pct).abs() < self.config.humidity_tolerance_pct {
                checks.pass(CheckKind::Humidity, self.config.match_confidence);
            } else {
                checks.fail(
                    CheckKind::Humidity,
                    self.config.mismatch_confidence,
                    format!(
                        "The current relative humidity is {}%.",
                        format_amount(weather.humidity_pct)
                    ),
                );
            }
        }
    }
}

impl Verifier for WeatherVerifier {
    fn category(&self) -> DomainCategory {
        DomainCategory::Weather
    }

    fn verify(&self, claim: &Claim, record: &RecordLookup) -> VerificationOutcome {
        let weather = match record {
            RecordLookup::NotFound { subject } => {
                return VerificationOutcome::unavailable(format!(
                    "No reliable current weather data is available for {}.",
                    subject
                ));
            }
            RecordLookup::Failed { .. } => {
                return VerificationOutcome::unavailable(GATEWAY_UNAVAILABLE);
            }
            _ => match record.weather() {
                Some(weather) => weather,
                None => return VerificationOutcome::neutral(self.config.neutral_confidence),
            },
        };

        let mut checks = CheckSet::new();
        self.check_temperature(claim, weather, &mut checks);
        self.check_humidity(claim, weather, &mut checks);

        // Rain has no ground truth to compare against
        if checks.is_empty() && claim.mentions_any(&RAIN_KEYWORDS) {
            checks.pass(CheckKind::Rain, self.config.rain_confidence);
        }

        debug!(
            "Weather claim {}: {:?}",
            claim.position(),
            checks.results().iter().map(|r| (r.kind, r.passed)).collect::<Vec<_>>()
        );

        checks.into_outcome(self.config.neutral_confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_domain::DomainRecord;

    fn current(temperature_c: f64, humidity_pct: f64) -> RecordLookup {
        RecordLookup::Found(DomainRecord::Weather(WeatherRecord {
            temperature_c,
            humidity_pct,
            observed_at: 1_718_000_000,
        }))
    }

    fn verify(text: &str, record: &RecordLookup) -> VerificationOutcome {
        WeatherVerifier::default().verify(&Claim::new(text, 0), record)
    }

    #[test]
    fn test_temperature_within_five_degrees() {
        let outcome = verify("It is around 32°C in Pune today", &current(30.0, 60.0));
        assert!(outcome.verified);
        assert_eq!(outcome.confidence, 0.9);
        assert!(verify("It is around 25.5°C in Pune today", &current(30.0, 60.0)).verified);
    }

    #[test]
    fn test_temperature_exactly_five_apart_fails() {
        let outcome = verify("It is around 35°C in Pune today", &current(30.0, 60.0));
        assert!(!outcome.verified);
        assert!(outcome.correction.unwrap().contains("30°C"));
    }

    #[test]
    fn test_negative_temperatures_use_absolute_tolerance() {
        assert!(verify("Night temperature drops to -2°C in Leh", &current(1.0, 40.0)).verified);
        assert!(!verify("Night temperature drops to -5°C in Leh", &current(1.0, 40.0)).verified);
    }

    #[test]
    fn test_humidity_needs_keyword() {
        assert!(verify("Relative humidity is about 70%", &current(30.0, 60.0)).verified);

        let outcome = verify("Relative humidity is about 90%", &current(30.0, 60.0));
        assert!(!outcome.verified);
        assert!(outcome.correction.unwrap().contains("60%"));

        // A percentage without the word humidity is not a humidity claim
        let outcome = verify("There is a 90% chance of clouds", &current(30.0, 60.0));
        assert!(outcome.verified);
        assert_eq!(outcome.confidence, 0.6);
    }

    #[test]
    fn test_humidity_exactly_fifteen_points_apart_fails() {
        let outcome = verify("Relative humidity is about 75%", &current(30.0, 60.0));
        assert!(!outcome.verified);
        assert!(outcome.correction.unwrap().contains("60%"));

        assert!(verify("Relative humidity is about 74%", &current(30.0, 60.0)).verified);
    }

    #[test]
    fn test_rain_mention_has_fixed_confidence() {
        let outcome = verify("Light rain is expected this evening", &current(30.0, 60.0));
        assert!(outcome.verified);
        assert_eq!(outcome.confidence, 0.7);
    }

    #[test]
    fn test_numeric_check_takes_precedence_over_rain() {
        let outcome = verify("Expect rain with temperatures near 29°C", &current(30.0, 60.0));
        assert!(outcome.verified);
        assert_eq!(outcome.confidence, 0.9);
    }

    #[test]
    fn test_missing_weather_short_circuits() {
        let record = RecordLookup::NotFound { subject: "Nashik, Maharashtra".to_string() };
        let outcome = verify("Light rain is expected this evening", &record);
        assert!(!outcome.verified);
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome.correction.unwrap().contains("Nashik, Maharashtra"));
    }
}
