//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use fieldcheck_domain::Reliability;
use fieldcheck_engine::{DetailedReport, SourceEntry};
use fieldcheck_store::{SeedSummary, StoreStats};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verification result, with the corrected text when requested.
    pub fn format_report(&self, detailed: &DetailedReport, corrected: Option<&str>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = serde_json::to_value(detailed)?;
                if let (Some(text), Some(object)) = (corrected, value.as_object_mut()) {
                    object.insert("correctedText".to_string(), serde_json::Value::from(text));
                }
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(self.format_report_table(detailed, corrected)),
            OutputFormat::Quiet => Ok(match corrected {
                Some(text) => text.to_string(),
                None => detailed.report.reliability.to_string(),
            }),
        }
    }

    fn format_report_table(&self, detailed: &DetailedReport, corrected: Option<&str>) -> String {
        let report = &detailed.report;
        if report.total_claims == 0 {
            return self.warning("No verifiable claims found in the response.");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Claim", "Lookup", "Verified", "Confidence", "Correction"]);
        for verdict in &detailed.claims {
            builder.push_record([
                (verdict.position + 1).to_string(),
                truncate(&verdict.claim, 60),
                verdict.lookup.as_str().to_string(),
                if verdict.outcome.verified { "yes" } else { "no" }.to_string(),
                format!("{:.2}", verdict.outcome.confidence),
                verdict.outcome.correction_text().unwrap_or("").to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let verdict = if report.overall_verification {
            self.success("Response verified")
        } else {
            self.error("Response not verified")
        };

        let mut out = format!(
            "{}\n\n{} ({}/{} claims verified, confidence {:.2}, reliability {})",
            table,
            verdict,
            report.verified_claims,
            report.total_claims,
            report.confidence,
            self.reliability(report.reliability)
        );

        if !report.sources.is_empty() {
            let sources: Vec<&str> = report.sources.iter().map(String::as_str).collect();
            out.push('\n');
            out.push_str(&self.info(&format!("Sources: {}", sources.join(", "))));
        }

        if let Some(text) = corrected {
            out.push_str("\n\n");
            out.push_str(text);
        }

        out
    }

    /// Format the source table.
    pub fn format_sources(&self, entries: &[SourceEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => {
                let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
                Ok(names.join("\n"))
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No sources configured.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Category", "Source", "Trust"]);
                for entry in entries {
                    builder.push_record([
                        entry.category.to_string(),
                        entry.name.clone(),
                        entry
                            .trust
                            .map(|t| format!("{:.2}", t))
                            .unwrap_or_else(|| "-".to_string()),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format the result of loading a seed file.
    pub fn seed_result(&self, summary: &SeedSummary, stats: &StoreStats) -> String {
        self.success(&format!(
            "Loaded {} crop(s) and {} weather observation(s); store now holds {} crop(s), {} alias(es), {} observation(s)",
            summary.crops, summary.observations, stats.crops, stats.aliases, stats.observations
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn reliability(&self, reliability: Reliability) -> String {
        let color = match reliability {
            Reliability::High => "green",
            Reliability::Medium => "yellow",
            Reliability::Low => "red",
        };
        self.colorize(reliability.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten text to at most `max` characters, marking the cut with "…".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_domain::{AggregateReport, DomainCategory, VerificationOutcome};
    use fieldcheck_engine::{ClaimVerdict, LookupStatus};

    fn detailed() -> DetailedReport {
        let mut report = AggregateReport::empty();
        report.total_claims = 2;
        report.verified_claims = 1;
        report.confidence = 0.6;
        report.sources.insert("ICAR Database".to_string());
        report.corrections.push("Rice is grown in the kharif season.".to_string());

        DetailedReport {
            report,
            claims: vec![
                ClaimVerdict {
                    position: 0,
                    claim: "Rice yields about 4000 kg per hectare".to_string(),
                    lookup: LookupStatus::Found,
                    outcome: VerificationOutcome::verified(0.9),
                },
                ClaimVerdict {
                    position: 1,
                    claim: "It is grown in the rabi season".to_string(),
                    lookup: LookupStatus::Found,
                    outcome: VerificationOutcome::refuted(0.3, "Rice is grown in the kharif season."),
                },
            ],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&detailed(), Some("corrected")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["report"]["totalClaims"], 2);
        assert_eq!(value["claims"][1]["verified"], false);
        assert_eq!(value["claims"][1]["lookup"], "found");
        assert_eq!(value["correctedText"], "corrected");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_report(&detailed(), None).unwrap(), "low");
        assert_eq!(formatter.format_report(&detailed(), Some("fixed")).unwrap(), "fixed");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&detailed(), None).unwrap();
        assert!(output.contains("Claim"));
        assert!(output.contains("Rice is grown in the kharif season."));
        assert!(output.contains("1/2 claims verified"));
        assert!(output.contains("Sources: ICAR Database"));
    }

    #[test]
    fn test_empty_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let empty = DetailedReport {
            report: AggregateReport::empty(),
            claims: Vec::new(),
        };
        let output = formatter.format_report(&empty, None).unwrap();
        assert!(output.contains("No verifiable claims"));
    }

    #[test]
    fn test_sources_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let entries = vec![SourceEntry {
            category: DomainCategory::Crop,
            name: "ICAR Database".to_string(),
            trust: Some(0.95),
        }];
        let output = formatter.format_sources(&entries).unwrap();
        assert!(output.contains("ICAR Database"));
        assert!(output.contains("0.95"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd…");
    }
}
