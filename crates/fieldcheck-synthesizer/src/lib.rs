//! Fieldcheck Correction Synthesizer
//!
//! Appends corrections from an aggregate report to the response they were
//! derived from. The response text is only ever appended to, never rewritten,
//! so it remains an exact prefix of the synthesized text.
//!
//! # Examples
//!
//! ```
//! use fieldcheck_synthesizer::add_corrections;
//!
//! let text = "Rice is grown in the rabi season.";
//! assert_eq!(add_corrections(text, &[]), text);
//!
//! let corrected = add_corrections(text, &["Rice is grown in the kharif season.".to_string()]);
//! assert!(corrected.starts_with(text));
//! assert!(corrected.ends_with("Rice is grown in the kharif season."));
//! ```

#![warn(missing_docs)]

use fieldcheck_domain::AggregateReport;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Line separating the response from its corrections
pub const DEFAULT_DELIMITER: &str = "Corrections from verified reference data:";

/// Appends corrections under a delimiter line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesizer {
    delimiter: String,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Synthesizer {
    /// Create a synthesizer with a custom delimiter line
    ///
    /// Line breaks in the delimiter are replaced by spaces so that it stays
    /// a single line.
    pub fn new(delimiter: impl Into<String>) -> Self {
        let delimiter: String = delimiter.into();
        let delimiter = delimiter
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { delimiter }
    }

    /// The delimiter line
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Append corrections to `text`
    ///
    /// With no corrections the text is returned unchanged. Otherwise the
    /// result is the text, a blank line, the delimiter line and the
    /// space-joined corrections.
    pub fn add_corrections(&self, text: &str, corrections: &[String]) -> String {
        if corrections.is_empty() {
            return text.to_string();
        }

        debug!("Appending {} correction(s)", corrections.len());

        let joined = corrections.join(" ");
        let mut out = String::with_capacity(text.len() + self.delimiter.len() + joined.len() + 3);
        out.push_str(text);
        out.push_str("\n\n");
        out.push_str(&self.delimiter);
        out.push('\n');
        out.push_str(&joined);
        out
    }

    /// Append the corrections of a report to `text`
    pub fn apply(&self, text: &str, report: &AggregateReport) -> String {
        self.add_corrections(text, &report.corrections)
    }
}

/// Append corrections with the default delimiter
pub fn add_corrections(text: &str, corrections: &[String]) -> String {
    Synthesizer::default().add_corrections(text, corrections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_corrections_returns_text() {
        let text = "  Wheat is a rabi crop.  ";
        assert_eq!(add_corrections(text, &[]), text);
    }

    #[test]
    fn test_layout() {
        let corrections = vec![
            "Rice is grown in the kharif season.".to_string(),
            "Rice takes up to 150 days from sowing to harvest.".to_string(),
        ];
        let out = add_corrections("Rice is a rabi crop.", &corrections);
        assert_eq!(
            out,
            format!(
                "Rice is a rabi crop.\n\n{}\nRice is grown in the kharif season. Rice takes up to 150 days from sowing to harvest.",
                DEFAULT_DELIMITER
            )
        );
    }

    #[test]
    fn test_custom_delimiter_is_one_line() {
        let synthesizer = Synthesizer::new("Please note\nthe following:");
        assert_eq!(synthesizer.delimiter(), "Please note the following:");

        let out = synthesizer.add_corrections("Text.", &["Fix.".to_string()]);
        assert_eq!(out, "Text.\n\nPlease note the following:\nFix.");
    }

    #[test]
    fn test_apply_report() {
        let mut report = AggregateReport::empty();
        report.corrections.push("Current temperature is 30°C.".to_string());
        let out = Synthesizer::default().apply("It is 40°C in Pune.", &report);
        assert!(out.ends_with("Current temperature is 30°C."));
    }

    proptest! {
        #[test]
        fn prop_text_is_prefix_and_corrections_follow(
            text in ".{0,80}",
            corrections in prop::collection::vec("[a-zA-Z0-9 ]{1,30}", 0..4),
        ) {
            let out = add_corrections(&text, &corrections);
            prop_assert!(out.starts_with(&text));
            let tail = &out[text.len()..];
            for correction in &corrections {
                prop_assert!(tail.contains(correction.as_str()));
            }
            if corrections.is_empty() {
                prop_assert_eq!(out, text);
            }
        }
    }
}
