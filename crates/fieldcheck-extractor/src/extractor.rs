//! Core claim extractor implementation

use crate::config::ExtractorConfig;
use fieldcheck_domain::Claim;
use tracing::debug;

/// Splits a response into independently checkable claims
///
/// Extraction is deterministic and restartable: calling [`extract`] twice on
/// the same text yields the same claims in the same order.
///
/// [`extract`]: ClaimExtractor::extract
#[derive(Debug, Clone, Default)]
pub struct ClaimExtractor {
    config: ExtractorConfig,
}

impl ClaimExtractor {
    /// Create a new extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract claims from a response
    ///
    /// Splits on runs of `.`, `!` and `?` and keeps the trimmed fragments
    /// longer than `min_claim_chars` characters. A response without any
    /// terminator yields at most one claim.
    pub fn extract(&self, text: &str) -> Vec<Claim> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut claims = Vec::new();
        let mut fragment_start = 0;

        for (i, &(byte_idx, c)) in chars.iter().enumerate() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            if c == '.' && !self.ends_sentence(&chars, i) {
                continue;
            }

            self.push_fragment(&text[fragment_start..byte_idx], &mut claims);
            fragment_start = byte_idx + c.len_utf8();
        }
        self.push_fragment(&text[fragment_start..], &mut claims);

        debug!("Extracted {} claims from {} chars", claims.len(), text.len());
        claims
    }

    fn push_fragment(&self, fragment: &str, claims: &mut Vec<Claim>) {
        let trimmed = fragment.trim();
        if trimmed.chars().count() > self.config.min_claim_chars {
            let position = claims.len();
            claims.push(Claim::new(trimmed, position));
        }
    }

    /// Whether the `.` at `chars[i]` terminates a sentence
    fn ends_sentence(&self, chars: &[(usize, char)], i: usize) -> bool {
        let prev = i.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(i + 1).map(|&(_, c)| c);

        if self.config.keep_decimal_points
            && prev.is_some_and(|c| c.is_ascii_digit())
            && next.is_some_and(|c| c.is_ascii_digit())
        {
            return false;
        }

        if !self.config.abbreviations.is_empty() {
            let word_len = chars[..i]
                .iter()
                .rev()
                .take_while(|&&(_, c)| c.is_alphabetic())
                .count();
            let word: String = chars[i - word_len..i].iter().map(|&(_, c)| c).collect();
            let is_abbreviation = !word.is_empty()
                && self
                    .config
                    .abbreviations
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(&word));
            // "Rs. 6000" and "approx. forty" continue; "govt. Rice" starts a new sentence
            let continues = chars[i + 1..]
                .iter()
                .map(|&(_, c)| c)
                .find(|c| !c.is_whitespace())
                .is_some_and(|c| c.is_ascii_digit() || c.is_lowercase());
            if is_abbreviation && continues {
                return false;
            }
        }

        true
    }
}
