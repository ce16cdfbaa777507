//! Claim module - the unit of verification

use std::fmt;

/// A claim extracted from an assistant response
///
/// A claim is a trimmed sentence-like fragment of the original response.
/// Claims are immutable once created and never outlive the verification
/// call that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Claim {
    text: String,
    position: usize,
}

impl Claim {
    /// Create a new claim at the given position in the response
    ///
    /// The text is trimmed on construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldcheck_domain::Claim;
    ///
    /// let claim = Claim::new("  Rice is a kharif crop ", 0);
    /// assert_eq!(claim.text(), "Rice is a kharif crop");
    /// ```
    pub fn new(text: impl AsRef<str>, position: usize) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            position,
        }
    }

    /// The trimmed claim text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Zero-based position of the claim within its response
    pub fn position(&self) -> usize {
        self.position
    }

    /// Lowercased copy of the text, for case-insensitive keyword matching
    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }

    /// Length of the claim in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the claim mentions any of the given keywords (case-insensitive)
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        let lower = self.lowercase();
        keywords.iter().any(|k| lower.contains(k))
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
