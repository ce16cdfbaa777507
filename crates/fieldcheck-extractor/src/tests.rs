//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::quantity::{quantities_of, Dimension};
    use crate::{ClaimExtractor, ExtractorConfig};
    use proptest::prelude::*;

    #[test]
    fn test_rice_response_flow() {
        let extractor = ClaimExtractor::new(ExtractorConfig::default());
        let claims = extractor
            .extract("Rice yields about 4000 kg per hectare. It is grown in the kharif season.");

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].text(), "Rice yields about 4000 kg per hectare");
        assert_eq!(claims[1].text(), "It is grown in the kharif season");

        let mass = quantities_of(claims[0].text(), Dimension::Mass);
        assert_eq!(mass.len(), 1);
        assert_eq!(mass[0].base_value(), 4000.0);
        assert!(quantities_of(claims[1].text(), Dimension::Mass).is_empty());
    }

    #[test]
    fn test_no_terminator_yields_single_claim() {
        let extractor = ClaimExtractor::default();
        let claims = extractor.extract("   Sow mustard after the monsoon withdraws   ");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text(), "Sow mustard after the monsoon withdraws");
    }

    #[test]
    fn test_short_response_yields_no_claims() {
        let extractor = ClaimExtractor::default();
        assert!(extractor.extract("Yes. No! Ok?").is_empty());
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("...!!!???").is_empty());
    }

    #[test]
    fn test_exactly_ten_characters_is_dropped() {
        let extractor = ClaimExtractor::default();
        // "Grow wheat" is 10 characters, "Grow wheats" is 11
        assert!(extractor.extract("Grow wheat.").is_empty());
        assert_eq!(extractor.extract("Grow wheats.").len(), 1);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let extractor = ClaimExtractor::default();
        // Ten characters, more than ten bytes
        assert!(extractor.extract("éééééééééé").is_empty());
        assert_eq!(extractor.extract("ééééééééééé").len(), 1);
    }

    #[test]
    fn test_extraction_is_restartable() {
        let extractor = ClaimExtractor::default();
        let text = "Cotton needs 180 days. Irrigate every 10 days in summer!";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    proptest! {
        /// Property: claims are never empty, always trimmed and longer than the minimum
        #[test]
        fn test_claims_respect_length_floor(text in "[a-zA-Z0-9 .!?,]{0,200}") {
            let extractor = ClaimExtractor::default();
            for claim in extractor.extract(&text) {
                prop_assert!(claim.char_len() > 10);
                prop_assert_eq!(claim.text(), claim.text().trim());
                prop_assert!(!claim.text().contains('!'));
                prop_assert!(!claim.text().contains('?'));
            }
        }
    }
}
