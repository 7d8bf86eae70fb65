//! Lexical tables driving claim classification.
//!
//! Each table is a named, versioned constant so a domain can ship its own
//! vocabulary without touching the scoring code in `classifier`.

/// Vocabulary for the enhanced scoring policy.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub name: &'static str,
    pub version: u32,
    /// Citation of measurement or analysis.
    pub data_markers: &'static [&'static str],
    /// Epistemic uncertainty.
    pub hedge_markers: &'static [&'static str],
    /// Unsafe, absolute or excessive action.
    pub danger_markers: &'static [&'static str],
    /// Generic advice with no justification.
    pub vagueness_markers: &'static [&'static str],
    /// Measurement unit token (length, mass, area, temperature, concentration, percentage).
    pub unit_pattern: &'static str,
    /// Explicit multipliers such as "5x" or "10 x". A match followed by
    /// another number ("75 x 25 cm") is a dimension and is skipped by the
    /// classifier.
    pub multiplier_pattern: &'static str,
}

pub const AGRICULTURE_V1: Vocabulary = Vocabulary {
    name: "agriculture",
    version: 1,
    data_markers: &[
        "based on",
        "data shows",
        "data show",
        "data indicates",
        "research indicates",
        "research shows",
        "studies show",
        "readings",
        "monitoring",
        "measured",
        "measurements",
        "soil test",
        "lab analysis",
        "analysis",
        "sensor",
        "historical data",
        "historical yield",
        "forecast",
        "trial results",
    ],
    hedge_markers: &[
        "may",
        "might",
        "could",
        "possibly",
        "perhaps",
        "generally",
        "typically",
        "usually",
        "likely",
    ],
    danger_markers: &[
        "maximum concentration",
        "maximum rate",
        "maximum rates",
        "ignore",
        "regardless of",
        "always",
        "never",
        "every day",
        "daily application",
        "double",
        "triple",
        "excessive",
        "without testing",
    ],
    vagueness_markers: &[
        "may help",
        "might help",
        "could help",
        "will improve",
        "is good",
        "needs treatment",
        "should apply",
        "consider",
        "results may vary",
        "generally recommended",
        "general recommendation",
        "standard approach",
    ],
    // one-letter units and "in" must touch the number: "3 in the morning" is not a unit
    unit_pattern: r"(?i)(?:\d\s*(?:%|°\s?[cf]\b|(?:mm|cm|km|inch|inches|ft|foot|feet|mg|kg|lbs?|tons?|ha|acres?|hectares?|ppm|ppb|ml|gal|gallons?)\b)|\d(?:m|g|t|l|c|f|in)\b|\b(?:percent|millimet(?:er|re)s?|centimet(?:er|re)s?|kilograms?|grams?|hectares?|acres?|celsius|fahrenheit|ppm|lit(?:er|re)s?|gallons?)\b)",
    multiplier_pattern: r"(?i)\b\d+(?:\.\d+)?\s?x\b",
};

/// Vocabulary for the legacy decision table.
#[derive(Debug, Clone, Copy)]
pub struct LegacyVocabulary {
    pub name: &'static str,
    pub version: u32,
    pub domain_keywords: &'static [&'static str],
    pub causal_markers: &'static [&'static str],
    pub safety_markers: &'static [&'static str],
    pub vague_terms: &'static [&'static str],
    pub absolute_terms: &'static [&'static str],
}

pub const LEGACY_V0: LegacyVocabulary = LegacyVocabulary {
    name: "agriculture-legacy",
    version: 0,
    domain_keywords: &[
        "water", "irrigation", "fertilizer", "pesticide", "soil", "crop", "plant", "harvest",
        "yield", "banana", "potassium", "spray", "apply", "planting", "growing",
    ],
    causal_markers: &[
        "because", "therefore", "thus", "so", "hence", "due to", "result in", "leads to",
        "causes", "based on",
    ],
    safety_markers: &["spray", "apply", "chemical", "pesticide", "herbicide", "toxin"],
    vague_terms: &["optimal", "best", "ideal", "maximum", "minimum", "good", "better"],
    absolute_terms: &["always", "never", "all", "every", "none", "guaranteed"],
};

/// Case-insensitive term lookup. `haystack` must already be lowercase.
///
/// A hit must sit on word boundaries, so "so" does not fire inside "soil".
pub fn contains_term(haystack: &str, term: &str) -> bool {
    let term = term.to_lowercase();
    let bytes = haystack.as_bytes();
    haystack.match_indices(&term).any(|(start, m)| {
        let end = start + m.len();
        let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        before_ok && after_ok
    })
}

pub fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(haystack, t))
}

pub fn matching<'a>(haystack: &str, terms: &[&'a str]) -> Vec<&'a str> {
    terms.iter().copied().filter(|t| contains_term(haystack, t)).collect()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn terms_respect_word_boundaries() {
        assert!(contains_term("water so roots grow", "so"));
        assert!(!contains_term("check the soil", "so"));
        assert!(contains_term("spray every day regardless of levels", "every day"));
        assert!(!contains_term("everyday tasks", "every day"));
    }

    #[test]
    fn matching_lists_hits_in_table_order() {
        let hits = matching(
            "spray at maximum concentration every day regardless of pest levels",
            AGRICULTURE_V1.danger_markers,
        );
        assert_eq!(hits, vec!["maximum concentration", "regardless of", "every day"]);
    }

    #[test]
    fn patterns_compile_and_match_units() {
        let unit = Regex::new(AGRICULTURE_V1.unit_pattern).unwrap();
        for s in ["50mm", "40%", "28°C", "200 kg", "2.5 lbs/acre", "residual N at 25 ppm"] {
            assert!(unit.is_match(s), "{s}");
        }
        assert!(!unit.is_match("water the plants"));
        assert!(!unit.is_match("stage 4"));
        assert!(!unit.is_match("irrigate zone 3 in the morning"));
        assert!(!unit.is_match("row 2 f"));
        assert!(!unit.is_match("block 7 t"));
        assert!(unit.is_match("3in deep"));

        let mult = Regex::new(AGRICULTURE_V1.multiplier_pattern).unwrap();
        assert!(mult.is_match("apply at 5x recommended"));
        assert!(mult.is_match("10X the dose"));
        assert!(!mult.is_match("box of seeds"));
    }
}
