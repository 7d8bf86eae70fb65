use once_cell::sync::Lazy;
use regex::Regex;

static TERMINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("static regex"));

/// Split an explanation into claims on runs of sentence-terminal punctuation.
///
/// Pieces are trimmed and empty ones dropped, so blank input yields no claims
/// and text without terminal punctuation yields itself as a single claim.
pub fn segment_claims(text: &str) -> Vec<String> {
    TERMINAL
        .split(text)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whitespace-separated tokens, so "200kg/hectare" and "22-28°C" count once.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
