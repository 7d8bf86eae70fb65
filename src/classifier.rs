//! Per-claim lexical scoring.

use crate::error::VerifyError;
use crate::segments::word_count;
use crate::types::{ClaimVerdict, Severity, Status, StructuralQuality};
use crate::vocab::{self, LegacyVocabulary, Vocabulary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Source of the confidence draw for a verdict band.
///
/// Injected at construction so tests can pin exact values.
pub trait ConfidenceSource: Send + Sync {
    /// Returns a value in `low..=high`.
    fn draw(&self, low: u8, high: u8) -> u8;
}

/// Uniform draw from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl ConfidenceSource for ThreadRandom {
    fn draw(&self, low: u8, high: u8) -> u8 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Reproducible uniform draw from a seeded generator.
pub struct Seeded(Mutex<StdRng>);

impl Seeded {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl ConfidenceSource for Seeded {
    fn draw(&self, low: u8, high: u8) -> u8 {
        let mut rng = self.0.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high)
    }
}

/// Always the midpoint of the band.
#[derive(Debug, Default, Clone, Copy)]
pub struct Midpoint;

impl ConfidenceSource for Midpoint {
    fn draw(&self, low: u8, high: u8) -> u8 {
        ((low as u16 + high as u16) / 2) as u8
    }
}

/// Which decision table a classifier runs. Never both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Enhanced,
    Legacy,
}

impl std::str::FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "enhanced" => Ok(Policy::Enhanced),
            "legacy" => Ok(Policy::Legacy),
            other => Err(format!("unknown policy '{other}' (expected enhanced or legacy)")),
        }
    }
}

/// Lexical signals found in one claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub data_evidence: bool,
    pub numeric: bool,
    pub unit: bool,
    pub hedge: bool,
    pub danger: bool,
    pub vague: bool,
    pub words: usize,
}

impl Signals {
    pub fn specificity(&self) -> u8 {
        let mut score = 0u32;
        if self.numeric { score += 30; }
        if self.unit { score += 25; }
        if self.data_evidence { score += 30; }
        if self.words > 15 { score += 15; }
        score.min(100) as u8
    }
}

struct Lexicon {
    vocab: Vocabulary,
    unit: Regex,
    multiplier: Regex,
}

impl Lexicon {
    fn compile(vocab: Vocabulary) -> Result<Self, VerifyError> {
        Ok(Self {
            unit: Regex::new(vocab.unit_pattern)?,
            multiplier: Regex::new(vocab.multiplier_pattern)?,
            vocab,
        })
    }

    fn detect(&self, claim: &str) -> Signals {
        let lower = claim.to_lowercase();
        Signals {
            data_evidence: vocab::contains_any(&lower, self.vocab.data_markers),
            numeric: claim.chars().any(|c| c.is_ascii_digit()),
            unit: self.unit.is_match(claim),
            hedge: vocab::contains_any(&lower, self.vocab.hedge_markers),
            danger: vocab::contains_any(&lower, self.vocab.danger_markers) || self.has_multiplier(claim),
            vague: vocab::contains_any(&lower, self.vocab.vagueness_markers),
            words: word_count(claim),
        }
    }

    /// "5x the rate" counts; "75 x 25 cm" is a dimension.
    fn has_multiplier(&self, claim: &str) -> bool {
        self.multiplier
            .find_iter(claim)
            .any(|m| !claim[m.end()..].trim_start().starts_with(|c: char| c.is_ascii_digit()))
    }
}

pub struct ClaimClassifier {
    policy: Policy,
    lexicon: Lexicon,
    legacy: LegacyVocabulary,
    confidence: Arc<dyn ConfidenceSource>,
}

impl ClaimClassifier {
    pub fn new(policy: Policy, confidence: Arc<dyn ConfidenceSource>) -> Result<Self, VerifyError> {
        Self::with_vocabulary(policy, vocab::AGRICULTURE_V1, vocab::LEGACY_V0, confidence)
    }

    pub fn with_vocabulary(
        policy: Policy,
        vocabulary: Vocabulary,
        legacy: LegacyVocabulary,
        confidence: Arc<dyn ConfidenceSource>,
    ) -> Result<Self, VerifyError> {
        debug!(vocabulary = vocabulary.name, version = vocabulary.version, ?policy, "compiling vocabulary");
        Ok(Self { policy, lexicon: Lexicon::compile(vocabulary)?, legacy, confidence })
    }

    pub fn policy(&self) -> Policy { self.policy }

    pub fn signals(&self, claim: &str) -> Signals { self.lexicon.detect(claim) }

    /// Classify one claim. `_domain` is accepted for the call contract but
    /// the vocabulary is fixed at construction.
    pub fn classify(&self, claim: &str, _domain: &str) -> ClaimVerdict {
        let signals = self.lexicon.detect(claim);
        let verdict = match self.policy {
            Policy::Enhanced => self.enhanced(claim, &signals),
            Policy::Legacy => self.legacy(claim, &signals),
        };
        debug!(status = %verdict.status, confidence = verdict.confidence, ?signals, "classified claim");
        verdict
    }

    fn enhanced(&self, claim: &str, s: &Signals) -> ClaimVerdict {
        let specificity = s.specificity();
        if s.danger {
            let markers = vocab::matching(&claim.to_lowercase(), self.lexicon.vocab.danger_markers);
            debug!(?markers, "danger markers found");
            return build(claim, Status::Invalid, self.confidence.draw(5, 20),
                "Contains potentially dangerous recommendations without safety considerations.",
                StructuralQuality::Poor, false, specificity, Severity::High);
        }
        if s.data_evidence && s.numeric && s.unit && !s.hedge {
            return build(claim, Status::Valid, self.confidence.draw(80, 95),
                "Well-supported claim with specific data and measurements.",
                StructuralQuality::Strong, true, specificity, Severity::Low);
        }
        if s.vague || (!s.data_evidence && !s.numeric) {
            return build(claim, Status::Questionable, self.confidence.draw(30, 55),
                "Lacks specific data or contextual information to verify accuracy.",
                StructuralQuality::Weak, false, specificity, Severity::Medium);
        }
        build(claim, Status::Questionable, self.confidence.draw(50, 70),
            "Partially supported but missing key details for full verification.",
            StructuralQuality::Medium, s.data_evidence, specificity, Severity::Medium)
    }

    fn legacy(&self, claim: &str, s: &Signals) -> ClaimVerdict {
        let lower = claim.to_lowercase();
        let v = &self.legacy;
        let reasoning = vocab::contains_any(&lower, v.causal_markers);
        let absolute = vocab::contains_any(&lower, v.absolute_terms);
        let vague = vocab::contains_any(&lower, v.vague_terms) && !s.numeric;
        let safety = vocab::contains_any(&lower, v.safety_markers);
        let domain_specific = vocab::contains_any(&lower, v.domain_keywords);

        let specificity = Signals { data_evidence: reasoning, ..*s }.specificity();

        if absolute && !reasoning {
            build(claim, Status::Invalid, self.confidence.draw(5, 20),
                "Makes absolute claim without justification or evidence.",
                StructuralQuality::Poor, s.numeric, specificity, Severity::Medium)
        } else if vague {
            build(claim, Status::Questionable, self.confidence.draw(30, 55),
                "Contains vague terms without specific measurements or context.",
                StructuralQuality::Weak, s.numeric, specificity, Severity::Medium)
        } else if safety && !reasoning {
            build(claim, Status::Invalid, self.confidence.draw(5, 20),
                "Safety-critical recommendation without justification or safety precautions.",
                StructuralQuality::Poor, s.numeric, specificity, Severity::High)
        } else if s.numeric && !reasoning {
            build(claim, Status::Questionable, self.confidence.draw(50, 70),
                "Provides specific numbers but lacks explanation or data source.",
                StructuralQuality::Medium, s.numeric, specificity, Severity::Medium)
        } else if !domain_specific {
            build(claim, Status::Valid, self.confidence.draw(50, 70),
                "General statement without specific agricultural claims.",
                StructuralQuality::Medium, s.numeric, specificity, Severity::Low)
        } else {
            build(claim, Status::Valid, self.confidence.draw(80, 95),
                "Claim appears logically sound with appropriate context.",
                StructuralQuality::Strong, s.numeric, specificity, Severity::Low)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build(
    claim: &str,
    status: Status,
    confidence: u8,
    reasoning: &str,
    structural_quality: StructuralQuality,
    data_support: bool,
    specificity_score: u8,
    severity: Severity,
) -> ClaimVerdict {
    ClaimVerdict {
        claim: claim.to_string(),
        status,
        confidence,
        reasoning: reasoning.to_string(),
        structural_quality,
        data_support,
        specificity_score,
        severity,
        requires_attention: status != Status::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enhanced(src: Arc<dyn ConfidenceSource>) -> ClaimClassifier {
        ClaimClassifier::new(Policy::Enhanced, src).unwrap()
    }

    #[test]
    fn danger_markers_make_claim_invalid() {
        let c = enhanced(Arc::new(ThreadRandom));
        let v = c.classify("Spray pesticide at maximum concentration every day regardless of pest levels", "agriculture");
        assert_eq!(v.status, Status::Invalid);
        assert!((5..=20).contains(&v.confidence));
        assert_eq!(v.structural_quality, StructuralQuality::Poor);
        assert!(v.reasoning.contains("dangerous"));
        assert!(v.requires_attention);
    }

    #[test]
    fn multiplier_counts_as_danger() {
        let c = enhanced(Arc::new(Midpoint));
        let v = c.classify("Apply glyphosate at 5x recommended concentration in windy conditions", "agriculture");
        assert_eq!(v.status, Status::Invalid);
        assert_eq!(v.confidence, 12);
    }

    #[test]
    fn dimensions_are_not_multipliers() {
        let c = enhanced(Arc::new(Midpoint));
        let claim = "Plant seedlings at 75 x 25 cm spacing based on soil test results";
        assert!(!c.signals(claim).danger);
        let v = c.classify(claim, "agriculture");
        assert_ne!(v.status, Status::Invalid);
        assert_eq!(v.status, Status::Valid);
        assert!(c.signals("Mix 3x the label rate into 2 rows").danger);
    }

    #[test]
    fn loose_words_after_numbers_are_not_units() {
        let c = enhanced(Arc::new(Midpoint));
        let claim = "Based on sensor readings, irrigate zone 3 in the morning";
        let s = c.signals(claim);
        assert!(s.data_evidence && s.numeric);
        assert!(!s.unit);
        let v = c.classify(claim, "agriculture");
        assert_eq!(v.status, Status::Questionable);
        assert_eq!(v.structural_quality, StructuralQuality::Medium);
        assert_eq!(v.confidence, 60);
    }

    #[test]
    fn measured_claim_is_valid() {
        let c = enhanced(Arc::new(ThreadRandom));
        let v = c.classify("Apply 50mm irrigation based on soil moisture readings at 40% capacity", "agriculture");
        assert_eq!(v.status, Status::Valid);
        assert!((80..=95).contains(&v.confidence));
        assert!(v.data_support);
        assert_eq!(v.structural_quality, StructuralQuality::Strong);
        assert_eq!(v.specificity_score, 85);
    }

    #[test]
    fn hedge_blocks_valid() {
        let c = enhanced(Arc::new(Midpoint));
        let v = c.classify("Yield could rise 10% based on trial readings", "agriculture");
        assert_eq!(v.status, Status::Questionable);
        assert_eq!(v.structural_quality, StructuralQuality::Medium);
        assert!(v.data_support);
        assert_eq!(v.confidence, 60);
    }

    #[test]
    fn vague_claim_is_questionable() {
        let c = enhanced(Arc::new(ThreadRandom));
        let v = c.classify("This may help improve soil quality", "agriculture");
        assert_eq!(v.status, Status::Questionable);
        assert!((30..=55).contains(&v.confidence));
        assert_eq!(v.structural_quality, StructuralQuality::Weak);
        assert!(!v.data_support);
    }

    #[test]
    fn numbers_without_evidence_are_partial() {
        let c = enhanced(Arc::new(Midpoint));
        let v = c.classify("Apply 200kg potassium sulfate per hectare", "agriculture");
        assert_eq!(v.status, Status::Questionable);
        assert_eq!(v.structural_quality, StructuralQuality::Medium);
        assert!(!v.data_support);
        assert_eq!(v.specificity_score, 55);
    }

    #[test]
    fn specificity_caps_and_counts_length() {
        let s = Signals { numeric: true, unit: true, data_evidence: true, words: 16, ..Default::default() };
        assert_eq!(s.specificity(), 100);
        let s = Signals { words: 15, ..Default::default() };
        assert_eq!(s.specificity(), 0);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let a = Seeded::new(7);
        let b = Seeded::new(7);
        let xs: Vec<u8> = (0..16).map(|_| a.draw(30, 55)).collect();
        let ys: Vec<u8> = (0..16).map(|_| b.draw(30, 55)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| (30..=55).contains(x)));
    }

    #[test]
    fn legacy_table_precedence() {
        let c = ClaimClassifier::new(Policy::Legacy, Arc::new(Midpoint)).unwrap();
        assert_eq!(c.policy(), Policy::Legacy);
        assert_eq!("LEGACY".parse::<Policy>(), Ok(Policy::Legacy));
        assert!("strict".parse::<Policy>().is_err());

        let v = c.classify("Always water at noon", "agriculture");
        assert_eq!(v.status, Status::Invalid);
        assert_eq!(v.severity, Severity::Medium);

        let v = c.classify("Use the best mulch", "agriculture");
        assert_eq!(v.status, Status::Questionable);

        let v = c.classify("Spray neem oil on the leaves", "agriculture");
        assert_eq!(v.status, Status::Invalid);
        assert_eq!(v.severity, Severity::High);

        let v = c.classify("Add 20 units of compost", "agriculture");
        assert_eq!(v.status, Status::Questionable);

        let v = c.classify("The weather was pleasant", "agriculture");
        assert_eq!(v.status, Status::Valid);
        assert!(v.reasoning.contains("General statement"));

        let v = c.classify("Water the soil because it is dry", "agriculture");
        assert_eq!(v.status, Status::Valid);
        assert_eq!(v.structural_quality, StructuralQuality::Strong);
    }

    #[test]
    fn legacy_markers_match_whole_words() {
        let c = ClaimClassifier::new(Policy::Legacy, Arc::new(Midpoint)).unwrap();
        // "so" inside "soil" is not a causal marker
        let v = c.classify("Spray the soil with neem oil", "agriculture");
        assert_eq!(v.status, Status::Invalid);
        assert!(v.reasoning.contains("Safety-critical"));

        let v = c.classify("Spray neem oil so aphids drop off the soil", "agriculture");
        assert_eq!(v.status, Status::Valid);
        assert_eq!(v.confidence, 87);
    }
}
