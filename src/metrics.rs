use crate::segments::word_count;
use crate::types::{ClaimVerdict, MetricSet, Status};

/// Words of explanation at which contextual relevance saturates.
const RELEVANCE_SATURATION_WORDS: f64 = 50.0;

pub fn compute_metrics(claims: &[ClaimVerdict], explanation: &str) -> MetricSet {
    if claims.is_empty() {
        return MetricSet::default();
    }
    let total = claims.len() as f64;
    let supported = claims.iter().filter(|c| c.data_support).count() as f64;
    let valid = claims.iter().filter(|c| c.status == Status::Valid).count() as f64;
    let invalid = claims.iter().filter(|c| c.status == Status::Invalid).count() as f64;
    let specificity: f64 = claims.iter().map(|c| c.specificity_score as f64).sum();
    let confidence: f64 = claims.iter().map(|c| c.confidence as f64).sum();

    let consistency = 50.0 + (100.0 * (valid - invalid) / total).round();
    let relevance = (100.0 * word_count(explanation) as f64 / RELEVANCE_SATURATION_WORDS).round();

    MetricSet {
        data_quality: to_score(100.0 * supported / total),
        logical_consistency: to_score(consistency),
        completeness: to_score(specificity / total),
        evidence_strength: to_score(confidence / total),
        contextual_relevance: to_score(relevance),
    }
}

fn to_score(x: f64) -> u8 {
    x.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Severity, StructuralQuality};
    use proptest::prelude::*;

    fn verdict(status: Status, confidence: u8, specificity: u8, data: bool) -> ClaimVerdict {
        ClaimVerdict {
            claim: "c".into(),
            status,
            confidence,
            reasoning: String::new(),
            structural_quality: StructuralQuality::Medium,
            data_support: data,
            specificity_score: specificity,
            severity: Severity::Low,
            requires_attention: status != Status::Valid,
        }
    }

    #[test]
    fn empty_claims_are_neutral() {
        let m = compute_metrics(&[], "anything at all");
        assert_eq!(m, MetricSet::default());
        assert!(m.named().iter().all(|(_, v)| *v == 50));
    }

    #[test]
    fn mixed_claims() {
        let claims = vec![
            verdict(Status::Valid, 90, 85, true),
            verdict(Status::Invalid, 10, 0, false),
            verdict(Status::Questionable, 41, 30, false),
        ];
        let text = "word ".repeat(25);
        let m = compute_metrics(&claims, &text);
        assert_eq!(m.data_quality, 33);
        assert_eq!(m.logical_consistency, 50);
        assert_eq!(m.completeness, 38);
        assert_eq!(m.evidence_strength, 47);
        assert_eq!(m.contextual_relevance, 50);
    }

    #[test]
    fn consistency_and_relevance_clamp() {
        let claims = vec![verdict(Status::Valid, 90, 85, true); 4];
        let m = compute_metrics(&claims, &"word ".repeat(80));
        assert_eq!(m.logical_consistency, 100);
        assert_eq!(m.contextual_relevance, 100);

        let claims = vec![verdict(Status::Invalid, 10, 0, false); 2];
        assert_eq!(compute_metrics(&claims, "x").logical_consistency, 0);
    }

    #[test]
    fn relevance_counts_compact_units_once() {
        let claims = vec![verdict(Status::Valid, 90, 85, true)];
        let m = compute_metrics(&claims, "Apply 200kg/hectare at 22-28°C");
        assert_eq!(m.contextual_relevance, 8);
    }

    proptest! {
        #[test]
        fn completeness_monotone_in_specificity(
            specs in proptest::collection::vec(0u8..=100, 1..12),
            idx in 0usize..12,
            bump in 0u8..=100,
        ) {
            let claims: Vec<_> = specs.iter().map(|s| verdict(Status::Questionable, 50, *s, false)).collect();
            let before = compute_metrics(&claims, "t").completeness;
            let mut raised = claims.clone();
            let i = idx % raised.len();
            raised[i].specificity_score = raised[i].specificity_score.saturating_add(bump).min(100);
            let after = compute_metrics(&raised, "t").completeness;
            prop_assert!(after >= before);
        }
    }
}
