use serde::{Deserialize, Serialize};
use std::fmt;

/// Input to one verification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub domain: String, // free-form tag, recorded but not used for scoring
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status { Valid, Questionable, Invalid }

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Valid => "valid",
            Status::Questionable => "questionable",
            Status::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralQuality { Strong, Medium, Weak, Poor }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity { Low, Medium, High }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimVerdict {
    pub claim: String,
    pub status: Status,
    pub confidence: u8,                        // 0..=100
    pub reasoning: String,
    pub structural_quality: StructuralQuality,
    pub data_support: bool,
    pub specificity_score: u8,                 // 0..=100
    pub severity: Severity,
    pub requires_attention: bool,              // status != valid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSet {
    pub data_quality: u8,
    pub logical_consistency: u8,
    pub completeness: u8,
    pub evidence_strength: u8,
    pub contextual_relevance: u8,
}

impl MetricSet {
    pub const NEUTRAL: u8 = 50;

    /// Dimension names in canonical order, paired with their values.
    pub fn named(&self) -> [(&'static str, u8); 5] {
        [
            ("data_quality", self.data_quality),
            ("logical_consistency", self.logical_consistency),
            ("completeness", self.completeness),
            ("evidence_strength", self.evidence_strength),
            ("contextual_relevance", self.contextual_relevance),
        ]
    }

    pub fn mean(&self) -> f64 {
        self.named().iter().map(|(_, v)| *v as f64).sum::<f64>() / 5.0
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        let n = Self::NEUTRAL;
        Self { data_quality: n, logical_consistency: n, completeness: n, evidence_strength: n, contextual_relevance: n }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusDistribution { pub valid: usize, pub invalid: usize, pub questionable: usize }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfidenceDistribution { pub high: usize, pub medium: usize, pub low: usize }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRadar { pub labels: Vec<String>, pub values: Vec<u8> }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDetail { pub claim: String, pub confidence: u8, pub status: Status }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub status_distribution: StatusDistribution,
    pub confidence_distribution: ConfidenceDistribution,
    pub metrics_radar: MetricsRadar,
    pub claim_details: Vec<ClaimDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub original_text: String,
    pub domain: String,
    pub claims: Vec<ClaimVerdict>,
    pub issues: Vec<ClaimVerdict>,             // claims with status != valid, in order
    pub summary: String,
    pub headline: String,
    pub overall_status: Status,
    pub metrics: MetricSet,
    pub chart_data: ChartData,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Questionable).unwrap(), "\"questionable\"");
        let s: Status = serde_json::from_str("\"invalid\"").unwrap();
        assert_eq!(s, Status::Invalid);
    }

    #[test]
    fn neutral_metrics_mean_is_fifty() {
        let m = MetricSet::default();
        assert_eq!(m.mean(), 50.0);
        assert_eq!(m.named()[0].0, "data_quality");
        assert_eq!(m.named()[4].0, "contextual_relevance");
    }
}
