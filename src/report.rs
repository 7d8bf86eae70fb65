// src/report.rs
use std::sync::Arc;
use tracing::info;

use crate::classifier::{ClaimClassifier, ConfidenceSource, Policy, ThreadRandom};
use crate::error::{VerifyError, VerifyResult};
use crate::metrics::compute_metrics;
use crate::segments::segment_claims;
use crate::types::*;
use crate::verdict;

/// Display width for claim text in chart details.
const CLAIM_DISPLAY_CHARS: usize = 50;

/// Composes segmentation, classification and aggregation into a report.
pub struct Verifier {
    classifier: ClaimClassifier,
}

impl Verifier {
    pub fn new(policy: Policy, confidence: Arc<dyn ConfidenceSource>) -> VerifyResult<Self> {
        Ok(Self { classifier: ClaimClassifier::new(policy, confidence)? })
    }

    pub fn from_classifier(classifier: ClaimClassifier) -> Self {
        Self { classifier }
    }

    /// Enhanced policy with random confidence draws.
    pub fn standard() -> VerifyResult<Self> {
        Self::new(Policy::Enhanced, Arc::new(ThreadRandom))
    }

    pub fn policy(&self) -> Policy { self.classifier.policy() }

    pub fn verify(&self, explanation: &str, domain: &str) -> VerifyResult<VerificationReport> {
        let segments = segment_claims(explanation);
        if segments.is_empty() {
            return Err(VerifyError::EmptyInput);
        }
        let claims: Vec<ClaimVerdict> = segments.iter().map(|c| self.classifier.classify(c, domain)).collect();
        let report = self.compose(explanation, domain, claims);
        info!(domain, claims = report.claims.len(), issues = report.issues.len(),
              status = %report.overall_status, "verified explanation");
        Ok(report)
    }

    pub fn verify_explanation(&self, explanation: &Explanation) -> VerifyResult<VerificationReport> {
        self.verify(&explanation.text, &explanation.domain)
    }

    fn compose(&self, explanation: &str, domain: &str, claims: Vec<ClaimVerdict>) -> VerificationReport {
        let issues: Vec<ClaimVerdict> = claims.iter().filter(|c| c.status != Status::Valid).cloned().collect();
        let metrics = compute_metrics(&claims, explanation);
        VerificationReport {
            original_text: explanation.to_string(),
            domain: domain.to_string(),
            summary: verdict::summarize(&claims, &metrics),
            headline: verdict::headline(&claims).to_string(),
            overall_status: verdict::overall_status(&claims, self.policy()),
            recommendations: verdict::recommendations(&metrics, issues.len()),
            chart_data: chart_data(&claims, &metrics),
            metrics,
            issues,
            claims,
        }
    }
}

pub fn chart_data(claims: &[ClaimVerdict], metrics: &MetricSet) -> ChartData {
    let mut status_distribution = StatusDistribution::default();
    let mut confidence_distribution = ConfidenceDistribution::default();
    for c in claims {
        match c.status {
            Status::Valid => status_distribution.valid += 1,
            Status::Invalid => status_distribution.invalid += 1,
            Status::Questionable => status_distribution.questionable += 1,
        }
        match c.confidence {
            75..=u8::MAX => confidence_distribution.high += 1,
            45..=74 => confidence_distribution.medium += 1,
            _ => confidence_distribution.low += 1,
        }
    }
    let (labels, values): (Vec<String>, Vec<u8>) = metrics.named().iter().map(|(n, v)| (n.to_string(), *v)).unzip();
    ChartData {
        status_distribution,
        confidence_distribution,
        metrics_radar: MetricsRadar { labels, values },
        claim_details: claims
            .iter()
            .map(|c| ClaimDetail { claim: truncate(&c.claim, CLAIM_DISPLAY_CHARS), confidence: c.confidence, status: c.status })
            .collect(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}
