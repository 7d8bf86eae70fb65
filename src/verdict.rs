//! Explanation-level status, summary and advice.

use crate::classifier::Policy;
use crate::types::{ClaimVerdict, MetricSet, Severity, Status};

/// Valid fraction at or above which an explanation without invalid claims is valid.
pub const VALID_FRACTION: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub valid: usize,
    pub questionable: usize,
    pub invalid: usize,
}

impl Tally {
    pub fn of(claims: &[ClaimVerdict]) -> Self {
        claims.iter().fold(Tally { total: claims.len(), ..Default::default() }, |mut t, c| {
            match c.status {
                Status::Valid => t.valid += 1,
                Status::Questionable => t.questionable += 1,
                Status::Invalid => t.invalid += 1,
            }
            t
        })
    }
}

pub fn overall_status(claims: &[ClaimVerdict], policy: Policy) -> Status {
    let t = Tally::of(claims);
    match policy {
        Policy::Enhanced => {
            if t.total == 0 {
                Status::Questionable
            } else if t.invalid > 0 {
                Status::Invalid
            } else if t.valid as f64 / t.total as f64 >= VALID_FRACTION {
                Status::Valid
            } else {
                Status::Questionable
            }
        }
        // worst status present wins
        Policy::Legacy => {
            if t.invalid > 0 {
                Status::Invalid
            } else if t.questionable > 0 {
                Status::Questionable
            } else {
                Status::Valid
            }
        }
    }
}

pub fn quality_band(metrics: &MetricSet) -> &'static str {
    let mean = metrics.mean();
    if mean >= 75.0 {
        "excellent"
    } else if mean >= 60.0 {
        "good"
    } else if mean >= 40.0 {
        "moderate"
    } else {
        "poor"
    }
}

pub fn summarize(claims: &[ClaimVerdict], metrics: &MetricSet) -> String {
    let t = Tally::of(claims);
    let mut out = format!(
        "Analyzed {} claims: {} valid, {} questionable, {} invalid. Overall explanation quality is {}.",
        t.total, t.valid, t.questionable, t.invalid, quality_band(metrics)
    );
    if t.invalid > 0 {
        out.push_str(&format!(
            " Warning: {} claim(s) contain potentially unsafe recommendations.",
            t.invalid
        ));
    }
    if t.questionable * 2 > t.total {
        out.push_str(" Most claims lack specific data or supporting evidence.");
    }
    if t.valid as f64 > VALID_FRACTION * t.total as f64 {
        out.push_str(" The explanation is well-supported by specific data.");
    }
    out
}

pub fn recommendations(metrics: &MetricSet, issue_count: usize) -> Vec<String> {
    let mut out: Vec<String> = metrics
        .named()
        .iter()
        .filter(|(_, v)| *v < 50)
        .map(|(name, _)| advice_for(name).to_string())
        .collect();
    if issue_count > 0 {
        out.push(format!(
            "Review {} flagged claim(s) before acting on this explanation.",
            issue_count
        ));
    }
    if out.is_empty() {
        out.push("Explanation meets quality standards for verification.".to_string());
    }
    out
}

fn advice_for(dimension: &str) -> &'static str {
    match dimension {
        "data_quality" => "Improve data quality: cite measurements, sensor readings or analysis results.",
        "logical_consistency" => "Improve logical consistency: remove unsafe or contradictory recommendations.",
        "completeness" => "Improve completeness: add specific quantities, units and timing.",
        "evidence_strength" => "Strengthen evidence: support recommendations with verifiable sources.",
        "contextual_relevance" => "Add context: describe field conditions, crop stage and local factors.",
        _ => "Review this explanation with a domain expert.",
    }
}

/// One-line go/no-go advisory.
pub fn headline(claims: &[ClaimVerdict]) -> &'static str {
    let t = Tally::of(claims);
    let critical = claims
        .iter()
        .any(|c| c.status != Status::Valid && c.severity == Severity::High);
    if critical {
        "STOP: Critical safety issues found. Do not proceed without expert review."
    } else if t.invalid > 0 {
        "CAUTION: Invalid claims detected. Verify with an agricultural expert before implementing."
    } else if t.questionable > 2 {
        "WARNING: Multiple questionable claims. Seek additional information before proceeding."
    } else if t.questionable > 0 {
        "MOSTLY SAFE: Minor concerns detected. Review flagged items before implementing."
    } else {
        "VERIFIED: All claims appear logically sound. Proceed with confidence."
    }
}
