//! Lexical verification of AI-generated explanations.
//!
//! An explanation is split into claims, each claim is scored for data
//! support, specificity, hedging and danger signals, and the verdicts are
//! aggregated into metrics, an overall status and chart-ready summaries.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod report;
pub mod segments;
pub mod server;
pub mod types;
pub mod verdict;
pub mod vocab;

pub use classifier::{ClaimClassifier, ConfidenceSource, Midpoint, Policy, Seeded, ThreadRandom};
pub use error::{VerifyError, VerifyResult};
pub use report::Verifier;
pub use types::*;

use once_cell::sync::Lazy;

pub const DEFAULT_DOMAIN: &str = "agriculture";

static STANDARD: Lazy<VerifyResult<Verifier>> = Lazy::new(Verifier::standard);

/// Process-wide enhanced verifier, compiled on first use.
pub fn standard_verifier() -> VerifyResult<&'static Verifier> {
    (*STANDARD).as_ref().map_err(Clone::clone)
}

/// Verify with the enhanced policy and random confidence draws.
pub fn verify(explanation: &str, domain: &str) -> VerifyResult<VerificationReport> {
    standard_verifier()?.verify(explanation, domain)
}
