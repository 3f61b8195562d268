//! Assessment fingerprints.
//!
//! The engine is a pure function, so the same snapshot and instant must
//! always yield the same [`RiskAssessment`]. The digest is a SHA-256 hash
//! over every field of an assessment, letting a persisted result be compared
//! with a fresh one without comparing full payloads.

use budgetwatch_types::RiskAssessment;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Compute the digest of an assessment.
///
/// Depends on, in order:
/// - score
/// - flags (length-prefixed)
/// - the three ratios
/// - the historical comparison
/// - every anomaly (kind, severity, message)
///
/// Decimals are hashed in normalized form, so `0.30` and `0.3` agree.
#[must_use]
pub fn compute_assessment_digest(assessment: &RiskAssessment) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"budgetwatch:assessment:v1:");
    hasher.update([assessment.score]);

    hasher.update((assessment.flags.len() as u64).to_le_bytes());
    for flag in &assessment.flags {
        update_str(&mut hasher, flag);
    }

    update_decimal(&mut hasher, assessment.spending_variance);
    update_decimal(&mut hasher, assessment.transaction_frequency);
    update_decimal(&mut hasher, assessment.allocation_deviation);

    let h = &assessment.historical_comparison;
    update_decimal(&mut hasher, h.previous_year);
    update_decimal(&mut hasher, h.current_year);
    update_decimal(&mut hasher, h.variance);

    hasher.update((assessment.anomalies.len() as u64).to_le_bytes());
    for anomaly in &assessment.anomalies {
        update_str(&mut hasher, &anomaly.kind.to_string());
        update_str(&mut hasher, &anomaly.severity.to_string());
        update_str(&mut hasher, &anomaly.message);
    }

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Verify that an assessment hashes to `expected`.
#[must_use]
pub fn verify_assessment_digest(assessment: &RiskAssessment, expected: &[u8; 32]) -> bool {
    compute_assessment_digest(assessment) == *expected
}

fn update_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn update_decimal(hasher: &mut Sha256, d: Decimal) {
    update_str(hasher, &d.normalize().to_string());
}
