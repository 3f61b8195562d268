//! Score aggregation and flag rendering.
//!
//! The score is additive: one weight per anomaly (by severity), then three
//! standalone bonuses, then a clamp to [`MAX_RISK_SCORE`]. The variance and
//! deviation bonuses re-test the same thresholds as anomaly rules 1 and 3,
//! so those conditions count twice. The duplication lives entirely in
//! [`ScoreBonuses`](budgetwatch_types::ScoreBonuses); zeroing a bonus removes it.

use budgetwatch_types::{Anomaly, RiskConfig, constants::MAX_RISK_SCORE};

use crate::metrics::SpendingMetrics;

/// Aggregate the anomaly weights and standalone bonuses into a clamped score.
#[must_use]
pub fn aggregate_score(
    anomalies: &[Anomaly],
    metrics: &SpendingMetrics,
    config: &RiskConfig,
) -> u8 {
    let weights: u32 = anomalies
        .iter()
        .map(|a| config.weights.weight(a.severity))
        .fold(0u32, u32::saturating_add);

    let t = &config.thresholds;
    let b = &config.bonuses;
    let mut total = weights;
    if metrics.spending_variance > t.spending_variance {
        total = total.saturating_add(b.spending_variance);
    }
    if metrics.transaction_frequency > t.utilization_bonus {
        total = total.saturating_add(b.utilization);
    }
    if metrics.allocation_deviation > t.allocation_deviation {
        total = total.saturating_add(b.allocation_deviation);
    }

    u8::try_from(total.min(u32::from(MAX_RISK_SCORE))).unwrap_or(MAX_RISK_SCORE)
}

/// Flags for every surfaced anomaly, in detection order.
#[must_use]
pub fn render_flags(anomalies: &[Anomaly]) -> Vec<String> {
    anomalies.iter().filter_map(Anomaly::flag).collect()
}
