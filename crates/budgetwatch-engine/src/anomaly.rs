//! Anomaly detection rules.
//!
//! The rules run in a fixed order and are independent: every rule is
//! evaluated, and any number of them may fire for the same snapshot. The
//! output order is the rule order, which in turn fixes the flag order.
//!
//! | # | Rule | Condition | Severity |
//! |---|------|-----------|----------|
//! | 1 | `spending_variance` | variance > threshold | high |
//! | 2 | `rapid_spending` | utilization > threshold, elapsed < window cutoff | high |
//! | 3 | `allocation_deviation` | deviation > threshold | medium |

use budgetwatch_types::{Anomaly, AnomalyKind, BudgetWatchError, Result, RiskThresholds, Severity};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::metrics::SpendingMetrics;

/// Message for the rapid-spending rule, which carries no magnitude.
pub const RAPID_SPENDING_MESSAGE: &str = "Rapid spending detected in early project phase";

/// Run every detection rule against precomputed metrics.
pub fn detect_anomalies(
    metrics: &SpendingMetrics,
    thresholds: &RiskThresholds,
) -> Result<Vec<Anomaly>> {
    let mut anomalies = Vec::new();

    if metrics.spending_variance > thresholds.spending_variance {
        anomalies.push(Anomaly {
            kind: AnomalyKind::SpendingVariance,
            severity: Severity::High,
            message: format!(
                "Unusual spending variance detected ({}%)",
                format_percent(metrics.spending_variance)?
            ),
        });
    }

    if metrics.rapid_spending {
        anomalies.push(Anomaly {
            kind: AnomalyKind::RapidSpending,
            severity: Severity::High,
            message: RAPID_SPENDING_MESSAGE.to_string(),
        });
    }

    if metrics.allocation_deviation > thresholds.allocation_deviation {
        anomalies.push(Anomaly {
            kind: AnomalyKind::AllocationDeviation,
            severity: Severity::Medium,
            message: format!(
                "Significant deviation from allocated budget ({}%)",
                format_percent(metrics.allocation_deviation)?
            ),
        });
    }

    for anomaly in &anomalies {
        tracing::debug!(
            kind = %anomaly.kind,
            severity = %anomaly.severity,
            message = %anomaly.message,
            "Anomaly detected"
        );
    }

    Ok(anomalies)
}

/// Render a ratio as a percentage with one decimal place, rounding half
/// away from zero (`0.7833` → `"78.3"`, `1` → `"100.0"`).
pub fn format_percent(ratio: Decimal) -> Result<String> {
    let percent = ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(BudgetWatchError::ArithmeticOverflow {
            operation: "format_percent",
        })?
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{percent:.1}"))
}
