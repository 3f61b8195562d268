//! Integration test: reference scenarios.
//!
//! Each scenario pins the exact score, flags, and metrics the engine must
//! produce for a realistic budget.

use budgetwatch_engine::RiskEngine;
use budgetwatch_types::*;
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

/// 1,000,000 allocated, 950,000 spent two months into a one-year window.
#[test]
fn scenario_a_early_overspend() {
    let s = BudgetSnapshot::dummy(1_000_000, 950_000, 365);
    let now = s.instant_at(2, 12);
    let a = RiskEngine::new().assess(&s, now).unwrap();

    assert!(a.spending_variance > Decimal::new(783, 3));
    assert!(a.spending_variance < Decimal::new(784, 3));
    assert_eq!(a.transaction_frequency, Decimal::new(95, 2));
    assert_eq!(a.allocation_deviation, Decimal::new(5, 2));

    assert!(a.has_anomaly(AnomalyKind::SpendingVariance));
    assert!(a.has_anomaly(AnomalyKind::RapidSpending));
    assert!(!a.has_anomaly(AnomalyKind::AllocationDeviation));

    // 30 (variance) + 20 (variance bonus) + 30 (rapid) + 15 (utilization)
    assert_eq!(a.score, 95);
    assert_eq!(a.band(), RiskBand::High);
    assert_eq!(
        a.flags,
        vec![
            "High Risk: Unusual spending variance detected (78.3%)".to_string(),
            "High Risk: Rapid spending detected in early project phase".to_string(),
        ]
    );
}

/// 500,000 allocated and spent, window fully elapsed.
#[test]
fn scenario_b_spent_exactly_on_schedule() {
    let s = BudgetSnapshot::dummy(500_000, 500_000, 365);
    let a = RiskEngine::new().assess(&s, s.end_date).unwrap();

    assert_eq!(a.spending_variance, Decimal::ZERO);
    assert_eq!(a.allocation_deviation, Decimal::ZERO);
    assert_eq!(a.transaction_frequency, Decimal::ONE);
    assert!(a.anomalies.is_empty());
    assert!(a.flags.is_empty());
    // Utilization 1.0 still earns the standalone utilization bonus.
    assert_eq!(a.score, 15);
}

/// 200,000 allocated, nothing spent, evaluated at the window start.
#[test]
fn scenario_c_untouched_allocation() {
    let s = BudgetSnapshot::dummy(200_000, 0, 365);
    let a = RiskEngine::new().assess(&s, s.start_date).unwrap();

    assert_eq!(a.allocation_deviation, Decimal::ONE);
    // 20 (medium deviation) + 15 (deviation bonus)
    assert_eq!(a.score, 35);
    assert_eq!(a.band(), RiskBand::Low);
    assert_eq!(
        a.flags,
        vec!["Medium Risk: Significant deviation from allocated budget (100.0%)".to_string()]
    );
    assert_eq!(a.historical_comparison.previous_year, dec(180_000));
    assert_eq!(a.historical_comparison.current_year, dec(200_000));
    assert_eq!(a.historical_comparison.variance, Decimal::new(1, 1));
}

#[test]
fn rapid_spending_boundary() {
    let engine = RiskEngine::new();
    let s = BudgetSnapshot::dummy(1_000_000, 810_000, 100);

    let before = engine.assess(&s, s.instant_at(24, 100)).unwrap();
    assert!(before.has_anomaly(AnomalyKind::RapidSpending));

    let at = engine.assess(&s, s.instant_at(25, 100)).unwrap();
    assert!(!at.has_anomaly(AnomalyKind::RapidSpending));

    let after = engine.assess(&s, s.instant_at(26, 100)).unwrap();
    assert!(!after.has_anomaly(AnomalyKind::RapidSpending));
}

#[test]
fn high_variance_contributes_fifty_points() {
    // Half the window gone, nothing spent: variance 0.5, deviation 1.0.
    let s = BudgetSnapshot::dummy(100_000, 0, 100);
    let a = RiskEngine::new().assess(&s, s.instant_at(1, 2)).unwrap();
    assert!(a.spending_variance > Decimal::new(3, 1));
    assert!(
        a.flags
            .iter()
            .any(|f| f.starts_with("High Risk:") && f.contains("spending variance"))
    );
    assert!(a.score >= 50);
    // 30 + 20 (variance) + 20 + 15 (deviation)
    assert_eq!(a.score, 85);
}

#[test]
fn evaluation_after_window_extrapolates() {
    // Twice the window elapsed: expected spend is 200% of the allocation.
    let s = BudgetSnapshot::dummy(1_000, 1_000, 100);
    let now = s.end_date + chrono::Duration::days(100);
    let a = RiskEngine::new().assess(&s, now).unwrap();
    assert_eq!(a.spending_variance, Decimal::ONE);
    assert_eq!(
        a.flags,
        vec!["High Risk: Unusual spending variance detected (100.0%)".to_string()]
    );
}

#[test]
fn refunds_produce_a_score() {
    let s = BudgetSnapshot::dummy(10_000, -2_000, 100);
    let a = RiskEngine::new().assess(&s, s.start_date).unwrap();
    assert_eq!(a.transaction_frequency, Decimal::new(-2, 1));
    assert!(a.has_anomaly(AnomalyKind::AllocationDeviation));
    assert!(a.score <= 100);
}

#[test]
fn zero_allocation_is_invalid_input() {
    let s = BudgetSnapshot::dummy(0, 0, 365);
    let err = RiskEngine::new().assess(&s, s.start_date).unwrap_err();
    assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
    assert!(err.to_string().starts_with("BW_ERR_100"));
}

#[test]
fn zero_length_window_is_invalid_input() {
    let s = BudgetSnapshot::dummy(1_000, 0, 0);
    let err = RiskEngine::new().assess(&s, s.start_date).unwrap_err();
    assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
}
