//! Risk engine — the single entry point for budget assessments.
//!
//! The engine validates a snapshot, derives the spending metrics, runs the
//! anomaly rules, aggregates the score, and renders the flags. It has no
//! state besides its immutable [`RiskConfig`], so one instance can be shared
//! across any number of threads.
//!
//! ## Flow
//!
//! ```text
//! BudgetSnapshot + now
//!   → validate (allocation > 0, end > start)   ─ reject: BW_ERR_100
//!   → SpendingMetrics::compute
//!   → detect_anomalies
//!   → aggregate_score + render_flags
//!   → RiskAssessment
//! ```

use budgetwatch_types::{BudgetRecord, BudgetSnapshot, Result, RiskAssessment, RiskConfig};
use chrono::{DateTime, Utc};

use crate::{
    anomaly::detect_anomalies,
    metrics::{SpendingMetrics, historical_comparison},
    report::{FraudReport, PortfolioReport, RejectedBudget},
    scoring::{aggregate_score, render_flags},
};

/// Stateless budget risk assessor.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Create an engine with the default thresholds and weights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    /// [`BudgetWatchError::Configuration`](budgetwatch_types::BudgetWatchError::Configuration)
    /// if the configuration fails validation.
    pub fn with_config(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Assess a budget snapshot at the instant `now`.
    ///
    /// Pure: identical inputs always produce identical output.
    ///
    /// # Errors
    /// [`BudgetWatchError::InvalidInput`](budgetwatch_types::BudgetWatchError::InvalidInput)
    /// for a non-positive allocation or an empty/inverted window. No partial
    /// assessment is ever returned.
    pub fn assess(&self, snapshot: &BudgetSnapshot, now: DateTime<Utc>) -> Result<RiskAssessment> {
        let metrics = SpendingMetrics::compute(snapshot, now, &self.config.thresholds)?;
        let anomalies = detect_anomalies(&metrics, &self.config.thresholds)?;
        let score = aggregate_score(&anomalies, &metrics, &self.config);
        let flags = render_flags(&anomalies);
        let historical = historical_comparison(snapshot, &self.config.historical)?;

        tracing::debug!(
            score,
            anomalies = anomalies.len(),
            spending_variance = %metrics.spending_variance,
            transaction_frequency = %metrics.transaction_frequency,
            allocation_deviation = %metrics.allocation_deviation,
            elapsed_fraction = %metrics.elapsed_fraction,
            "Budget assessed"
        );

        Ok(RiskAssessment {
            score,
            flags,
            spending_variance: metrics.spending_variance,
            transaction_frequency: metrics.transaction_frequency,
            allocation_deviation: metrics.allocation_deviation,
            historical_comparison: historical,
            anomalies,
        })
    }

    /// On-demand analysis of a single stored budget.
    ///
    /// # Errors
    /// Same as [`Self::assess`].
    pub fn analyze_budget(&self, record: &BudgetRecord, now: DateTime<Utc>) -> Result<FraudReport> {
        let assessment = self.assess(&record.snapshot(), now).inspect_err(|err| {
            tracing::warn!(budget = %record.id, error = %err, "Budget rejected by risk engine");
        })?;
        let band = self.config.band(assessment.score);
        Ok(FraudReport::build(record, &assessment, band, now))
    }

    /// Assess every record for a listing.
    ///
    /// Records are assessed independently and reported in input order. A
    /// record that cannot be assessed is listed under `rejected` and does not
    /// abort the rest.
    pub fn assess_portfolio<'a, I>(&self, records: I, now: DateTime<Utc>) -> PortfolioReport
    where
        I: IntoIterator<Item = &'a BudgetRecord>,
    {
        let mut portfolio = PortfolioReport::default();
        for record in records {
            match self.analyze_budget(record, now) {
                Ok(report) => portfolio.reports.push(report),
                Err(err) => portfolio.rejected.push(RejectedBudget {
                    budget_id: record.id,
                    reason: err.to_string(),
                }),
            }
        }

        let summary = portfolio.summary();
        tracing::info!(
            assessed = portfolio.reports.len(),
            rejected = portfolio.rejected.len(),
            high = summary.high,
            medium = summary.medium,
            low = summary.low,
            "Portfolio assessment complete"
        );

        portfolio
    }
}

#[cfg(test)]
mod tests {
    use budgetwatch_types::*;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RiskEngine>();
    }

    #[test]
    fn on_plan_budget_at_threshold_is_clean() {
        // variance 0, utilization exactly 0.8, deviation exactly 0.2
        let engine = RiskEngine::new();
        let s = BudgetSnapshot::dummy(100_000, 80_000, 100);
        let a = engine.assess(&s, s.instant_at(4, 5)).unwrap();
        assert_eq!(a.score, 0);
        assert!(a.flags.is_empty());
        assert!(a.anomalies.is_empty());
    }

    #[test]
    fn zero_allocation_rejected() {
        let engine = RiskEngine::new();
        let s = BudgetSnapshot::dummy(0, 1_000, 100);
        let err = engine.assess(&s, s.instant_at(1, 2)).unwrap_err();
        assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
    }

    #[test]
    fn inverted_window_rejected() {
        let engine = RiskEngine::new();
        let s = BudgetSnapshot::dummy(1_000, 100, -10);
        let err = engine.assess(&s, s.start_date).unwrap_err();
        assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
    }

    #[test]
    fn overspend_is_scored_not_rejected() {
        let engine = RiskEngine::new();
        let s = BudgetSnapshot::dummy(1_000, 5_000, 100);
        let a = engine.assess(&s, s.end_date).unwrap();
        // variance 4.0 (30 + 20), utilization 5.0 (15), deviation 4.0 (20 + 15)
        assert_eq!(a.score, 100);
        assert_eq!(a.flags.len(), 2);
        assert_eq!(a.transaction_frequency, Decimal::new(5, 0));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut cfg = RiskConfig::default();
        cfg.bands.medium = cfg.bands.high;
        assert!(matches!(
            RiskEngine::with_config(cfg),
            Err(BudgetWatchError::Configuration(_))
        ));
    }

    #[test]
    fn custom_thresholds_apply() {
        let mut cfg = RiskConfig::default();
        cfg.thresholds.allocation_deviation = Decimal::new(6, 1);
        let engine = RiskEngine::with_config(cfg).unwrap();
        // deviation 0.5: flagged under defaults, quiet under 0.6
        let s = BudgetSnapshot::dummy(1_000, 500, 100);
        let a = engine.assess(&s, s.instant_at(1, 2)).unwrap();
        assert!(!a.has_anomaly(AnomalyKind::AllocationDeviation));
        assert_eq!(a.score, 0);
    }

    #[test]
    fn analyze_budget_uses_configured_bands() {
        let mut cfg = RiskConfig::default();
        cfg.bands = BandThresholds { high: 30, medium: 10 };
        let engine = RiskEngine::with_config(cfg).unwrap();
        let s = BudgetSnapshot::dummy(200_000, 0, 365);
        let record = BudgetRecord::dummy("Water", "Utilities", &s);
        let report = engine.analyze_budget(&record, s.start_date).unwrap();
        assert_eq!(report.risk_score, 35);
        assert_eq!(report.risk_band, RiskBand::High);
    }
}
