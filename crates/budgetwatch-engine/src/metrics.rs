//! Derived spending metrics.
//!
//! Each metric is a pure function of a [`BudgetSnapshot`] (and the evaluation
//! instant where time matters). All ratios are normalized by the allocation,
//! so every function here rejects a non-positive allocation instead of
//! producing an undefined value.
//!
//! Time-based metrics are not clamped to the budget window: evaluating before
//! the start or after the end extrapolates linearly.

use budgetwatch_types::{
    BudgetSnapshot, BudgetWatchError, HistoricalComparison, HistoricalPlaceholder, Result,
    RiskThresholds,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Every metric the engine derives for one assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingMetrics {
    pub elapsed_fraction: Decimal,
    pub expected_spending: Decimal,
    pub spending_variance: Decimal,
    pub transaction_frequency: Decimal,
    pub allocation_deviation: Decimal,
    pub rapid_spending: bool,
}

impl SpendingMetrics {
    /// Compute all metrics for `snapshot` at `now`.
    ///
    /// # Errors
    /// [`BudgetWatchError::InvalidInput`] for a snapshot that fails validation,
    /// [`BudgetWatchError::ArithmeticOverflow`] for out-of-range magnitudes.
    pub fn compute(
        snapshot: &BudgetSnapshot,
        now: DateTime<Utc>,
        thresholds: &RiskThresholds,
    ) -> Result<Self> {
        snapshot.validate()?;

        let elapsed_fraction = elapsed_fraction(snapshot, now)?;
        let expected_spending =
            scale(elapsed_fraction, snapshot.allocated_amount, "expected_spending")?;
        let spending_variance = normalized_gap(snapshot, expected_spending, "spending_variance")?;
        let transaction_frequency = transaction_frequency(snapshot)?;
        let allocation_deviation = allocation_deviation(snapshot)?;
        let rapid_spending = transaction_frequency > thresholds.rapid_spending_utilization
            && elapsed_fraction < thresholds.rapid_spending_window_fraction;

        Ok(Self {
            elapsed_fraction,
            expected_spending,
            spending_variance,
            transaction_frequency,
            allocation_deviation,
            rapid_spending,
        })
    }
}

/// Fraction of the budget window elapsed at `now`: `(now - start) / (end - start)`.
///
/// Negative before the window opens, above one after it closes.
pub fn elapsed_fraction(snapshot: &BudgetSnapshot, now: DateTime<Utc>) -> Result<Decimal> {
    let window = snapshot.window_ms();
    if window <= 0 {
        return Err(BudgetWatchError::invalid_input(format!(
            "budget window must be positive, got {window}ms"
        )));
    }
    Decimal::from(snapshot.elapsed_ms(now))
        .checked_div(Decimal::from(window))
        .ok_or(BudgetWatchError::ArithmeticOverflow {
            operation: "elapsed_fraction",
        })
}

/// Linear share of the allocation that should have been spent by `now`.
pub fn expected_spending(snapshot: &BudgetSnapshot, now: DateTime<Utc>) -> Result<Decimal> {
    let fraction = elapsed_fraction(snapshot, now)?;
    scale(fraction, snapshot.allocated_amount, "expected_spending")
}

/// `|spent - expected| / allocated`.
pub fn spending_variance(snapshot: &BudgetSnapshot, now: DateTime<Utc>) -> Result<Decimal> {
    let expected = expected_spending(snapshot, now)?;
    normalized_gap(snapshot, expected, "spending_variance")
}

/// `spent / allocated`.
///
/// Named after transaction frequency, but no transaction-level data reaches
/// the engine; this is the utilization ratio.
pub fn transaction_frequency(snapshot: &BudgetSnapshot) -> Result<Decimal> {
    per_allocated(snapshot, snapshot.spent_amount, "transaction_frequency")
}

/// `|spent - allocated| / allocated`.
pub fn allocation_deviation(snapshot: &BudgetSnapshot) -> Result<Decimal> {
    normalized_gap(snapshot, snapshot.allocated_amount, "allocation_deviation")
}

/// Over the utilization threshold while still early in the window.
///
/// Both comparisons are strict: utilization must exceed the threshold and the
/// elapsed fraction must be below the window cutoff.
pub fn rapid_spending(
    snapshot: &BudgetSnapshot,
    now: DateTime<Utc>,
    thresholds: &RiskThresholds,
) -> Result<bool> {
    let utilization = transaction_frequency(snapshot)?;
    let elapsed = elapsed_fraction(snapshot, now)?;
    Ok(utilization > thresholds.rapid_spending_utilization
        && elapsed < thresholds.rapid_spending_window_fraction)
}

/// Placeholder prior-year comparison derived from the allocation alone.
pub fn historical_comparison(
    snapshot: &BudgetSnapshot,
    placeholder: &HistoricalPlaceholder,
) -> Result<HistoricalComparison> {
    Ok(HistoricalComparison {
        previous_year: scale(
            snapshot.allocated_amount,
            placeholder.previous_year_ratio,
            "historical_comparison",
        )?,
        current_year: snapshot.allocated_amount,
        variance: placeholder.variance,
    })
}

fn scale(a: Decimal, b: Decimal, operation: &'static str) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or(BudgetWatchError::ArithmeticOverflow { operation })
}

/// `|spent - reference| / allocated`.
fn normalized_gap(
    snapshot: &BudgetSnapshot,
    reference: Decimal,
    operation: &'static str,
) -> Result<Decimal> {
    let gap = snapshot
        .spent_amount
        .checked_sub(reference)
        .ok_or(BudgetWatchError::ArithmeticOverflow { operation })?;
    per_allocated(snapshot, gap.abs(), operation)
}

fn per_allocated(
    snapshot: &BudgetSnapshot,
    amount: Decimal,
    operation: &'static str,
) -> Result<Decimal> {
    if snapshot.allocated_amount <= Decimal::ZERO {
        return Err(BudgetWatchError::invalid_input(format!(
            "allocated amount must be positive, got {}",
            snapshot.allocated_amount
        )));
    }
    amount
        .checked_div(snapshot.allocated_amount)
        .ok_or(BudgetWatchError::ArithmeticOverflow { operation })
}
