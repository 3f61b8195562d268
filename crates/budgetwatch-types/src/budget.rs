//! Budget model: the store-side record and the snapshot the engine assesses.
//!
//! The engine never talks to the budget store. Callers fetch a
//! [`BudgetRecord`], extract a [`BudgetSnapshot`], and pass it in together
//! with the evaluation instant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BudgetId, BudgetWatchError, Result};

/// Lifecycle status of a budget as tracked by the budget store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Active,
    Completed,
    Cancelled,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The immutable input to a single risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    /// Planned budget ceiling. Must be strictly positive to be assessed.
    pub allocated_amount: Decimal,
    /// Cumulative spend to date. Negative values (refunds) are accepted.
    pub spent_amount: Decimal,
    /// Start of the budget's active window.
    pub start_date: DateTime<Utc>,
    /// End of the budget's active window. Must be after `start_date`.
    pub end_date: DateTime<Utc>,
}

impl BudgetSnapshot {
    #[must_use]
    pub fn new(
        allocated_amount: Decimal,
        spent_amount: Decimal,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            allocated_amount,
            spent_amount,
            start_date,
            end_date,
        }
    }

    /// Check that every ratio the engine derives from this snapshot is defined.
    ///
    /// # Errors
    /// [`BudgetWatchError::InvalidInput`] when the allocation is not positive or
    /// the window is empty or inverted.
    pub fn validate(&self) -> Result<()> {
        if self.allocated_amount <= Decimal::ZERO {
            return Err(BudgetWatchError::invalid_input(format!(
                "allocated amount must be positive, got {}",
                self.allocated_amount
            )));
        }
        if self.end_date <= self.start_date {
            return Err(BudgetWatchError::invalid_input(format!(
                "end date {} must be after start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Length of the active window in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> i64 {
        (self.end_date - self.start_date).num_milliseconds()
    }

    /// Milliseconds between the window start and `now`. Negative before the start.
    #[must_use]
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_date).num_milliseconds()
    }
}

/// A budget as held by the budget store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: BudgetId,
    pub project_name: String,
    pub department: String,
    pub description: String,
    pub status: BudgetStatus,
    pub allocated_amount: Decimal,
    pub spent_amount: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl BudgetRecord {
    /// The part of the record the engine assesses.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot::new(
            self.allocated_amount,
            self.spent_amount,
            self.start_date,
            self.end_date,
        )
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[cfg(any(test, feature = "test-helpers"))]
impl BudgetSnapshot {
    /// 2024-01-01T00:00:00Z, the start of every dummy window.
    #[must_use]
    pub fn dummy_start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_067_200, 0).expect("valid fixed timestamp")
    }

    /// Snapshot with whole-unit amounts and a window of `window_days` days
    /// starting at [`Self::dummy_start`].
    #[must_use]
    pub fn dummy(allocated: i64, spent: i64, window_days: i64) -> Self {
        let start = Self::dummy_start();
        Self::new(
            Decimal::new(allocated, 0),
            Decimal::new(spent, 0),
            start,
            start + chrono::Duration::days(window_days),
        )
    }

    /// The instant `numerator / denominator` of the way through the window.
    #[must_use]
    pub fn instant_at(&self, numerator: i64, denominator: i64) -> DateTime<Utc> {
        self.start_date + chrono::Duration::milliseconds(self.window_ms() * numerator / denominator)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl BudgetRecord {
    /// Record wrapping `snapshot` with placeholder descriptive fields.
    #[must_use]
    pub fn dummy(project_name: &str, department: &str, snapshot: &BudgetSnapshot) -> Self {
        Self {
            id: BudgetId::new(),
            project_name: project_name.to_string(),
            department: department.to_string(),
            description: format!("{project_name} ({department})"),
            status: BudgetStatus::Active,
            allocated_amount: snapshot.allocated_amount,
            spent_amount: snapshot.spent_amount,
            start_date: snapshot.start_date,
            end_date: snapshot.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_snapshot_passes() {
        assert!(BudgetSnapshot::dummy(1_000, 500, 365).validate().is_ok());
    }

    #[test]
    fn zero_allocation_rejected() {
        let err = BudgetSnapshot::dummy(0, 10, 365).validate().unwrap_err();
        assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
    }

    #[test]
    fn negative_allocation_rejected() {
        let err = BudgetSnapshot::dummy(-5, 0, 365).validate().unwrap_err();
        assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
    }

    #[test]
    fn empty_window_rejected() {
        let err = BudgetSnapshot::dummy(1_000, 0, 0).validate().unwrap_err();
        assert!(matches!(err, BudgetWatchError::InvalidInput { .. }));
    }

    #[test]
    fn inverted_window_rejected() {
        let err = BudgetSnapshot::dummy(1_000, 0, -30).validate().unwrap_err();
        assert!(format!("{err}").contains("must be after start date"));
    }

    #[test]
    fn negative_spend_is_valid() {
        assert!(BudgetSnapshot::dummy(1_000, -200, 30).validate().is_ok());
    }

    #[test]
    fn elapsed_before_start_is_negative() {
        let s = BudgetSnapshot::dummy(1_000, 0, 10);
        let before = s.start_date - chrono::Duration::days(1);
        assert_eq!(s.elapsed_ms(before), -86_400_000);
        assert_eq!(s.window_ms(), 10 * 86_400_000);
    }

    #[test]
    fn instant_at_fraction() {
        let s = BudgetSnapshot::dummy(1_000, 0, 100);
        assert_eq!(s.elapsed_ms(s.instant_at(1, 4)), 25 * 86_400_000);
    }

    #[test]
    fn record_snapshot_copies_money_and_window() {
        let snap = BudgetSnapshot::dummy(10_000, 2_500, 90);
        let record = BudgetRecord::dummy("Road repair", "Transport", &snap);
        assert_eq!(record.snapshot(), snap);
    }

    #[test]
    fn record_serializes_camel_case() {
        let snap = BudgetSnapshot::dummy(10_000, 2_500, 90);
        let record = BudgetRecord::dummy("Clinic", "Health", &snap);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("allocatedAmount").is_some());
        assert!(json.get("projectName").is_some());
        assert_eq!(json["status"], "active");
    }
}
