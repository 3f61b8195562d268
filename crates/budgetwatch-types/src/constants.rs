//! System-wide constants for the BudgetWatch risk engine.
//!
//! Ratio thresholds are `(mantissa, scale)` pairs, turned into exact
//! [`Decimal`](rust_decimal::Decimal) values with `Decimal::new` by
//! [`crate::config::ratio`].

// ---------------------------------------------------------------------------
// Classification bands
// ---------------------------------------------------------------------------

/// Scores at or above this value are classified as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 70;

/// Scores at or above this value (and below [`HIGH_RISK_THRESHOLD`]) are
/// classified as medium risk.
pub const MEDIUM_RISK_THRESHOLD: u8 = 50;

/// Upper clamp for every risk score.
pub const MAX_RISK_SCORE: u8 = 100;

// ---------------------------------------------------------------------------
// Anomaly thresholds
// ---------------------------------------------------------------------------

/// Spending variance above this ratio raises a high-severity anomaly (0.30).
pub const SPENDING_VARIANCE_THRESHOLD: (i64, u32) = (30, 2);

/// Utilization above this ratio counts as "mostly spent" for rapid spending (0.80).
pub const RAPID_SPENDING_UTILIZATION: (i64, u32) = (80, 2);

/// Rapid spending only applies while the elapsed window fraction is strictly
/// below this value (0.25).
pub const RAPID_SPENDING_WINDOW_FRACTION: (i64, u32) = (25, 2);

/// Allocation deviation above this ratio raises a medium-severity anomaly (0.20).
pub const ALLOCATION_DEVIATION_THRESHOLD: (i64, u32) = (20, 2);

/// Utilization above this ratio earns the utilization bonus (0.80).
pub const UTILIZATION_BONUS_THRESHOLD: (i64, u32) = (80, 2);

// ---------------------------------------------------------------------------
// Score weights
// ---------------------------------------------------------------------------

/// Points per high-severity anomaly.
pub const HIGH_SEVERITY_WEIGHT: u32 = 30;

/// Points per medium-severity anomaly.
pub const MEDIUM_SEVERITY_WEIGHT: u32 = 20;

/// Points per low-severity anomaly.
pub const LOW_SEVERITY_WEIGHT: u32 = 10;

/// Standalone bonus when spending variance exceeds its threshold.
///
/// This re-checks the condition behind the `spending_variance` anomaly, so a
/// high variance contributes twice. Set to zero to stop the double count.
pub const SPENDING_VARIANCE_BONUS: u32 = 20;

/// Standalone bonus when utilization exceeds [`UTILIZATION_BONUS_THRESHOLD`].
pub const UTILIZATION_BONUS: u32 = 15;

/// Standalone bonus when allocation deviation exceeds its threshold.
///
/// Same double count as [`SPENDING_VARIANCE_BONUS`], for `allocation_deviation`.
pub const ALLOCATION_DEVIATION_BONUS: u32 = 15;

// ---------------------------------------------------------------------------
// Historical comparison placeholder
// ---------------------------------------------------------------------------

/// Previous-year figure as a fraction of the current allocation (0.9).
pub const HISTORICAL_PREVIOUS_YEAR_RATIO: (i64, u32) = (9, 1);

/// Fixed variance reported by the historical placeholder (0.1).
pub const HISTORICAL_VARIANCE: (i64, u32) = (1, 1);

// ---------------------------------------------------------------------------
// Flag rendering
// ---------------------------------------------------------------------------

/// Prefix for flags raised by high-severity anomalies.
pub const HIGH_RISK_FLAG_PREFIX: &str = "High Risk: ";

/// Prefix for flags raised by medium-severity anomalies.
pub const MEDIUM_RISK_FLAG_PREFIX: &str = "Medium Risk: ";

