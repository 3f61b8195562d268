//! Configuration for the risk engine.
//!
//! Every threshold and weight is an immutable value inside [`RiskConfig`].
//! The engine owns one by value; there is no global mutable state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BudgetWatchError, Result, RiskBand, Severity, constants};

/// Build a ratio from a `(mantissa, scale)` constant.
#[must_use]
pub fn ratio((mantissa, scale): (i64, u32)) -> Decimal {
    Decimal::new(mantissa, scale)
}

/// Thresholds that drive anomaly detection and bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// `spending_variance` strictly above this raises a high anomaly and the variance bonus.
    pub spending_variance: Decimal,
    /// Utilization strictly above this is required for rapid spending.
    pub rapid_spending_utilization: Decimal,
    /// Elapsed fraction strictly below this is required for rapid spending.
    pub rapid_spending_window_fraction: Decimal,
    /// `allocation_deviation` strictly above this raises a medium anomaly and the deviation bonus.
    pub allocation_deviation: Decimal,
    /// Utilization strictly above this earns the utilization bonus.
    pub utilization_bonus: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            spending_variance: ratio(constants::SPENDING_VARIANCE_THRESHOLD),
            rapid_spending_utilization: ratio(constants::RAPID_SPENDING_UTILIZATION),
            rapid_spending_window_fraction: ratio(constants::RAPID_SPENDING_WINDOW_FRACTION),
            allocation_deviation: ratio(constants::ALLOCATION_DEVIATION_THRESHOLD),
            utilization_bonus: ratio(constants::UTILIZATION_BONUS_THRESHOLD),
        }
    }
}

/// Points added per anomaly, by severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityWeights {
    #[must_use]
    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            high: constants::HIGH_SEVERITY_WEIGHT,
            medium: constants::MEDIUM_SEVERITY_WEIGHT,
            low: constants::LOW_SEVERITY_WEIGHT,
        }
    }
}

/// Standalone points added on top of the anomaly weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBonuses {
    pub spending_variance: u32,
    pub utilization: u32,
    pub allocation_deviation: u32,
}

impl Default for ScoreBonuses {
    fn default() -> Self {
        Self {
            spending_variance: constants::SPENDING_VARIANCE_BONUS,
            utilization: constants::UTILIZATION_BONUS,
            allocation_deviation: constants::ALLOCATION_DEVIATION_BONUS,
        }
    }
}

/// Parameters of the historical-comparison placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalPlaceholder {
    /// `previous_year = allocated * previous_year_ratio`.
    pub previous_year_ratio: Decimal,
    pub variance: Decimal,
}

impl Default for HistoricalPlaceholder {
    fn default() -> Self {
        Self {
            previous_year_ratio: ratio(constants::HISTORICAL_PREVIOUS_YEAR_RATIO),
            variance: ratio(constants::HISTORICAL_VARIANCE),
        }
    }
}

/// Score thresholds for the classification bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            high: constants::HIGH_RISK_THRESHOLD,
            medium: constants::MEDIUM_RISK_THRESHOLD,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub thresholds: RiskThresholds,
    pub weights: SeverityWeights,
    pub bonuses: ScoreBonuses,
    pub historical: HistoricalPlaceholder,
    pub bands: BandThresholds,
}

impl RiskConfig {
    /// Parse a JSON config document and validate it. Missing fields take
    /// their default values.
    ///
    /// # Errors
    /// [`BudgetWatchError::Serialization`] for malformed JSON,
    /// [`BudgetWatchError::Configuration`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations under which scoring would be meaningless.
    ///
    /// # Errors
    /// [`BudgetWatchError::Configuration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("thresholds.spending_variance", t.spending_variance),
            ("thresholds.rapid_spending_utilization", t.rapid_spending_utilization),
            ("thresholds.allocation_deviation", t.allocation_deviation),
            ("thresholds.utilization_bonus", t.utilization_bonus),
            ("historical.previous_year_ratio", self.historical.previous_year_ratio),
        ] {
            if value.is_sign_negative() {
                return Err(BudgetWatchError::Configuration(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if t.rapid_spending_window_fraction <= Decimal::ZERO
            || t.rapid_spending_window_fraction > Decimal::ONE
        {
            return Err(BudgetWatchError::Configuration(format!(
                "thresholds.rapid_spending_window_fraction must be in (0, 1], got {}",
                t.rapid_spending_window_fraction
            )));
        }

        let b = &self.bands;
        if b.medium >= b.high || b.high > constants::MAX_RISK_SCORE {
            return Err(BudgetWatchError::Configuration(format!(
                "band thresholds must satisfy medium < high <= {}, got medium={} high={}",
                constants::MAX_RISK_SCORE,
                b.medium,
                b.high
            )));
        }

        Ok(())
    }

    /// Classify a score using this configuration's band thresholds.
    #[must_use]
    pub fn band(&self, score: u8) -> RiskBand {
        RiskBand::classify(score, self.bands.high, self.bands.medium)
    }
}
