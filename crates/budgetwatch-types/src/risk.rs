//! Risk assessment types.
//!
//! An assessment is a single-shot value: the engine builds it from a
//! [`BudgetSnapshot`](crate::BudgetSnapshot) and the evaluation instant, and
//! nothing mutates it afterwards.
//!
//! ```text
//! BudgetSnapshot + now
//!   → derived metrics (variance, utilization, deviation, rapid spending)
//!   → anomalies (ordered, independent checks)
//!   → score (severity weights + standalone bonuses, clamped to 100)
//!   → flags (high/medium anomalies only, detection order)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Severity tier of an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Flag prefix for this severity. `Low` anomalies never surface as flags.
    #[must_use]
    pub fn flag_prefix(self) -> Option<&'static str> {
        match self {
            Self::High => Some(constants::HIGH_RISK_FLAG_PREFIX),
            Self::Medium => Some(constants::MEDIUM_RISK_FLAG_PREFIX),
            Self::Low => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Which detection rule produced an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    SpendingVariance,
    RapidSpending,
    AllocationDeviation,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpendingVariance => write!(f, "spending_variance"),
            Self::RapidSpending => write!(f, "rapid_spending"),
            Self::AllocationDeviation => write!(f, "allocation_deviation"),
        }
    }
}

/// A single detected deviation pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub severity: Severity,
    /// Human-readable description, including the triggering magnitude.
    pub message: String,
}

impl Anomaly {
    /// The flag string for this anomaly, if its severity is surfaced.
    #[must_use]
    pub fn flag(&self) -> Option<String> {
        self.severity
            .flag_prefix()
            .map(|prefix| format!("{prefix}{}", self.message))
    }
}

/// Prior-year comparison attached to every assessment.
///
/// Currently a fixed-shape placeholder derived from the allocation alone;
/// no prior-year data is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalComparison {
    pub previous_year: Decimal,
    pub current_year: Decimal,
    pub variance: Decimal,
}

/// Classification band of a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Classify a score with the default band thresholds.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        Self::classify(
            score,
            constants::HIGH_RISK_THRESHOLD,
            constants::MEDIUM_RISK_THRESHOLD,
        )
    }

    /// Classify a score against explicit thresholds (`high` inclusive, `medium` inclusive).
    #[must_use]
    pub fn classify(score: u8, high: u8, medium: u8) -> Self {
        if score >= high {
            Self::High
        } else if score >= medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// The output of one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Aggregate score in `[0, 100]`.
    pub score: u8,
    /// `"High Risk: …"` / `"Medium Risk: …"` strings in detection order.
    pub flags: Vec<String>,
    /// `|spent - expected| / allocated`.
    pub spending_variance: Decimal,
    /// `spent / allocated`. A utilization ratio despite the name.
    pub transaction_frequency: Decimal,
    /// `|spent - allocated| / allocated`.
    pub allocation_deviation: Decimal,
    pub historical_comparison: HistoricalComparison,
    /// Every anomaly detected, including low-severity ones that raise no flag.
    pub anomalies: Vec<Anomaly>,
}

impl RiskAssessment {
    /// Band of this assessment under the default thresholds.
    #[must_use]
    pub fn band(&self) -> RiskBand {
        RiskBand::from_score(self.score)
    }

    /// Whether an anomaly of `kind` was detected.
    #[must_use]
    pub fn has_anomaly(&self, kind: AnomalyKind) -> bool {
        self.anomalies.iter().any(|a| a.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anomaly(severity: Severity) -> Anomaly {
        Anomaly {
            kind: AnomalyKind::SpendingVariance,
            severity,
            message: "Unusual spending variance detected (42.0%)".to_string(),
        }
    }

    #[test]
    fn high_and_medium_anomalies_raise_prefixed_flags() {
        assert_eq!(
            anomaly(Severity::High).flag().unwrap(),
            "High Risk: Unusual spending variance detected (42.0%)"
        );
        assert_eq!(
            anomaly(Severity::Medium).flag().unwrap(),
            "Medium Risk: Unusual spending variance detected (42.0%)"
        );
    }

    #[test]
    fn low_anomalies_raise_no_flag() {
        assert!(anomaly(Severity::Low).flag().is_none());
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(49), RiskBand::Low);
        assert_eq!(RiskBand::from_score(50), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(69), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(70), RiskBand::High);
        assert_eq!(RiskBand::from_score(100), RiskBand::High);
    }

    #[test]
    fn anomaly_kind_wire_names() {
        let json = serde_json::to_string(&AnomalyKind::AllocationDeviation).unwrap();
        assert_eq!(json, "\"allocation_deviation\"");
        assert_eq!(AnomalyKind::RapidSpending.to_string(), "rapid_spending");
    }

    #[test]
    fn assessment_serializes_camel_case() {
        let assessment = RiskAssessment {
            score: 35,
            flags: vec![],
            spending_variance: Decimal::ZERO,
            transaction_frequency: Decimal::ZERO,
            allocation_deviation: Decimal::ONE,
            historical_comparison: HistoricalComparison {
                previous_year: Decimal::new(180_000, 0),
                current_year: Decimal::new(200_000, 0),
                variance: Decimal::new(1, 1),
            },
            anomalies: vec![],
        };
        let json = serde_json::to_value(&assessment).unwrap();
        assert!(json.get("spendingVariance").is_some());
        assert!(json["historicalComparison"].get("previousYear").is_some());
        assert_eq!(assessment.band(), RiskBand::Low);
    }
}
