//! Report shapes handed to the reporting layer and to persistence.
//!
//! The engine does not serialize or store anything itself. These types give
//! callers the flat, camelCase shape that budget listings and single-budget
//! analyses are returned in, and the sub-document a caller may persist next
//! to the budget record.

use budgetwatch_types::{
    BudgetId, BudgetRecord, BudgetStatus, HistoricalComparison, RiskAssessment, RiskBand,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::digest::compute_assessment_digest;

/// One assessed budget, with the identifying fields the caller attaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudReport {
    pub budget_id: BudgetId,
    pub project_name: String,
    pub department: String,
    pub allocated_amount: Decimal,
    pub spent_amount: Decimal,
    pub risk_score: u8,
    pub risk_band: RiskBand,
    pub fraud_flags: Vec<String>,
    pub spending_variance: Decimal,
    pub transaction_frequency: Decimal,
    pub allocation_deviation: Decimal,
    pub historical_comparison: HistoricalComparison,
    /// The evaluation instant passed to the engine.
    pub last_analysis_date: DateTime<Utc>,
    pub status: BudgetStatus,
    /// Hex SHA-256 of the underlying assessment.
    pub digest: String,
}

impl FraudReport {
    #[must_use]
    pub fn build(
        record: &BudgetRecord,
        assessment: &RiskAssessment,
        band: RiskBand,
        analysed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            budget_id: record.id,
            project_name: record.project_name.clone(),
            department: record.department.clone(),
            allocated_amount: record.allocated_amount,
            spent_amount: record.spent_amount,
            risk_score: assessment.score,
            risk_band: band,
            fraud_flags: assessment.flags.clone(),
            spending_variance: assessment.spending_variance,
            transaction_frequency: assessment.transaction_frequency,
            allocation_deviation: assessment.allocation_deviation,
            historical_comparison: assessment.historical_comparison.clone(),
            last_analysis_date: analysed_at,
            status: record.status,
            digest: hex::encode(compute_assessment_digest(assessment)),
        }
    }

    /// The analysis sub-document a caller may store on the budget record.
    #[must_use]
    pub fn to_analysis(&self) -> FraudAnalysis {
        FraudAnalysis {
            risk_score: self.risk_score,
            fraud_flags: self.fraud_flags.clone(),
            last_analysis_date: self.last_analysis_date,
            spending_variance: self.spending_variance,
            transaction_frequency: self.transaction_frequency,
            allocation_deviation: self.allocation_deviation,
            historical_comparison: self.historical_comparison.clone(),
            digest: self.digest.clone(),
        }
    }
}

/// Persisted form of the most recent assessment of a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysis {
    pub risk_score: u8,
    pub fraud_flags: Vec<String>,
    pub last_analysis_date: DateTime<Utc>,
    pub spending_variance: Decimal,
    pub transaction_frequency: Decimal,
    pub allocation_deviation: Decimal,
    pub historical_comparison: HistoricalComparison,
    pub digest: String,
}

impl FraudAnalysis {
    /// Whether a fresh assessment differs from this stored one.
    #[must_use]
    pub fn is_stale(&self, fresh: &RiskAssessment) -> bool {
        self.digest != hex::encode(compute_assessment_digest(fresh))
    }
}

/// A budget the engine refused to assess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedBudget {
    pub budget_id: BudgetId,
    pub reason: String,
}

/// Result of assessing a list of budgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub reports: Vec<FraudReport>,
    pub rejected: Vec<RejectedBudget>,
}

/// Count of assessed budgets per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PortfolioReport {
    #[must_use]
    pub fn summary(&self) -> BandSummary {
        let mut summary = BandSummary::default();
        for report in &self.reports {
            match report.risk_band {
                RiskBand::High => summary.high += 1,
                RiskBand::Medium => summary.medium += 1,
                RiskBand::Low => summary.low += 1,
            }
        }
        summary
    }

    /// Reports in the given band, in listing order.
    pub fn in_band(&self, band: RiskBand) -> impl Iterator<Item = &FraudReport> {
        self.reports.iter().filter(move |r| r.risk_band == band)
    }
}
