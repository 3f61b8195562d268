//! # budgetwatch-engine
//!
//! **Pure deterministic risk engine for BudgetWatch.**
//!
//! Given a budget snapshot and an evaluation instant, the engine produces a
//! bounded risk score, human-readable flags, and the spending metrics behind
//! them. It has:
//!
//! - **Zero side effects**: no I/O, no clock reads, no stored state
//! - **Deterministic output**: same input -> same assessment -> same digest
//! - **Fail-closed input checks**: zero allocations and inverted windows are
//!   rejected, never scored as `NaN`
//!
//! ## Modules
//!
//! 1. **metrics**: expected spending, variance, utilization, deviation, rapid spending
//! 2. **anomaly**: ordered detection rules with severities
//! 3. **scoring**: severity weights + standalone bonuses, clamped to 100
//! 4. **engine**: [`RiskEngine`], the entry point
//! 5. **digest**: SHA-256 fingerprint of an assessment
//! 6. **report**: listing / single-budget report shapes for the reporting layer

pub mod anomaly;
pub mod digest;
pub mod engine;
pub mod metrics;
pub mod report;
pub mod scoring;

pub use anomaly::detect_anomalies;
pub use digest::{compute_assessment_digest, verify_assessment_digest};
pub use engine::RiskEngine;
pub use metrics::SpendingMetrics;
pub use report::{BandSummary, FraudAnalysis, FraudReport, PortfolioReport, RejectedBudget};
pub use scoring::{aggregate_score, render_flags};
