//! # budgetwatch-types
//!
//! Shared types, errors, and configuration for the **BudgetWatch** risk engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`BudgetId`]
//! - **Budget model**: [`BudgetRecord`], [`BudgetSnapshot`], [`BudgetStatus`]
//! - **Risk model**: [`Anomaly`], [`AnomalyKind`], [`Severity`], [`RiskAssessment`],
//!   [`HistoricalComparison`], [`RiskBand`]
//! - **Configuration**: [`RiskConfig`] and its threshold/weight sections
//! - **Errors**: [`BudgetWatchError`] with `BW_ERR_` prefix codes
//! - **Constants**: default thresholds, weights, and band boundaries

pub mod budget;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod risk;

pub use budget::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use risk::*;

// Constants are accessed via `budgetwatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
