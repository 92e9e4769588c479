//! # wht-engine: Withholding Calculation Engine
//!
//! Runs withholding calculators against financial documents.
//!
//! ## Architecture
//!
//! - **Context** (`context.rs`): [`WithholdingContext`], the per-run state
//!   every calculator carries (amounts, parameters, return values, logs).
//!
//! - **Calculation** (`calculation.rs`): the [`WithholdingCalculation`]
//!   trait with its two extension points, `is_valid` and `run`.
//!
//! - **Registry** (`registry.rs`): handler name → calculator constructor.
//!
//! - **Runner** (`runner.rs`): eligibility check, run, and an owned
//!   [`WithholdingOutcome`] snapshot per setting.
//!
//! - **Calculators** (`calculators/`): built-in calculators, currently the
//!   flat-rate [`RateWithholding`].
//!
//! ## Crate Policy
//!
//! - Depends on `wht-core` internally.
//! - Synchronous. One context per document per run; contexts are not shared.

pub mod calculation;
pub mod calculators;
pub mod context;
pub mod registry;
pub mod runner;

pub use calculation::WithholdingCalculation;
pub use calculators::RateWithholding;
pub use context::WithholdingContext;
pub use registry::{CalculatorFactory, CalculatorRegistry};
pub use runner::{execute, execute_all, total_withholding, OutcomeStatus, WithholdingOutcome};
