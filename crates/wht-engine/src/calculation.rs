//! # Withholding Calculators
//!
//! [`WithholdingCalculation`] is the capability every jurisdiction-specific
//! calculator provides. A calculator owns a [`WithholdingContext`] and adds
//! two things to it: a validity predicate and the computation itself.
//!
//! ## Run Result Convention
//!
//! | Return | Meaning |
//! |--------|---------|
//! | `Ok(None)` | Computed; nothing to report. |
//! | `Ok(Some(msg))` | Computed; `msg` is a human-readable summary. |
//! | `Err(e)` | The calculation failed; amounts must not be used. |
//!
//! Callers check [`is_valid`](WithholdingCalculation::is_valid) before
//! [`run`](WithholdingCalculation::run). The runner in [`crate::runner`]
//! does this for you.

use wht_core::WhtError;

use crate::context::WithholdingContext;

/// A withholding calculator for one kind of withholding rule.
pub trait WithholdingCalculation {
    /// The calculation state.
    fn context(&self) -> &WithholdingContext;

    /// Mutable calculation state, for callers populating inputs.
    fn context_mut(&mut self) -> &mut WithholdingContext;

    /// Whether the current document and inputs are eligible for this
    /// withholding. Must not mutate state.
    fn is_valid(&self) -> bool;

    /// Compute the withholding, recording amounts, return values, and log
    /// lines on the context.
    fn run(&mut self) -> Result<Option<String>, WhtError>;
}
