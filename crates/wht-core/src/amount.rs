//! # Monetary Amounts
//!
//! Parsing and rounding helpers for exact decimal amounts. Withholding is
//! computed on money, so every amount is a [`Decimal`]; floats are never
//! accepted on a parse path.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::WhtError;

/// Currency precision used when a document does not state its own.
pub const DEFAULT_PRECISION: u32 = 2;

/// Parse a decimal amount from its string form.
///
/// Leading and trailing whitespace is ignored. Empty input and anything
/// `Decimal` cannot represent exactly are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, WhtError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(WhtError::InvalidAmount {
            value: s.to_string(),
            reason: "empty amount".to_string(),
        });
    }
    Decimal::from_str(trimmed).map_err(|e| WhtError::InvalidAmount {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

/// Round an amount to exactly `scale` decimal places, half away from zero.
///
/// This matches the half-up rounding used for currency amounts on posted
/// documents: `0.125` becomes `0.13` and `-0.125` becomes `-0.13`. Shorter
/// inputs are padded, so `2.5` at scale 2 prints as `2.50`.
pub fn round_amount(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}
