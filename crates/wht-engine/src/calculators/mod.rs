//! Built-in calculators.

pub mod rate;

pub use rate::RateWithholding;
