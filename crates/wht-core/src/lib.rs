//! # wht-core: Foundational Types for Withholding Calculation
//!
//! Leaf crate of the workspace. It defines the value types that every
//! withholding calculator shares, and the collaborators a calculation is
//! evaluated against. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Exact amounts.** Every monetary quantity is a `rust_decimal::Decimal`.
//!    No `f64` crosses a public boundary.
//!
//! 2. **Typed parameter bag.** Calculation inputs and outputs are
//!    [`ParameterValue`]s, a closed sum type. Typed lookups are pattern
//!    matches with a documented zero fallback.
//!
//! 3. **Newtype identifiers.** `SettingId`, `DefinitionId`, `DocumentId`
//!    cannot be confused with one another.
//!
//! 4. **Collaborators are plain data.** Settings and definitions are
//!    serde-loadable structs; documents sit behind the [`DocumentAction`]
//!    trait so the host system can supply its own.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wht-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod amount;
pub mod config;
pub mod definition;
pub mod document;
pub mod environment;
pub mod error;
pub mod identity;
pub mod setting;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use amount::{parse_amount, round_amount, DEFAULT_PRECISION};
pub use config::WithholdingConfig;
pub use definition::WithholdingDefinition;
pub use document::{DocStatus, DocumentAction, FinancialDocument};
pub use environment::ExecutionContext;
pub use error::WhtError;
pub use identity::{DefinitionId, DocumentId, SettingId};
pub use setting::WithholdingSetting;
pub use value::ParameterValue;

/// Re-exported so downstream crates and calculators agree on one decimal type.
pub use rust_decimal::Decimal;
