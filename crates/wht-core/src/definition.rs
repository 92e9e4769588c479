//! # Withholding Definition
//!
//! The tax a setting withholds: its rate, the minimum base below which
//! nothing is withheld, and the statutory reference printed on
//! certificates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identity::DefinitionId;

/// A withholding tax definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithholdingDefinition {
    /// Unique definition identifier.
    #[serde(default)]
    pub id: DefinitionId,
    /// Human-readable name.
    pub name: String,
    /// Rate as a percentage of the base (`4.5` means 4.5%).
    pub rate_percent: Decimal,
    /// Bases strictly below this amount are not withheld.
    #[serde(default)]
    pub minimum_base: Decimal,
    /// Statutory section reference.
    #[serde(default)]
    pub statutory_section: Option<String>,
}

impl WithholdingDefinition {
    /// Create a definition with no minimum base.
    pub fn new(name: impl Into<String>, rate_percent: Decimal) -> Self {
        Self {
            id: DefinitionId::new(),
            name: name.into(),
            rate_percent,
            minimum_base: Decimal::ZERO,
            statutory_section: None,
        }
    }

    /// Builder: set the minimum base.
    pub fn with_minimum_base(mut self, minimum_base: Decimal) -> Self {
        self.minimum_base = minimum_base;
        self
    }

    /// Builder: set the statutory section.
    pub fn with_statutory_section(mut self, section: impl Into<String>) -> Self {
        self.statutory_section = Some(section.into());
        self
    }

    /// Whether `base` reaches the minimum base (inclusive).
    pub fn reaches_minimum(&self, base: Decimal) -> bool {
        base >= self.minimum_base
    }
}
