//! # Configuration Files
//!
//! A withholding configuration is one definition and the settings that
//! withhold it, loaded from YAML:
//!
//! ```yaml
//! definition:
//!   name: WHT on goods
//!   rate_percent: "4.5"
//!   minimum_base: "75000"
//!   statutory_section: ITO 2001 Section 153(1)(a)
//! settings:
//!   - name: Goods, filer
//!     handler: rate
//!     context:
//!       client_id: "11"
//! ```
//!
//! Loading validates the file before anything runs against it.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::definition::WithholdingDefinition;
use crate::error::WhtError;
use crate::setting::WithholdingSetting;

/// A definition together with its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingConfig {
    /// The tax being withheld.
    pub definition: WithholdingDefinition,
    /// Handlers that compute it.
    #[serde(default)]
    pub settings: Vec<WithholdingSetting>,
}

impl WithholdingConfig {
    /// Parse and validate a configuration from YAML.
    pub fn from_yaml_str(s: &str) -> Result<Self, WhtError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WhtError> {
        let config: Self = read_yaml(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Check the rate range, setting names, handlers, and identifier uniqueness.
    pub fn validate(&self) -> Result<(), WhtError> {
        let rate = self.definition.rate_percent;
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(WhtError::Config(format!(
                "definition {:?}: rate_percent {rate} outside 0..=100",
                self.definition.name
            )));
        }
        if self.definition.minimum_base < Decimal::ZERO {
            return Err(WhtError::Config(format!(
                "definition {:?}: negative minimum_base",
                self.definition.name
            )));
        }

        let mut seen = HashSet::new();
        for setting in &self.settings {
            if setting.name.trim().is_empty() {
                return Err(WhtError::Config(format!(
                    "setting {} has an empty name",
                    setting.id
                )));
            }
            if setting.handler.trim().is_empty() {
                return Err(WhtError::Config(format!(
                    "setting {:?} names no handler",
                    setting.name
                )));
            }
            if !seen.insert(setting.id) {
                return Err(WhtError::Config(format!(
                    "duplicate setting id {}",
                    setting.id
                )));
            }
        }
        Ok(())
    }

    /// Settings that should run, in file order.
    pub fn active_settings(&self) -> impl Iterator<Item = &WithholdingSetting> {
        self.settings.iter().filter(|s| s.is_active)
    }
}

/// Read a YAML file into `T`.
pub(crate) fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, WhtError> {
    let text = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&text).map_err(|e| {
        WhtError::Serialization(format!("{}: {e}", path.display()))
    })
}
