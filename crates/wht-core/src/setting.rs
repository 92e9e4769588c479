//! # Withholding Setting
//!
//! A setting binds one withholding handler to the environment it runs in.
//! It is created by configuration, shared read-only by every calculation
//! context built from it, and never mutated by a calculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::environment::ExecutionContext;
use crate::identity::SettingId;
use crate::value::ParameterValue;

/// Configuration for one withholding handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingSetting {
    /// Unique setting identifier.
    #[serde(default)]
    pub id: SettingId,
    /// Human-readable name.
    pub name: String,
    /// Registry name of the calculator that implements this setting.
    pub handler: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Inactive settings are skipped when a definition is processed.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Execution environment handed to every context built from this setting.
    #[serde(default)]
    pub context: ExecutionContext,
    /// Parameters seeded into each new context before the caller's own.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
}

fn default_active() -> bool {
    true
}

impl WithholdingSetting {
    /// Create an active setting with an empty environment.
    pub fn new(name: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            id: SettingId::new(),
            name: name.into(),
            handler: handler.into(),
            description: None,
            is_active: true,
            context: ExecutionContext::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Builder: set the execution environment.
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Builder: add a default parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Builder: mark the setting inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The execution environment of this setting.
    pub fn ctx(&self) -> &ExecutionContext {
        &self.context
    }
}
