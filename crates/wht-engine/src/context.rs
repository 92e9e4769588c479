//! # Withholding Calculation Context
//!
//! Per-run state of one withholding calculation: the collaborators it is
//! evaluated against, the caller's parameters, the calculator's return
//! values, the two running amounts, and the log and description buffers.
//!
//! ## Lifecycle
//!
//! ```text
//! new(setting) ──▶ caller sets parameters, document, transaction name
//!                      │
//!                      ▼
//!              calculator is_valid() / run()
//!                      │
//!                      ▼
//!              caller reads amounts, logs, return values
//! ```
//!
//! One context per document per run. Nothing here is shared between
//! contexts except the `Arc`'d collaborators, which are read-only.
//!
//! ## Typed Lookups
//!
//! [`WithholdingContext::parameter_as_int`] and
//! [`WithholdingContext::parameter_as_decimal`] return zero when the key is
//! missing or holds another variant. A mistyped parameter is treated as
//! absent, never as an error.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use wht_core::{
    DocumentAction, ExecutionContext, ParameterValue, WhtError, WithholdingDefinition,
    WithholdingSetting,
};

const ENTRY_SEPARATOR: char = '\n';

/// Mutable state of a single withholding calculation.
#[derive(Debug, Clone)]
pub struct WithholdingContext {
    setting: Arc<WithholdingSetting>,
    ctx: ExecutionContext,
    definition: Option<Arc<WithholdingDefinition>>,
    parameters: HashMap<String, ParameterValue>,
    return_values: HashMap<String, ParameterValue>,
    transaction_name: Option<String>,
    process_log: String,
    process_description: String,
    base_amount: Decimal,
    withholding_amount: Decimal,
    document: Option<Arc<dyn DocumentAction>>,
}

impl WithholdingContext {
    /// Create a context for `setting`, inheriting its execution environment.
    ///
    /// Both amounts start at zero; every other field starts empty.
    pub fn new(setting: Arc<WithholdingSetting>) -> Self {
        let ctx = setting.ctx().clone();
        tracing::trace!(setting = %setting.id, handler = %setting.handler, "withholding context created");
        Self {
            setting,
            ctx,
            definition: None,
            parameters: HashMap::new(),
            return_values: HashMap::new(),
            transaction_name: None,
            process_log: String::new(),
            process_description: String::new(),
            base_amount: Decimal::ZERO,
            withholding_amount: Decimal::ZERO,
            document: None,
        }
    }

    // ── Environment and collaborators ───────────────────────────────

    /// Execution environment, copied from the setting at construction.
    pub fn ctx(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// The setting this context was built from.
    pub fn setting(&self) -> &Arc<WithholdingSetting> {
        &self.setting
    }

    /// Set the withholding definition.
    pub fn set_definition(&mut self, definition: Arc<WithholdingDefinition>) {
        self.definition = Some(definition);
    }

    /// The withholding definition, if set.
    pub fn definition(&self) -> Option<&Arc<WithholdingDefinition>> {
        self.definition.as_ref()
    }

    /// Set the document under evaluation.
    pub fn set_document(&mut self, document: Arc<dyn DocumentAction>) {
        self.document = Some(document);
    }

    /// The document under evaluation, if set.
    pub fn document(&self) -> Option<&Arc<dyn DocumentAction>> {
        self.document.as_ref()
    }

    /// Tag the unit of work this calculation participates in.
    pub fn set_transaction_name(&mut self, transaction_name: impl Into<String>) {
        self.transaction_name = Some(transaction_name.into());
    }

    /// The enclosing unit-of-work tag, if set.
    pub fn transaction_name(&self) -> Option<&str> {
        self.transaction_name.as_deref()
    }

    // ── Parameters ──────────────────────────────────────────────────

    /// Insert or overwrite one parameter.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Merge `parameters` into the current set, overwriting on key collision.
    ///
    /// Existing keys not present in `parameters` are kept.
    pub fn set_parameters<I, K>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: Into<String>,
    {
        for (key, value) in parameters {
            self.parameters.insert(key.into(), value);
        }
    }

    /// Raw parameter lookup.
    pub fn parameter(&self, key: &str) -> Option<&ParameterValue> {
        self.parameters.get(key)
    }

    /// Integer parameter, or `0` when missing or not an `Integer`.
    pub fn parameter_as_int(&self, key: &str) -> i64 {
        self.parameter(key)
            .and_then(ParameterValue::as_integer)
            .unwrap_or(0)
    }

    /// Decimal parameter, or zero when missing or not a `Decimal`.
    pub fn parameter_as_decimal(&self, key: &str) -> Decimal {
        self.parameter(key)
            .and_then(ParameterValue::as_decimal)
            .unwrap_or(Decimal::ZERO)
    }

    /// All parameters.
    pub fn parameters(&self) -> &HashMap<String, ParameterValue> {
        &self.parameters
    }

    // ── Return values ───────────────────────────────────────────────

    /// Insert or overwrite one return value.
    pub fn set_return_value(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        self.return_values.insert(key.into(), value.into());
    }

    /// Raw return-value lookup.
    pub fn return_value(&self, key: &str) -> Option<&ParameterValue> {
        self.return_values.get(key)
    }

    /// All return values, borrowed read-only.
    ///
    /// Writes go through [`set_return_value`](Self::set_return_value).
    pub fn return_values(&self) -> &HashMap<String, ParameterValue> {
        &self.return_values
    }

    // ── Amounts ─────────────────────────────────────────────────────

    /// Amount the withholding is computed on.
    pub fn base_amount(&self) -> Decimal {
        self.base_amount
    }

    /// Replace the base amount.
    pub fn set_base_amount(&mut self, base_amount: Decimal) {
        self.base_amount = base_amount;
    }

    /// Add to the base amount.
    ///
    /// Fails without changing the amount when the sum leaves the 96-bit
    /// range of `Decimal`.
    pub fn add_base_amount(&mut self, base_amount: Decimal) -> Result<(), WhtError> {
        self.base_amount = checked_sum(self.base_amount, base_amount, "base amount")?;
        Ok(())
    }

    /// Computed withholding amount.
    pub fn withholding_amount(&self) -> Decimal {
        self.withholding_amount
    }

    /// Replace the withholding amount.
    pub fn set_withholding_amount(&mut self, withholding_amount: Decimal) {
        self.withholding_amount = withholding_amount;
    }

    /// Add to the withholding amount. Overflow fails as in
    /// [`add_base_amount`](Self::add_base_amount).
    pub fn add_withholding_amount(&mut self, withholding_amount: Decimal) -> Result<(), WhtError> {
        self.withholding_amount =
            checked_sum(self.withholding_amount, withholding_amount, "withholding amount")?;
        Ok(())
    }

    // ── Log and description ─────────────────────────────────────────

    /// Append a line to the process log.
    pub fn add_log(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::debug!(setting = %self.setting.id, entry = %message, "withholding log");
        append_entry(&mut self.process_log, message);
    }

    /// The process log, or `None` if nothing was logged.
    pub fn process_log(&self) -> Option<&str> {
        non_empty(&self.process_log)
    }

    /// Append a line to the document description.
    pub fn add_description(&mut self, description: impl AsRef<str>) {
        append_entry(&mut self.process_description, description.as_ref());
    }

    /// The accumulated description, or `None` if nothing was added.
    pub fn process_description(&self) -> Option<&str> {
        non_empty(&self.process_description)
    }
}

fn checked_sum(current: Decimal, addend: Decimal, what: &str) -> Result<Decimal, WhtError> {
    current.checked_add(addend).ok_or_else(|| {
        WhtError::Calculation(format!("{what} overflows: {current} + {addend}"))
    })
}

fn append_entry(buffer: &mut String, entry: &str) {
    if !buffer.is_empty() {
        buffer.push(ENTRY_SEPARATOR);
    }
    buffer.push_str(entry);
}

fn non_empty(buffer: &str) -> Option<&str> {
    if buffer.is_empty() {
        None
    } else {
        Some(buffer)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
