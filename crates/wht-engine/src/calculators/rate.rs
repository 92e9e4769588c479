//! # Flat-Rate Withholding
//!
//! Withholds a fixed percentage of a document's amount once that amount
//! reaches the definition's minimum base. This is the shape of most
//! withholding-at-source rules; jurisdictions with brackets, cumulative
//! thresholds, or exemption certificates register their own calculators.
//!
//! ## Parameters
//!
//! | Key | Type | Effect |
//! |-----|------|--------|
//! | `exempt` | boolean | `true` makes the document ineligible. |
//! | `base_amount` | decimal or integer | Positive value replaces the document amount as base. |
//! | `rate_override` | decimal or integer | Positive value replaces the definition rate. |
//!
//! ## Return Values
//!
//! `rate_percent` (decimal), `net_amount` (decimal), and
//! `statutory_section` (text, when the definition has one).

use std::sync::Arc;

use rust_decimal::Decimal;

use wht_core::{round_amount, DocStatus, DocumentAction, WhtError, WithholdingSetting};

use crate::calculation::WithholdingCalculation;
use crate::context::WithholdingContext;

/// Parameter: exempt the document.
pub const PARAM_EXEMPT: &str = "exempt";
/// Parameter: base amount override.
pub const PARAM_BASE_AMOUNT: &str = "base_amount";
/// Parameter: rate override in percent.
pub const PARAM_RATE_OVERRIDE: &str = "rate_override";

/// Return value: rate applied, in percent.
pub const RETURN_RATE_PERCENT: &str = "rate_percent";
/// Return value: base minus withholding.
pub const RETURN_NET_AMOUNT: &str = "net_amount";
/// Return value: statutory section of the definition.
pub const RETURN_STATUTORY_SECTION: &str = "statutory_section";

/// Percentage-of-base withholding calculator.
#[derive(Debug, Clone)]
pub struct RateWithholding {
    context: WithholdingContext,
}

impl RateWithholding {
    /// Registry name.
    pub const HANDLER: &'static str = "rate";

    /// Create a calculator for `setting`.
    pub fn new(setting: Arc<WithholdingSetting>) -> Self {
        Self {
            context: WithholdingContext::new(setting),
        }
    }

    /// Registry factory.
    pub fn boxed(setting: Arc<WithholdingSetting>) -> Box<dyn WithholdingCalculation> {
        Box::new(Self::new(setting))
    }

    /// Numeric override, read as a decimal. Whole numbers given on a command
    /// line arrive as `Integer` and count too.
    fn numeric_param(&self, key: &str) -> Decimal {
        let Some(value) = self.context.parameter(key) else {
            return Decimal::ZERO;
        };
        match value.as_decimal().or_else(|| value.as_integer().map(Decimal::from)) {
            Some(v) => v,
            None => {
                tracing::trace!(key, found = value.type_name(), "non-numeric override ignored");
                Decimal::ZERO
            }
        }
    }

    fn base_for(&self, document: &dyn DocumentAction) -> Decimal {
        let override_base = self.numeric_param(PARAM_BASE_AMOUNT);
        if override_base > Decimal::ZERO {
            override_base
        } else {
            document.approval_amount()
        }
    }

    fn rate_for(&self, definition_rate: Decimal) -> Decimal {
        let override_rate = self.numeric_param(PARAM_RATE_OVERRIDE);
        if override_rate > Decimal::ZERO {
            override_rate
        } else {
            definition_rate
        }
    }

    fn is_exempt(&self) -> bool {
        self.context
            .parameter(PARAM_EXEMPT)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

impl WithholdingCalculation for RateWithholding {
    fn context(&self) -> &WithholdingContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut WithholdingContext {
        &mut self.context
    }

    fn is_valid(&self) -> bool {
        let (Some(definition), Some(document)) =
            (self.context.definition(), self.context.document())
        else {
            return false;
        };
        if !matches!(
            document.doc_status(),
            DocStatus::InProgress | DocStatus::Completed
        ) {
            return false;
        }
        if self.is_exempt() {
            return false;
        }
        definition.reaches_minimum(self.base_for(document.as_ref()))
    }

    fn run(&mut self) -> Result<Option<String>, WhtError> {
        let definition = self
            .context
            .definition()
            .cloned()
            .ok_or_else(|| WhtError::Calculation("no withholding definition set".to_string()))?;
        let document = self
            .context
            .document()
            .cloned()
            .ok_or_else(|| WhtError::Calculation("no document set".to_string()))?;

        let base = self.base_for(document.as_ref());
        let rate = self.rate_for(definition.rate_percent);
        let precision = document.currency_precision();

        let gross = base.checked_mul(rate).ok_or_else(|| {
            WhtError::Calculation(format!(
                "{}: base {base} x rate {rate} overflows",
                document.document_no()
            ))
        })?;
        let withholding = round_amount(gross / Decimal::ONE_HUNDRED, precision);
        let net = base - withholding;

        self.context.set_base_amount(base);
        self.context.set_withholding_amount(withholding);
        self.context.set_return_value(RETURN_RATE_PERCENT, rate);
        self.context.set_return_value(RETURN_NET_AMOUNT, net);
        if let Some(section) = &definition.statutory_section {
            self.context
                .set_return_value(RETURN_STATUTORY_SECTION, section.as_str());
        }

        self.context.add_log(format!(
            "{}: {base} x {rate}% = {withholding} {}",
            document.document_no(),
            document.currency()
        ));
        self.context
            .add_description(format!("{} {rate}%: {withholding}", definition.name));

        Ok(Some(format!(
            "withheld {withholding} {} on {}",
            document.currency(),
            document.document_no()
        )))
    }
}
