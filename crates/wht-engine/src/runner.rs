//! # Runner
//!
//! Drives calculators through the caller contract: check eligibility, run,
//! then read results. Results are snapshotted into a [`WithholdingOutcome`]
//! that owns its data, so it outlives the calculator and serializes
//! directly.
//!
//! [`execute_all`] processes one document against every active setting of a
//! definition and stops at the first calculator failure.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wht_core::{DocumentAction, ParameterValue, SettingId, WhtError, WithholdingConfig};

use crate::calculation::WithholdingCalculation;
use crate::context::WithholdingContext;
use crate::registry::CalculatorRegistry;

/// Whether a calculator ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The document was eligible and the calculator ran.
    Applied,
    /// The calculator judged the document ineligible.
    Skipped,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => f.write_str("APPLIED"),
            Self::Skipped => f.write_str("SKIPPED"),
        }
    }
}

/// Owned snapshot of a finished calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingOutcome {
    /// Setting that produced this outcome.
    pub setting_id: SettingId,
    /// Setting name.
    pub setting_name: String,
    /// Handler that computed it.
    pub handler: String,
    /// Document number, when a document was set.
    pub document_no: Option<String>,
    /// Unit-of-work tag, when set.
    pub transaction_name: Option<String>,
    /// Applied or skipped.
    pub status: OutcomeStatus,
    /// Base amount at the end of the run.
    pub base_amount: Decimal,
    /// Withholding amount at the end of the run.
    pub withholding_amount: Decimal,
    /// Summary returned by the calculator.
    pub message: Option<String>,
    /// Process log.
    pub process_log: Option<String>,
    /// Description lines.
    pub process_description: Option<String>,
    /// Return values, key-ordered.
    pub return_values: BTreeMap<String, ParameterValue>,
    /// When the snapshot was taken.
    pub computed_at: DateTime<Utc>,
}

impl WithholdingOutcome {
    fn snapshot(
        context: &WithholdingContext,
        status: OutcomeStatus,
        message: Option<String>,
    ) -> Self {
        let setting = context.setting();
        Self {
            setting_id: setting.id,
            setting_name: setting.name.clone(),
            handler: setting.handler.clone(),
            document_no: context.document().map(|d| d.document_no().to_string()),
            transaction_name: context.transaction_name().map(str::to_string),
            status,
            base_amount: context.base_amount(),
            withholding_amount: context.withholding_amount(),
            message,
            process_log: context.process_log().map(str::to_string),
            process_description: context.process_description().map(str::to_string),
            return_values: context
                .return_values()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            computed_at: Utc::now(),
        }
    }

    /// Whether the calculator ran.
    pub fn is_applied(&self) -> bool {
        self.status == OutcomeStatus::Applied
    }
}

/// Run one calculator: skip it when ineligible, otherwise run it.
///
/// A calculator error is returned unchanged; no outcome is produced for it.
pub fn execute(
    calculator: &mut dyn WithholdingCalculation,
) -> Result<WithholdingOutcome, WhtError> {
    let setting = Arc::clone(calculator.context().setting());
    let document = calculator.context().document().cloned();
    let document_no = document
        .as_ref()
        .map(|d| d.document_no().to_string())
        .unwrap_or_default();

    if !calculator.is_valid() {
        tracing::debug!(
            setting = %setting.id,
            handler = %setting.handler,
            document = %document.as_ref().map(|d| d.summary()).unwrap_or_default(),
            "document not eligible; skipping"
        );
        return Ok(WithholdingOutcome::snapshot(
            calculator.context(),
            OutcomeStatus::Skipped,
            None,
        ));
    }

    let message = calculator.run().map_err(|e| {
        tracing::warn!(
            setting = %setting.id,
            handler = %setting.handler,
            document_no = %document_no,
            error = %e,
            "withholding calculation failed"
        );
        e
    })?;

    let context = calculator.context();
    tracing::info!(
        setting = %setting.id,
        handler = %setting.handler,
        document_no = %document_no,
        base_amount = %context.base_amount(),
        withholding_amount = %context.withholding_amount(),
        "withholding applied"
    );
    Ok(WithholdingOutcome::snapshot(
        context,
        OutcomeStatus::Applied,
        message,
    ))
}

/// Apply every active setting of `config` to `document`.
///
/// Each setting gets its own calculator and context, seeded with the
/// setting's defaults and then `parameters`. Outcomes are returned in
/// setting order.
pub fn execute_all(
    registry: &CalculatorRegistry,
    config: &WithholdingConfig,
    document: Arc<dyn DocumentAction>,
    parameters: &BTreeMap<String, ParameterValue>,
    transaction_name: Option<&str>,
) -> Result<Vec<WithholdingOutcome>, WhtError> {
    let definition = Arc::new(config.definition.clone());
    let mut outcomes = Vec::new();

    for setting in config.active_settings() {
        let mut calculator = registry.build(Arc::new(setting.clone()))?;
        let context = calculator.context_mut();
        context.set_definition(Arc::clone(&definition));
        context.set_document(Arc::clone(&document));
        context.set_parameters(parameters.clone());
        if let Some(name) = transaction_name {
            context.set_transaction_name(name);
        }
        outcomes.push(execute(calculator.as_mut())?);
    }

    tracing::info!(
        document_no = %document.document_no(),
        settings = outcomes.len(),
        applied = outcomes.iter().filter(|o| o.is_applied()).count(),
        "document processed"
    );
    Ok(outcomes)
}

/// Sum of the withholding amounts of applied outcomes.
///
/// Fails when the sum leaves the range of `Decimal`.
pub fn total_withholding(outcomes: &[WithholdingOutcome]) -> Result<Decimal, WhtError> {
    outcomes
        .iter()
        .filter(|o| o.is_applied())
        .try_fold(Decimal::ZERO, |total, o| {
            total.checked_add(o.withholding_amount).ok_or_else(|| {
                WhtError::Calculation(format!(
                    "total withholding overflows at setting {}",
                    o.setting_name
                ))
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use wht_core::{DocStatus, FinancialDocument, WithholdingDefinition, WithholdingSetting};

    use crate::calculators::RateWithholding;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_calc(status: DocStatus) -> RateWithholding {
        let mut calc = RateWithholding::new(Arc::new(WithholdingSetting::new("Goods", "rate")));
        let ctx = calc.context_mut();
        ctx.set_definition(Arc::new(WithholdingDefinition::new("WHT", d("10"))));
        ctx.set_document(Arc::new(
            FinancialDocument::new("INV-9", "USD", d("300")).with_status(status),
        ));
        ctx.set_transaction_name("trx-1");
        calc
    }

    #[test]
    fn test_execute_applied() {
        let mut calc = make_calc(DocStatus::Completed);
        let outcome = execute(&mut calc).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Applied);
        assert_eq!(outcome.withholding_amount, d("30"));
        assert_eq!(outcome.document_no.as_deref(), Some("INV-9"));
        assert_eq!(outcome.transaction_name.as_deref(), Some("trx-1"));
        assert!(outcome.message.is_some());
        assert!(outcome.process_log.is_some());
        assert!(outcome.return_values.contains_key("net_amount"));
    }

    #[test]
    fn test_execute_skipped_leaves_amounts_zero() {
        let mut calc = make_calc(DocStatus::Drafted);
        let outcome = execute(&mut calc).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Skipped);
        assert_eq!(outcome.base_amount, Decimal::ZERO);
        assert_eq!(outcome.withholding_amount, Decimal::ZERO);
        assert!(outcome.message.is_none());
        assert!(outcome.process_log.is_none());
    }

    #[test]
    fn test_total_withholding_ignores_skipped() {
        let applied = execute(&mut make_calc(DocStatus::Completed)).unwrap();
        let skipped = execute(&mut make_calc(DocStatus::Drafted)).unwrap();
        assert_eq!(total_withholding(&[applied, skipped]).unwrap(), d("30"));
        assert_eq!(total_withholding(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_withholding_overflow_is_an_error() {
        let mut first = execute(&mut make_calc(DocStatus::Completed)).unwrap();
        first.withholding_amount = Decimal::MAX;
        let second = execute(&mut make_calc(DocStatus::Completed)).unwrap();
        match total_withholding(&[first, second]) {
            Err(WhtError::Calculation(msg)) => assert!(msg.contains("Goods")),
            other => panic!("Expected Calculation error, got: {other:?}"),
        }
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = execute(&mut make_calc(DocStatus::Completed)).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "applied");
        assert_eq!(json["withholding_amount"], "30.00");
        assert_eq!(json["return_values"]["rate_percent"]["decimal"], "10");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OutcomeStatus::Applied.to_string(), "APPLIED");
        assert_eq!(OutcomeStatus::Skipped.to_string(), "SKIPPED");
    }
}
