//! # Run Subcommand
//!
//! Applies a withholding configuration to one document.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use wht_core::{FinancialDocument, ParameterValue, WithholdingConfig};
use wht_engine::{execute_all, CalculatorRegistry, WithholdingOutcome};

/// Arguments for the run subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Withholding configuration (definition and settings), YAML.
    #[arg(long)]
    pub config: PathBuf,

    /// Document to withhold on, YAML.
    #[arg(long)]
    pub document: PathBuf,

    /// Calculation parameter as `key=value`. Repeatable.
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, ParameterValue)>,

    /// Unit-of-work tag attached to every outcome.
    #[arg(long)]
    pub transaction: Option<String>,
}

/// Parse a `key=value` pair. The value is typed leniently, so `rate=2.5`
/// is a decimal and `exempt=true` a boolean.
pub fn parse_param(s: &str) -> Result<(String, ParameterValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in `{s}`"));
    }
    Ok((key.to_string(), ParameterValue::parse_lenient(value.trim())))
}

/// Execute the run subcommand with the built-in calculators.
pub fn run_withholding(args: &RunArgs) -> anyhow::Result<Vec<WithholdingOutcome>> {
    run_with_registry(&CalculatorRegistry::with_defaults(), args)
}

/// Execute the run subcommand against `registry`.
pub fn run_with_registry(
    registry: &CalculatorRegistry,
    args: &RunArgs,
) -> anyhow::Result<Vec<WithholdingOutcome>> {
    let config = WithholdingConfig::load(&args.config)
        .with_context(|| format!("loading configuration {}", args.config.display()))?;
    let document = FinancialDocument::load(&args.document)
        .with_context(|| format!("loading document {}", args.document.display()))?;
    tracing::debug!(
        definition = %config.definition.name,
        document_no = %document.document_no,
        "inputs loaded"
    );

    let parameters: BTreeMap<String, ParameterValue> = args.params.iter().cloned().collect();
    let outcomes = execute_all(
        registry,
        &config,
        Arc::new(document),
        &parameters,
        args.transaction.as_deref(),
    )?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    use wht_core::Decimal;
    use wht_engine::OutcomeStatus;

    const CONFIG: &str = "definition:\n  name: WHT\n  rate_percent: \"10\"\nsettings:\n  - name: Default\n    handler: rate\n";
    const DOCUMENT: &str = "document_no: INV-1\ndoc_status: completed\ncurrency: USD\ngrand_total: \"250\"\n";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(config: &tempfile::NamedTempFile, document: &tempfile::NamedTempFile) -> RunArgs {
        RunArgs {
            config: config.path().to_path_buf(),
            document: document.path().to_path_buf(),
            params: Vec::new(),
            transaction: None,
        }
    }

    #[test]
    fn test_parse_param_types_value() {
        assert_eq!(
            parse_param("rate_override=2.5").unwrap(),
            (
                "rate_override".to_string(),
                ParameterValue::Decimal(Decimal::from_str("2.5").unwrap())
            )
        );
        assert_eq!(
            parse_param(" exempt = true ").unwrap(),
            ("exempt".to_string(), ParameterValue::Boolean(true))
        );
        assert_eq!(
            parse_param("note=a=b").unwrap(),
            ("note".to_string(), ParameterValue::Text("a=b".to_string()))
        );
    }

    #[test]
    fn test_parse_param_rejects_malformed() {
        assert!(parse_param("exempt").is_err());
        assert!(parse_param("=1").is_err());
    }

    #[test]
    fn test_run_withholding() {
        let config = write_temp(CONFIG);
        let document = write_temp(DOCUMENT);
        let mut args = args(&config, &document);
        args.transaction = Some("trx-7".to_string());

        let outcomes = run_withholding(&args).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Applied);
        assert_eq!(outcomes[0].withholding_amount, Decimal::from_str("25.00").unwrap());
        assert_eq!(outcomes[0].transaction_name.as_deref(), Some("trx-7"));
    }

    #[test]
    fn test_run_params_reach_calculator() {
        let config = write_temp(CONFIG);
        let document = write_temp(DOCUMENT);
        let mut args = args(&config, &document);
        args.params.push(parse_param("exempt=true").unwrap());

        let outcomes = run_withholding(&args).unwrap();
        assert_eq!(outcomes[0].status, OutcomeStatus::Skipped);
    }

    #[test]
    fn test_run_whole_number_overrides() {
        let config = write_temp(CONFIG);
        let document = write_temp(DOCUMENT);
        let mut args = args(&config, &document);
        args.params.push(parse_param("rate_override=20").unwrap());
        args.params.push(parse_param("base_amount=1000").unwrap());

        let outcomes = run_withholding(&args).unwrap();
        assert_eq!(outcomes[0].status, OutcomeStatus::Applied);
        assert_eq!(outcomes[0].base_amount, Decimal::from(1000));
        assert_eq!(outcomes[0].withholding_amount, Decimal::from_str("200.00").unwrap());
    }

    #[test]
    fn test_run_missing_config_names_path() {
        let document = write_temp(DOCUMENT);
        let args = RunArgs {
            config: PathBuf::from("/nonexistent/withholding.yaml"),
            document: document.path().to_path_buf(),
            params: Vec::new(),
            transaction: None,
        };
        let err = run_withholding(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/withholding.yaml"));
    }
}
