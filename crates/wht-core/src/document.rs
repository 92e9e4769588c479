//! # Document Action
//!
//! The financial document a withholding calculation is evaluated against.
//!
//! The host system owns its documents and their workflow. Calculators only
//! read from them, through the [`DocumentAction`] trait. [`FinancialDocument`]
//! is a plain-data implementation used by configuration files and tests.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::DEFAULT_PRECISION;
use crate::config::read_yaml;
use crate::error::WhtError;
use crate::identity::DocumentId;

// ─── Document Status ─────────────────────────────────────────────────

/// Workflow status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Being edited, nothing posted.
    Drafted,
    /// Prepared and awaiting completion.
    InProgress,
    /// Failed validation during preparation.
    Invalid,
    /// Completed; amounts are final.
    Completed,
    /// Completed and closed for further changes.
    Closed,
    /// Reversed by a counter-document.
    Reversed,
    /// Voided before posting.
    Voided,
}

impl DocStatus {
    /// The two-letter status code used on document records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Drafted => "DR",
            Self::InProgress => "IP",
            Self::Invalid => "IN",
            Self::Completed => "CO",
            Self::Closed => "CL",
            Self::Reversed => "RE",
            Self::Voided => "VO",
        }
    }

    /// Whether the document's amounts are final.
    pub fn is_processed(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Closed | Self::Reversed | Self::Voided
        )
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Drafted => "DRAFTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Invalid => "INVALID",
            Self::Completed => "COMPLETED",
            Self::Closed => "CLOSED",
            Self::Reversed => "REVERSED",
            Self::Voided => "VOIDED",
        };
        f.write_str(s)
    }
}

impl FromStr for DocStatus {
    type Err = WhtError;

    /// Parse a status from its two-letter code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DR" => Ok(Self::Drafted),
            "IP" => Ok(Self::InProgress),
            "IN" => Ok(Self::Invalid),
            "CO" => Ok(Self::Completed),
            "CL" => Ok(Self::Closed),
            "RE" => Ok(Self::Reversed),
            "VO" => Ok(Self::Voided),
            other => Err(WhtError::Config(format!(
                "unknown document status code: {other:?}"
            ))),
        }
    }
}

// ─── Document Trait ──────────────────────────────────────────────────

/// Read access to a financial document under withholding evaluation.
pub trait DocumentAction: std::fmt::Debug + Send + Sync {
    /// Document identifier.
    fn document_id(&self) -> DocumentId;

    /// Human-facing document number.
    fn document_no(&self) -> &str;

    /// Current workflow status.
    fn doc_status(&self) -> DocStatus;

    /// ISO 4217 currency code.
    fn currency(&self) -> &str;

    /// Decimal places of the document currency.
    fn currency_precision(&self) -> u32 {
        DEFAULT_PRECISION
    }

    /// Amount the document is approved for (grand total for invoices).
    fn approval_amount(&self) -> Decimal;

    /// One-line summary for log fields.
    fn summary(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.document_no(),
            self.approval_amount(),
            self.currency(),
            self.doc_status()
        )
    }
}

// ─── Plain-Data Document ─────────────────────────────────────────────

/// A serde-loadable financial document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialDocument {
    /// Unique document identifier.
    #[serde(default)]
    pub id: DocumentId,
    /// Document number.
    pub document_no: String,
    /// Workflow status.
    pub doc_status: DocStatus,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Currency precision.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Grand total.
    pub grand_total: Decimal,
    /// Accounting date.
    #[serde(default)]
    pub date_acct: Option<NaiveDate>,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl FinancialDocument {
    /// Create a drafted document.
    pub fn new(
        document_no: impl Into<String>,
        currency: impl Into<String>,
        grand_total: Decimal,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            document_no: document_no.into(),
            doc_status: DocStatus::Drafted,
            currency: currency.into(),
            precision: DEFAULT_PRECISION,
            grand_total,
            date_acct: None,
        }
    }

    /// Builder: set the status.
    pub fn with_status(mut self, status: DocStatus) -> Self {
        self.doc_status = status;
        self
    }

    /// Builder: set the currency precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder: set the accounting date.
    pub fn with_date_acct(mut self, date: NaiveDate) -> Self {
        self.date_acct = Some(date);
        self
    }

    /// Parse a document from YAML.
    pub fn from_yaml_str(s: &str) -> Result<Self, WhtError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a document from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WhtError> {
        read_yaml(path.as_ref())
    }
}

impl DocumentAction for FinancialDocument {
    fn document_id(&self) -> DocumentId {
        self.id
    }

    fn document_no(&self) -> &str {
        &self.document_no
    }

    fn doc_status(&self) -> DocStatus {
        self.doc_status
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn currency_precision(&self) -> u32 {
        self.precision
    }

    fn approval_amount(&self) -> Decimal {
        self.grand_total
    }
}
