//! # Parameter Values
//!
//! [`ParameterValue`] is the value type of both the parameter bag a caller
//! fills before a run and the return-value bag a calculator fills during it.
//!
//! ## Mismatch Policy
//!
//! The typed accessors (`as_integer`, `as_decimal`, ...) return `None` when
//! the variant does not match. They never coerce: an `Integer(5)` is not a
//! decimal and a `Text("5")` is not an integer. The calculation context
//! builds its zero-default lookups on top of this.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;

/// A typed value stored under a string key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    /// Whole number (counts, identifiers, sequence numbers).
    Integer(i64),
    /// Exact decimal (amounts, rates).
    Decimal(Decimal),
    /// Free text.
    Text(String),
    /// Flag.
    Boolean(bool),
    /// Calendar date without time zone (accounting dates).
    Date(NaiveDate),
}

impl ParameterValue {
    /// The integer, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The decimal, if this is a `Decimal`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// The text, if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// The flag, if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// The date, if this is a `Date`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the variant, for log fields.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
        }
    }

    /// Infer a value from untyped text, as given on a command line.
    ///
    /// Tried in order on the trimmed input: `true`/`false`, `i64`, decimal,
    /// ISO date (`YYYY-MM-DD`). Anything else is kept as trimmed text.
    /// `"10"` is an integer, `"10.0"` a decimal, and a whole number too wide
    /// for `i64` a decimal.
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed {
            "true" => return Self::Boolean(true),
            "false" => return Self::Boolean(false),
            _ => {}
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Self::Integer(v);
        }
        if let Ok(v) = parse_amount(trimmed) {
            return Self::Decimal(v);
        }
        if let Ok(v) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::Date(v);
        }
        Self::Text(trimmed.to_string())
    }
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for ParameterValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<Decimal> for ParameterValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<NaiveDate> for ParameterValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_only_their_variant() {
        let i = ParameterValue::Integer(7);
        assert_eq!(i.as_integer(), Some(7));
        assert_eq!(i.as_decimal(), None);
        assert_eq!(i.as_text(), None);

        let d = ParameterValue::Decimal(Decimal::new(75, 1));
        assert_eq!(d.as_decimal(), Some(Decimal::new(75, 1)));
        assert_eq!(d.as_integer(), None);
    }

    #[test]
    fn test_text_is_never_coerced() {
        let t = ParameterValue::from("5");
        assert_eq!(t.as_integer(), None);
        assert_eq!(t.as_text(), Some("5"));
    }

    #[test]
    fn test_parse_lenient_integer_vs_decimal() {
        assert_eq!(ParameterValue::parse_lenient("10"), ParameterValue::Integer(10));
        assert_eq!(
            ParameterValue::parse_lenient("10.0"),
            ParameterValue::Decimal(Decimal::new(100, 1))
        );
        assert_eq!(ParameterValue::parse_lenient("-3"), ParameterValue::Integer(-3));
    }

    #[test]
    fn test_parse_lenient_bool_date_text() {
        assert_eq!(ParameterValue::parse_lenient("true"), ParameterValue::Boolean(true));
        assert_eq!(ParameterValue::parse_lenient("false"), ParameterValue::Boolean(false));
        assert_eq!(
            ParameterValue::parse_lenient("2024-07-01"),
            ParameterValue::Date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        );
        assert_eq!(
            ParameterValue::parse_lenient("ITO-153"),
            ParameterValue::Text("ITO-153".to_string())
        );
    }

    #[test]
    fn test_parse_lenient_trims_text() {
        assert_eq!(
            ParameterValue::parse_lenient("  Section 153 "),
            ParameterValue::Text("Section 153".to_string())
        );
    }

    #[test]
    fn test_parse_lenient_wide_integer_is_decimal() {
        // One past i64::MAX.
        assert_eq!(
            ParameterValue::parse_lenient("9223372036854775808"),
            ParameterValue::Decimal(Decimal::from(i64::MAX) + Decimal::ONE)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ParameterValue::Integer(3).to_string(), "3");
        assert_eq!(ParameterValue::Decimal(Decimal::new(1250, 2)).to_string(), "12.50");
        assert_eq!(
            ParameterValue::Date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()).to_string(),
            "2025-01-31"
        );
    }

    #[test]
    fn test_serde_tagged_form() {
        let v = ParameterValue::Decimal(Decimal::new(45, 1));
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"decimal":"4.5"}"#);
        let back: ParameterValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_yaml_integer_form() {
        let v: ParameterValue = serde_yaml::from_str("integer: 12").unwrap();
        assert_eq!(v, ParameterValue::Integer(12));
    }
}
