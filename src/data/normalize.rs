//! Field Normalizers
//! Turns raw `Year` and `Value` cells into plain numbers.
//!
//! Both normalizers are total: malformed input yields `None`, never an error.

use serde::Serialize;

/// A single CSV cell as it came out of the reader.
///
/// Schema inference decides whether a column is numeric or text, so the
/// same logical field can arrive in different shapes across files.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    Text(String),
    Int(i64),
    Float(f64),
    Missing,
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<i64> for RawField {
    fn from(value: i64) -> Self {
        RawField::Int(value)
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Float(value)
    }
}

/// Comparison marker that prefixed a reported value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueQualifier {
    #[default]
    Exact,
    /// Reported as `<x`: the true value is below `x`.
    LessThan,
    /// Reported as `>x`: the true value is above `x`.
    GreaterThan,
}

impl ValueQualifier {
    /// True when the number is a bound rather than a point estimate.
    pub fn is_bound(self) -> bool {
        self != ValueQualifier::Exact
    }
}

/// Parsed value together with the comparison marker that was stripped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualifiedValue {
    pub value: f64,
    pub qualifier: ValueQualifier,
}

/// Parse a year cell into one representative year.
///
/// A range such as `"2010-2012"` collapses to its floor midpoint
/// (`start + (end - start) / 2`, floor division). Reversed ranges are not
/// corrected.
pub fn parse_year(raw: &RawField) -> Option<i64> {
    match raw {
        RawField::Text(text) => match text.split_once('-') {
            Some((start, end)) => {
                let start = parse_int(start)?;
                let end = parse_int(end)?;
                let half = end.checked_sub(start)?.div_euclid(2);
                start.checked_add(half)
            }
            None => parse_int(text),
        },
        RawField::Int(year) => Some(*year),
        RawField::Float(year) if year.is_finite() => Some(year.trunc() as i64),
        RawField::Float(_) | RawField::Missing => None,
    }
}

/// Parse a value cell, dropping any leading `<` or `>` marker.
pub fn parse_value(raw: &RawField) -> Option<f64> {
    parse_qualified_value(raw).map(|parsed| parsed.value)
}

/// Parse a value cell and report which comparison marker (if any) it had.
pub fn parse_qualified_value(raw: &RawField) -> Option<QualifiedValue> {
    let (value, qualifier) = match raw {
        RawField::Text(text) => {
            let trimmed = text.trim();
            let (rest, qualifier) = if let Some(rest) = trimmed.strip_prefix('<') {
                (rest, ValueQualifier::LessThan)
            } else if let Some(rest) = trimmed.strip_prefix('>') {
                (rest, ValueQualifier::GreaterThan)
            } else {
                (trimmed, ValueQualifier::Exact)
            };
            (rest.trim().parse::<f64>().ok()?, qualifier)
        }
        RawField::Int(value) => (*value as f64, ValueQualifier::Exact),
        RawField::Float(value) => (*value, ValueQualifier::Exact),
        RawField::Missing => return None,
    };

    // NaN/inf would poison regional means
    value
        .is_finite()
        .then_some(QualifiedValue { value, qualifier })
}

fn parse_int(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}
