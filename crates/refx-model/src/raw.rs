use std::collections::BTreeMap;

use serde::Serialize;

/// One scalar value as read from the source store.
///
/// The reference table mixes text, integer, and real columns, and almost any
/// column may be null. Numeric-looking data frequently arrives as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Int(i64),
    Real(f64),
    Null,
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Integer view: integers directly, reals truncated, numeric text parsed.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(value) => Some(*value),
            RawValue::Real(value) => Some(*value as i64),
            RawValue::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
            }
            RawValue::Null => None,
        }
    }

    /// Render the value as display text. Null has no display form.
    pub fn display(&self) -> Option<String> {
        match self {
            RawValue::Text(text) => Some(text.clone()),
            RawValue::Int(value) => Some(value.to_string()),
            RawValue::Real(value) => Some(format_real(*value)),
            RawValue::Null => None,
        }
    }
}

/// Integral reals print without a trailing ".0" so year-like columns stored
/// as REAL round-trip cleanly.
fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One non-deleted row from the reference table, keyed by source column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    columns: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: RawValue) {
        self.columns.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.columns.get(column)
    }

    /// The numeric record identifier, when the row carries one.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(RawValue::as_int)
    }

    pub fn int(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(RawValue::as_int)
    }

    /// Display text for a column; null columns yield None.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(RawValue::display)
    }

    /// Display text, but only when it contains something other than whitespace.
    pub fn non_blank_text(&self, column: &str) -> Option<String> {
        self.text(column).filter(|text| !text.trim().is_empty())
    }
}

/// Attachment paths per record identifier, in source order.
pub type AttachmentMap = BTreeMap<i64, Vec<String>>;
