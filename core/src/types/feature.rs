use serde::Serialize;
use serde_json::Number;
use std::fmt;

/// Value of a projected feature
///
/// `Number` holds a number parsed out of a text value. `Exact` holds a value
/// that was already numeric in the record and is emitted unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Exact(Number),
    Text(String),
}

impl FeatureValue {
    /// Returns the numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Exact(n) => n.as_f64(),
            FeatureValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(n) => write!(f, "{}", n),
            FeatureValue::Exact(n) => write!(f, "{}", n),
            FeatureValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One row of the feature table
///
/// `value` is `None` when the feature was not found in the record;
/// `unit` is empty whenever no unit could be split off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub variable: String,
    pub value: Option<FeatureValue>,
    pub unit: String,
}

impl FeatureRow {
    /// Creates a new row
    pub fn new(variable: impl Into<String>, value: Option<FeatureValue>, unit: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value,
            unit: unit.into(),
        }
    }

    /// Creates a row for a feature absent from the record
    pub fn missing(variable: impl Into<String>) -> Self {
        Self::new(variable, None, "")
    }

    /// Checks whether the feature was found
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }
}
