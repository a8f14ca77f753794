// src/alerts/record.rs
//! The alert record: an ordered, open mapping of field name to scalar value.
//!
//! Canonical fields are typed by convention only; unrecognized keys are
//! preserved verbatim so a round-trip never silently drops configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const NRQL_QUERY: &str = "nrql_query";
pub const RUNBOOK_URL: &str = "runbook_url";
pub const SEVERITY: &str = "severity";
pub const ENABLED: &str = "enabled";
pub const AGGREGATION_METHOD: &str = "aggregation_method";
pub const AGGREGATION_WINDOW: &str = "aggregation_window";
pub const AGGREGATION_DELAY: &str = "aggregation_delay";
pub const CRITICAL_OPERATOR: &str = "critical_operator";
pub const CRITICAL_THRESHOLD: &str = "critical_threshold";
pub const CRITICAL_THRESHOLD_DURATION: &str = "critical_threshold_duration";
pub const CRITICAL_THRESHOLD_OCCURRENCES: &str = "critical_threshold_occurrences";
pub const EXPIRATION_DURATION: &str = "expiration_duration";
pub const CLOSE_VIOLATIONS_ON_EXPIRATION: &str = "close_violations_on_expiration";
pub const POLICY_ID: &str = "policy_id";

/// Fixed serialization order for the known field set. Remaining keys
/// follow in their record iteration order.
pub const CANONICAL_ORDER: &[&str] = &[
    NAME,
    DESCRIPTION,
    NRQL_QUERY,
    RUNBOOK_URL,
    SEVERITY,
    ENABLED,
    AGGREGATION_METHOD,
    AGGREGATION_WINDOW,
    AGGREGATION_DELAY,
    CRITICAL_OPERATOR,
    CRITICAL_THRESHOLD,
    CRITICAL_THRESHOLD_DURATION,
    CRITICAL_THRESHOLD_OCCURRENCES,
    EXPIRATION_DURATION,
    CLOSE_VIOLATIONS_ON_EXPIRATION,
    "open_violation_on_expiration",
    "fill_option",
    "fill_value",
    "title_template",
    "ignore_on_expected_termination",
    POLICY_ID,
];

/// A scalar alert field value. The block grammar has no nested shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertValue {
    Str(String),
    Num(Number),
    Bool(bool),
    Null,
}

impl AlertValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AlertValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AlertValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AlertValue::Num(n) => n.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, AlertValue::Null)
    }
}

impl fmt::Display for AlertValue {
    /// Human-readable form for changelogs and listings; absent renders empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertValue::Str(s) => write!(f, "{s}"),
            AlertValue::Num(n) => write!(f, "{n}"),
            AlertValue::Bool(b) => write!(f, "{b}"),
            AlertValue::Null => Ok(()),
        }
    }
}

impl From<&str> for AlertValue {
    fn from(s: &str) -> Self {
        AlertValue::Str(s.to_string())
    }
}

impl From<String> for AlertValue {
    fn from(s: String) -> Self {
        AlertValue::Str(s)
    }
}

impl From<bool> for AlertValue {
    fn from(b: bool) -> Self {
        AlertValue::Bool(b)
    }
}

impl From<i64> for AlertValue {
    fn from(n: i64) -> Self {
        AlertValue::Num(Number::from(n))
    }
}

/// One alert definition. Insertion order is preserved so passthrough keys
/// keep their position relative to each other across a round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertRecord {
    fields: IndexMap<String, AlertValue>,
}

impl AlertRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AlertValue> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: AlertValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<AlertValue> {
        self.fields.shift_remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AlertValue)> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The `name` field, or empty when missing (parser does not enforce it).
    #[must_use]
    pub fn name(&self) -> &str {
        self.get(NAME).and_then(AlertValue::as_str).unwrap_or("")
    }

    /// Field as a string when present and non-null.
    #[must_use]
    pub fn str_field(&self, key: &str) -> &str {
        self.get(key).and_then(AlertValue::as_str).unwrap_or("")
    }

    /// Builds a record from an HCL object. Returns `None` when any value
    /// has a shape outside the block grammar (nested array or object).
    #[must_use]
    pub fn from_hcl_object(obj: &hcl::Map<String, hcl::Value>) -> Option<Self> {
        let mut record = AlertRecord::new();
        for (key, value) in obj {
            record.set(key.clone(), convert_hcl_value(value)?);
        }
        Some(record)
    }
}

impl FromIterator<(String, AlertValue)> for AlertRecord {
    fn from_iter<T: IntoIterator<Item = (String, AlertValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

fn convert_hcl_value(value: &hcl::Value) -> Option<AlertValue> {
    match value {
        hcl::Value::Null => Some(AlertValue::Null),
        hcl::Value::Bool(b) => Some(AlertValue::Bool(*b)),
        hcl::Value::String(s) => Some(AlertValue::Str(s.clone())),
        hcl::Value::Number(n) => convert_hcl_number(n).map(AlertValue::Num),
        hcl::Value::Array(_) | hcl::Value::Object(_) => None,
    }
}

fn convert_hcl_number(n: &hcl::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Number::from(u))
    } else {
        n.as_f64().and_then(Number::from_f64)
    }
}
