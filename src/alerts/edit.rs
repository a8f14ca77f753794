// src/alerts/edit.rs
//! Record-level editing: templated add, patch by index, delete with
//! bookkeeping for the other pending changes.

use crate::alerts::record::{self, AlertRecord, AlertValue};
use crate::error::{AlertError, Result};
use serde_json::Number;

/// Fields coerced to numbers when patched from `KEY=VALUE` input.
const NUMBER_FIELDS: &[&str] = &[
    record::AGGREGATION_WINDOW,
    record::AGGREGATION_DELAY,
    record::CRITICAL_THRESHOLD,
    record::CRITICAL_THRESHOLD_DURATION,
    record::EXPIRATION_DURATION,
    "fill_value",
];

/// Fields coerced to booleans when patched from `KEY=VALUE` input.
const BOOL_FIELDS: &[&str] = &[
    record::ENABLED,
    record::CLOSE_VIOLATIONS_ON_EXPIRATION,
    "open_violation_on_expiration",
    "ignore_on_expected_termination",
];

/// One not-yet-saved mutation of the alert list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertChange {
    Added { index: usize },
    Modified { index: usize },
    Deleted { name: String },
}

/// Default record appended by `add`. `index` is the position the new
/// record will take, used only to seed a unique-ish name.
#[must_use]
pub fn new_alert_template(index: usize) -> AlertRecord {
    let mut r = AlertRecord::new();
    r.set(record::NAME, AlertValue::Str(format!("New Alert {}", index + 1)));
    r.set(record::DESCRIPTION, AlertValue::from(""));
    r.set(record::NRQL_QUERY, AlertValue::from(""));
    r.set(record::RUNBOOK_URL, AlertValue::from(""));
    r.set(record::SEVERITY, AlertValue::from("CRITICAL"));
    r.set(record::ENABLED, AlertValue::Bool(true));
    r.set(record::AGGREGATION_METHOD, AlertValue::from("CADENCE"));
    r.set(record::AGGREGATION_WINDOW, AlertValue::from(60));
    r.set(record::AGGREGATION_DELAY, AlertValue::from(0));
    r.set(record::CRITICAL_OPERATOR, AlertValue::from("ABOVE"));
    r.set(record::CRITICAL_THRESHOLD, AlertValue::from(1));
    r.set(record::CRITICAL_THRESHOLD_DURATION, AlertValue::from(60));
    r.set(record::CRITICAL_THRESHOLD_OCCURRENCES, AlertValue::from("ALL"));
    r.set(record::CLOSE_VIOLATIONS_ON_EXPIRATION, AlertValue::Bool(false));
    r.set(record::EXPIRATION_DURATION, AlertValue::Null);
    r.set(record::POLICY_ID, AlertValue::Null);
    r
}

/// Coerces raw `KEY=VALUE` text by the canonical type of the key.
/// Unrecognized keys stay strings (open mapping).
pub fn coerce_value(key: &str, raw: &str) -> Result<AlertValue> {
    if raw == "null" {
        return Ok(AlertValue::Null);
    }
    if BOOL_FIELDS.contains(&key) {
        return raw
            .parse::<bool>()
            .map(AlertValue::Bool)
            .map_err(|_| AlertError::Validation(format!("{key} expects true or false, got '{raw}'")));
    }
    if NUMBER_FIELDS.contains(&key) {
        return parse_number(raw)
            .map(AlertValue::Num)
            .ok_or_else(|| AlertError::Validation(format!("{key} expects a number, got '{raw}'")));
    }
    Ok(AlertValue::Str(raw.to_string()))
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Number::from(i));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Splits `KEY=VALUE` command-line input and coerces the value.
pub fn parse_assignment(raw: &str) -> Result<(String, AlertValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| AlertError::Validation(format!("expected KEY=VALUE, got '{raw}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AlertError::Validation(format!("empty key in '{raw}'")));
    }
    Ok((key.to_string(), coerce_value(key, value)?))
}

/// Owns the alert list for one editing session and tracks the pending
/// changes alongside, keeping their indices consistent across deletes.
#[derive(Debug)]
pub struct Editor {
    alerts: Vec<AlertRecord>,
    changes: Vec<AlertChange>,
}

impl Editor {
    #[must_use]
    pub fn new(alerts: Vec<AlertRecord>) -> Self {
        Self {
            alerts,
            changes: Vec::new(),
        }
    }

    #[must_use]
    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AlertRecord> {
        self.alerts.get(index)
    }

    #[must_use]
    pub fn changes(&self) -> &[AlertChange] {
        &self.changes
    }

    #[must_use]
    pub fn into_alerts(self) -> Vec<AlertRecord> {
        self.alerts
    }

    /// Appends a templated record; returns its index.
    pub fn add(&mut self) -> usize {
        let index = self.alerts.len();
        self.alerts.push(new_alert_template(index));
        self.changes.push(AlertChange::Added { index });
        index
    }

    /// Merges a partial patch into the record at `index`.
    pub fn update(&mut self, index: usize, patch: &[(String, AlertValue)]) -> Result<()> {
        let record = self
            .alerts
            .get_mut(index)
            .ok_or_else(|| AlertError::Validation(format!("no alert at index {index}")))?;
        for (key, value) in patch {
            record.set(key.clone(), value.clone());
        }
        if !self.changes.contains(&AlertChange::Modified { index })
            && !self.changes.contains(&AlertChange::Added { index })
        {
            self.changes.push(AlertChange::Modified { index });
        }
        Ok(())
    }

    /// Removes the record at `index` and returns its name. Pending changes
    /// pointing past the hole shift left; changes for the removed record
    /// are dropped.
    pub fn delete(&mut self, index: usize) -> Result<String> {
        if index >= self.alerts.len() {
            return Err(AlertError::Validation(format!("no alert at index {index}")));
        }
        let removed = self.alerts.remove(index);
        let name = removed.name().to_string();

        self.changes.retain(|change| match change {
            AlertChange::Added { index: i } | AlertChange::Modified { index: i } => *i != index,
            AlertChange::Deleted { .. } => true,
        });
        for change in &mut self.changes {
            match change {
                AlertChange::Added { index: i } | AlertChange::Modified { index: i } if *i > index => {
                    *i -= 1;
                }
                _ => {}
            }
        }
        self.changes.push(AlertChange::Deleted { name: name.clone() });
        Ok(name)
    }

    /// One-line summary of the pending changes, used for commit messages.
    #[must_use]
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .changes
            .iter()
            .map(|change| match change {
                AlertChange::Added { index } => {
                    format!("add '{}'", self.alert_name(*index))
                }
                AlertChange::Modified { index } => {
                    format!("edit '{}'", self.alert_name(*index))
                }
                AlertChange::Deleted { name } => format!("delete '{name}'"),
            })
            .collect();
        parts.join("; ")
    }

    fn alert_name(&self, index: usize) -> String {
        self.alerts
            .get(index)
            .map(|r| r.name().to_string())
            .unwrap_or_else(|| format!("#{index}"))
    }
}
