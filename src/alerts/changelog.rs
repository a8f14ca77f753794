// src/alerts/changelog.rs
//! Human-readable diff between an alert snapshot and its edited state,
//! shown for confirmation before save.

use crate::alerts::record::AlertRecord;

/// The fields the editor exposes; passthrough keys are not diffed.
pub const EDITABLE_FIELDS: &[(&str, &str)] = &[
    ("name", "Name"),
    ("description", "Description"),
    ("nrql_query", "NRQL Query"),
    ("runbook_url", "Runbook URL"),
    ("severity", "Severity"),
    ("enabled", "Enabled"),
    ("aggregation_method", "Aggregation Method"),
    ("aggregation_window", "Aggregation Window"),
    ("aggregation_delay", "Aggregation Delay"),
    ("critical_operator", "Critical Operator"),
    ("critical_threshold", "Critical Threshold"),
    ("critical_threshold_duration", "Critical Threshold Duration"),
    ("critical_threshold_occurrences", "Critical Threshold Occurrences"),
    ("close_violations_on_expiration", "Close violations on expiration"),
    ("expiration_duration", "Expiration Duration"),
];

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChangeEntry {
    pub field: String,
    pub label: String,
    pub from: String,
    pub to: String,
}

/// Diffs over the fixed editable-field set. Missing and null both read as
/// empty, shown as `(empty)`.
#[must_use]
pub fn diff(original: &AlertRecord, current: &AlertRecord) -> Vec<ChangeEntry> {
    let mut entries = Vec::new();
    for (field, label) in EDITABLE_FIELDS {
        let from = field_text(original, field);
        let to = field_text(current, field);
        if from != to {
            entries.push(ChangeEntry {
                field: (*field).to_string(),
                label: (*label).to_string(),
                from: display_or_empty(from),
                to: display_or_empty(to),
            });
        }
    }
    entries
}

fn field_text(record: &AlertRecord, field: &str) -> String {
    record.get(field).map(ToString::to_string).unwrap_or_default()
}

fn display_or_empty(s: String) -> String {
    if s.is_empty() {
        "(empty)".to_string()
    } else {
        s
    }
}
