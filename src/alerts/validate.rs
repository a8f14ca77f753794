// src/alerts/validate.rs
//! Pre-save validation. A record that would corrupt the block syntax or
//! serialize an unusable expiration pair is rejected before anything is
//! written.

use crate::alerts::record::{
    AlertRecord, AlertValue, CLOSE_VIOLATIONS_ON_EXPIRATION, DESCRIPTION, EXPIRATION_DURATION,
    NAME, NRQL_QUERY, RUNBOOK_URL,
};
use regex::Regex;
use std::sync::LazyLock;

// Brackets and braces inside these fields would defeat the range scanner
// on the next load, so they are forbidden outright.
static FORBIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]{}]").unwrap_or_else(|_| panic!("Invalid Regex")));

const GUARDED_FIELDS: &[&str] = &[NAME, DESCRIPTION, NRQL_QUERY, RUNBOOK_URL];

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    pub index: usize,
    pub name: String,
    pub problem: String,
}

#[must_use]
pub fn has_forbidden_chars(s: &str) -> bool {
    FORBIDDEN_RE.is_match(s)
}

/// True when the expiration gate is set but the duration is missing,
/// non-numeric, or negative. A gate that is not exactly `true` makes the
/// duration irrelevant (the serializer omits the pair entirely).
#[must_use]
pub fn expiration_invalid(record: &AlertRecord) -> bool {
    if record.get(CLOSE_VIOLATIONS_ON_EXPIRATION) != Some(&AlertValue::Bool(true)) {
        return false;
    }
    match record.get(EXPIRATION_DURATION).and_then(AlertValue::as_f64) {
        Some(n) => n < 0.0,
        None => true,
    }
}

/// All problems with a single record.
#[must_use]
pub fn record_issues(record: &AlertRecord) -> Vec<String> {
    let mut problems = Vec::new();
    for field in GUARDED_FIELDS {
        if has_forbidden_chars(record.str_field(field)) {
            problems.push(format!("{field} contains a forbidden character ([ ] {{ }})"));
        }
    }
    if expiration_invalid(record) {
        problems.push("expiration_duration must be a non-negative number when close_violations_on_expiration is true".to_string());
    }
    problems
}

/// Validates the whole list; empty result means the list is saveable.
#[must_use]
pub fn validate_all(alerts: &[AlertRecord]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (index, record) in alerts.iter().enumerate() {
        for problem in record_issues(record) {
            issues.push(ValidationIssue {
                index,
                name: record.name().to_string(),
                problem,
            });
        }
    }
    issues
}
