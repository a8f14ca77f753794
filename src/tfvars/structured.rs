// src/tfvars/structured.rs
//! Whole-document parse delegated to hcl-rs.

use crate::alerts::record::AlertRecord;
use crate::tfvars::locator::BLOCK_KEY;

/// Parses `text` as an HCL document and extracts the `nr_nrql_alerts`
/// array. Every failure mode (parse error, key absent, non-array value,
/// off-grammar record shape) collapses to `None`; the error never crosses
/// this boundary. The result is advisory — callers fall back to the
/// chunked parse on `None` rather than trusting a single attempt.
#[must_use]
pub fn parse_document(text: &str) -> Option<Vec<AlertRecord>> {
    let value: hcl::Value = hcl::from_str(text).ok()?;
    let raw = find_alerts_array(&value)?;
    records_from_array(raw)
}

/// Finds the array bound to the block key. Objects are checked directly;
/// arrays of top-level blocks are searched recursively for the first
/// element exposing the key.
fn find_alerts_array(value: &hcl::Value) -> Option<&Vec<hcl::Value>> {
    match value {
        hcl::Value::Object(map) => map.get(BLOCK_KEY).and_then(hcl::Value::as_array),
        hcl::Value::Array(items) => items.iter().find_map(find_alerts_array),
        _ => None,
    }
}

fn records_from_array(raw: &[hcl::Value]) -> Option<Vec<AlertRecord>> {
    raw.iter()
        .map(|item| item.as_object().and_then(AlertRecord::from_hcl_object))
        .collect()
}
