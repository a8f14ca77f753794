// src/tfvars/render.rs
//! Renders the alert list back into block text and splices it over the
//! located range. The block itself is fully re-rendered; nothing outside
//! the range changes except a trailing-newline collapse at end of file.

use crate::alerts::record::{
    AlertRecord, AlertValue, CANONICAL_ORDER, CLOSE_VIOLATIONS_ON_EXPIRATION, EXPIRATION_DURATION,
};
use crate::tfvars::locator::{BlockRange, BLOCK_KEY};

/// Serializes the full block, newline-terminated. Deterministic: the same
/// list always renders to byte-identical text.
#[must_use]
pub fn serialize(alerts: &[AlertRecord]) -> String {
    let inner: Vec<String> = alerts.iter().map(serialize_record).collect();
    format!("{BLOCK_KEY} = [\n{}\n]\n", inner.join(",\n"))
}

/// Replaces exactly `[range.start, range.end)` of `original` with the
/// rendered block, then collapses any run of trailing newlines at end of
/// file to exactly one.
#[must_use]
pub fn splice(original: &str, alerts: &[AlertRecord], range: BlockRange) -> String {
    let block = serialize(alerts);
    let mut out = String::with_capacity(original.len() + block.len());
    out.push_str(&original[..range.start]);
    out.push_str(&block);
    out.push_str(&original[range.end..]);
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn serialize_record(record: &AlertRecord) -> String {
    // Cross-field emission rule: a stale expiration pair in the record is
    // tolerated in memory but never written unless the gate is exactly true.
    let omit_expiration =
        record.get(CLOSE_VIOLATIONS_ON_EXPIRATION) != Some(&AlertValue::Bool(true));

    let mut lines = Vec::with_capacity(record.len());
    for key in CANONICAL_ORDER {
        if omit_expiration && matches!(*key, EXPIRATION_DURATION | CLOSE_VIOLATIONS_ON_EXPIRATION)
        {
            continue;
        }
        if let Some(value) = record.get(key) {
            lines.push(render_pair(key, value));
        }
    }
    for (key, value) in record.iter() {
        if !CANONICAL_ORDER.contains(&key.as_str()) {
            lines.push(render_pair(key, value));
        }
    }
    format!("  {{\n{}\n  }}", lines.join("\n"))
}

fn render_pair(key: &str, value: &AlertValue) -> String {
    format!("    \"{}\" = {}", key.replace('"', "\\\""), render_value(value))
}

fn render_value(value: &AlertValue) -> String {
    match value {
        AlertValue::Bool(b) => b.to_string(),
        AlertValue::Num(n) => n.to_string(),
        AlertValue::Null => "null".to_string(),
        AlertValue::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfvars::locator;

    fn record(pairs: &[(&str, AlertValue)]) -> AlertRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn renders_canonical_order_regardless_of_insertion_order() {
        let alerts = vec![record(&[
            ("enabled", AlertValue::Bool(true)),
            ("name", AlertValue::from("A")),
            ("severity", AlertValue::from("CRITICAL")),
        ])];
        let text = serialize(&alerts);
        let name_at = text.find("\"name\"").unwrap();
        let severity_at = text.find("\"severity\"").unwrap();
        let enabled_at = text.find("\"enabled\"").unwrap();
        assert!(name_at < severity_at && severity_at < enabled_at);
    }

    #[test]
    fn passthrough_keys_follow_in_iteration_order() {
        let alerts = vec![record(&[
            ("custom_b", AlertValue::from(2)),
            ("name", AlertValue::from("A")),
            ("custom_a", AlertValue::from(1)),
        ])];
        let text = serialize(&alerts);
        let b_at = text.find("custom_b").unwrap();
        let a_at = text.find("custom_a").unwrap();
        assert!(text.find("\"name\"").unwrap() < b_at);
        assert!(b_at < a_at);
    }

    #[test]
    fn value_formatting() {
        let alerts = vec![record(&[
            ("name", AlertValue::from("say \"hi\" \\ done")),
            ("enabled", AlertValue::Bool(false)),
            ("critical_threshold", AlertValue::from(5)),
            ("fill_value", AlertValue::Num(serde_json::Number::from_f64(0.5).unwrap())),
            ("policy_id", AlertValue::Null),
        ])];
        let text = serialize(&alerts);
        assert!(text.contains(r#""name" = "say \"hi\" \\ done""#));
        assert!(text.contains("\"enabled\" = false"));
        assert!(text.contains("\"critical_threshold\" = 5"));
        assert!(text.contains("\"fill_value\" = 0.5"));
        assert!(text.contains("\"policy_id\" = null"));
    }

    #[test]
    fn conditional_omission_when_gate_not_true() {
        let alerts = vec![record(&[
            ("name", AlertValue::from("A")),
            ("close_violations_on_expiration", AlertValue::Bool(false)),
            ("expiration_duration", AlertValue::from(120)),
        ])];
        let text = serialize(&alerts);
        assert!(!text.contains("close_violations_on_expiration"));
        assert!(!text.contains("expiration_duration"));
    }

    #[test]
    fn expiration_pair_emitted_when_gate_true() {
        let alerts = vec![record(&[
            ("name", AlertValue::from("A")),
            ("close_violations_on_expiration", AlertValue::Bool(true)),
            ("expiration_duration", AlertValue::from(120)),
        ])];
        let text = serialize(&alerts);
        assert!(text.contains("\"close_violations_on_expiration\" = true"));
        assert!(text.contains("\"expiration_duration\" = 120"));
        // Canonical order puts the duration before the gate.
        assert!(
            text.find("expiration_duration").unwrap()
                < text.find("close_violations_on_expiration").unwrap()
        );
    }

    #[test]
    fn serialization_is_idempotent() {
        let alerts = vec![
            record(&[("name", AlertValue::from("A")), ("enabled", AlertValue::Bool(true))]),
            record(&[("name", AlertValue::from("B"))]),
        ];
        assert_eq!(serialize(&alerts), serialize(&alerts));
    }

    #[test]
    fn splice_preserves_surrounding_bytes() {
        let original = "region = \"x\"\nnr_nrql_alerts = [\n  {\n    \"name\" = \"Old\"\n  }\n]\ntrailing = true\n";
        let range = locator::locate(original).unwrap();
        let alerts = vec![record(&[("name", AlertValue::from("New"))])];
        let updated = splice(original, &alerts, range);
        assert!(updated.starts_with("region = \"x\"\n"));
        assert!(updated.ends_with("\ntrailing = true\n"));
        assert_eq!(&updated[..range.start], &original[..range.start]);
        assert!(updated.contains("\"name\" = \"New\""));
        assert!(!updated.contains("Old"));
    }

    #[test]
    fn splice_collapses_trailing_newlines() {
        let original = "nr_nrql_alerts = [\n]\n\n\n";
        let range = locator::locate(original).unwrap();
        let updated = splice(original, &[], range);
        assert!(updated.ends_with(']') || updated.ends_with("]\n"));
        assert!(!updated.ends_with("\n\n"));
    }

    #[test]
    fn empty_list_renders_empty_block() {
        assert_eq!(serialize(&[]), "nr_nrql_alerts = [\n\n]\n");
    }
}
