// src/tfvars/chunks.rs
//! Object-by-object fallback parse of the alert block.
//!
//! Splitting the block into `{ ... }` chunks bounds the input any single
//! parse call ever sees to one alert's worth of text, which keeps a very
//! large block (hundreds of alerts) parseable even when a whole-document
//! attempt produces nothing.

use crate::alerts::record::AlertRecord;
use crate::tfvars::locator::BLOCK_KEY;
use crate::tfvars::{brackets, locator, object, structured};

/// Re-derives the block range and parses the array contents one object at
/// a time. All-or-nothing: an unmatched `{`, an unparseable chunk, or zero
/// chunks total yields `None` — never a partial list.
#[must_use]
pub fn parse_in_chunks(text: &str) -> Option<Vec<AlertRecord>> {
    let range = locator::locate(text)?;
    let open_at = range.start + text[range.start..range.end].find('[')?;
    let inner = &text[open_at + 1..range.end - 1];

    let mut alerts = Vec::new();
    let mut i = 0;
    while let Some(rel) = inner[i..].find('{') {
        let open = i + rel;
        let close = brackets::find_matching(inner, open, b'{', b'}')?;
        let chunk = &inner[open..=close];
        alerts.push(parse_chunk(chunk)?);
        i = close + 1;
    }

    if alerts.is_empty() {
        None
    } else {
        Some(alerts)
    }
}

/// Parses one object slice by re-wrapping it as a minimal single-element
/// block and running the structured parse; the dedicated object parser
/// covers separator styles the strict grammar rejects.
fn parse_chunk(chunk: &str) -> Option<AlertRecord> {
    let wrapped = format!("{BLOCK_KEY} = [ {chunk} ]\n");
    if let Some(mut parsed) = structured::parse_document(&wrapped) {
        if !parsed.is_empty() {
            return Some(parsed.remove(0));
        }
    }
    object::parse_object(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::record::AlertValue;
    use crate::tfvars;

    const TWO_ALERTS: &str = concat!(
        "region = \"eu-west-1\"\n",
        "nr_nrql_alerts = [\n",
        "  {\n",
        "    \"name\" = \"First\"\n",
        "    \"critical_threshold\" = 5\n",
        "  },\n",
        "  {\n",
        "    \"name\" = \"Second\"\n",
        "    \"enabled\" = true\n",
        "  }\n",
        "]\n",
    );

    #[test]
    fn matches_whole_document_parse() {
        let whole = structured::parse_document(TWO_ALERTS).unwrap();
        let chunked = parse_in_chunks(TWO_ALERTS).unwrap();
        assert_eq!(whole, chunked);
    }

    #[test]
    fn preserves_order() {
        let alerts = parse_in_chunks(TWO_ALERTS).unwrap();
        let names: Vec<_> = alerts.iter().map(AlertRecord::name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn all_or_nothing_on_unbalanced_chunk() {
        let text = concat!(
            "nr_nrql_alerts = [\n",
            "  {\n    \"name\" = \"Good\"\n  },\n",
            "  {\n    \"name\" = \"Bad\"\n",
            "]\n",
        );
        // The second { never closes inside the block, so the whole parse
        // fails rather than returning just the good record.
        assert!(parse_in_chunks(text).is_none());
    }

    #[test]
    fn all_or_nothing_on_unparseable_chunk() {
        let text = "nr_nrql_alerts = [\n  {\n    \"name\" = \"Good\"\n  },\n  { %%% }\n]\n";
        assert!(parse_in_chunks(text).is_none());
    }

    #[test]
    fn none_when_block_missing() {
        assert!(parse_in_chunks("foo = 1\n").is_none());
    }

    #[test]
    fn none_when_zero_chunks() {
        assert!(parse_in_chunks("nr_nrql_alerts = [\n]\n").is_none());
    }

    #[test]
    fn single_line_pairs_parse_through_fallback() {
        let text = r#"nr_nrql_alerts = [ { "name" = "A" "enabled" = true "critical_threshold" = 5 } ]"#;
        let alerts = parse_in_chunks(text).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].name(), "A");
        assert_eq!(alerts[0].get("enabled"), Some(&AlertValue::Bool(true)));
        assert_eq!(alerts[0].get("critical_threshold"), Some(&AlertValue::from(5)));
    }

    #[test]
    fn braces_inside_query_strings_do_not_split_chunks() {
        let text = concat!(
            "nr_nrql_alerts = [\n",
            "  {\n",
            "    \"name\" = \"Q\"\n",
            "    \"nrql_query\" = \"SELECT latest(x) FROM T FACET `{tag}`\"\n",
            "  }\n",
            "]\n",
        );
        let alerts = parse_in_chunks(text).unwrap();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].str_field("nrql_query").contains("{tag}"));
    }

    #[test]
    fn top_level_parse_falls_back_to_chunks() {
        // Single-line pairs defeat the strict whole-document grammar but
        // must still parse through the public entry point.
        let text = r#"nr_nrql_alerts = [ { "name" = "A" "enabled" = true } ]"#;
        assert!(structured::parse_document(text).is_none());
        let alerts = tfvars::parse(text).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].name(), "A");
    }
}
