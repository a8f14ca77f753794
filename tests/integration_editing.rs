// tests/integration_editing.rs
// Full editing sessions against a real file: load, edit, save, reload.
use std::fs;
use std::path::PathBuf;
use tfalert_core::alerts::record::AlertValue;
use tfalert_core::alerts::{changelog, edit, Editor};
use tfalert_core::error::AlertError;
use tfalert_core::store;
use tempfile::TempDir;

const SAMPLE: &str = concat!(
    "# production alerts, managed by tooling\n",
    "region = \"eu-west-1\"\n",
    "\n",
    "nr_nrql_alerts = [\n",
    "  {\n",
    "    \"name\" = \"CPU High\"\n",
    "    \"nrql_query\" = \"SELECT average(cpuPercent) FROM SystemSample\"\n",
    "    \"severity\" = \"CRITICAL\"\n",
    "    \"enabled\" = true\n",
    "    \"critical_threshold\" = 90\n",
    "  },\n",
    "  {\n",
    "    \"name\" = \"Disk Low\"\n",
    "    \"severity\" = \"WARNING\"\n",
    "    \"enabled\" = false\n",
    "  }\n",
    "]\n",
    "\n",
    "dashboard_ids = [\"abc\", \"def\"]\n",
);

fn sample_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("auto.tfvars");
    fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn edit_session_updates_one_record_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);

    let loaded = store::load(&path).unwrap();
    let mut editor = Editor::new(loaded.alerts);
    let snapshot = editor.get(0).cloned().unwrap();

    let patch = vec![
        edit::parse_assignment("critical_threshold=95").unwrap(),
        edit::parse_assignment("enabled=false").unwrap(),
    ];
    editor.update(0, &patch).unwrap();

    let entries = changelog::diff(&snapshot, editor.get(0).unwrap());
    let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Enabled", "Critical Threshold"]);

    store::save(&path, editor.alerts(), 5).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# production alerts, managed by tooling\n"));
    assert!(content.ends_with("dashboard_ids = [\"abc\", \"def\"]\n"));

    let reloaded = store::load(&path).unwrap();
    assert_eq!(reloaded.alerts.len(), 2);
    assert_eq!(
        reloaded.alerts[0].get("critical_threshold"),
        Some(&AlertValue::from(95))
    );
    // The untouched record survives byte-for-byte in value terms.
    assert_eq!(reloaded.alerts[1].name(), "Disk Low");
    assert_eq!(reloaded.alerts[1].get("enabled"), Some(&AlertValue::Bool(false)));
}

#[test]
fn add_then_delete_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);

    let loaded = store::load(&path).unwrap();
    let mut editor = Editor::new(loaded.alerts);
    let index = editor.add();
    editor
        .update(index, &[("name".to_string(), AlertValue::from("Fresh"))])
        .unwrap();
    store::save(&path, editor.alerts(), 5).unwrap();

    let mut editor = Editor::new(store::load(&path).unwrap().alerts);
    assert_eq!(editor.alerts().len(), 3);
    assert_eq!(editor.alerts()[2].name(), "Fresh");

    let removed = editor.delete(2).unwrap();
    assert_eq!(removed, "Fresh");
    store::save(&path, editor.alerts(), 5).unwrap();

    let reloaded = store::load(&path).unwrap();
    let names: Vec<_> = reloaded.alerts.iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, vec!["CPU High", "Disk Low"]);
}

#[test]
fn save_validation_keeps_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);

    let mut loaded = store::load(&path).unwrap();
    loaded.alerts[0].set("nrql_query", AlertValue::from("SELECT x FROM [bad]"));

    assert!(matches!(
        store::save(&path, &loaded.alerts, 5),
        Err(AlertError::Validation(_))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
    assert!(!dir.path().join(store::BACKUP_DIR).exists());
}

#[test]
fn repeated_saves_respect_backup_retention() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);
    let loaded = store::load(&path).unwrap();

    for _ in 0..3 {
        store::save(&path, &loaded.alerts, 1).unwrap();
    }
    let backup_root = dir.path().join(store::BACKUP_DIR);
    let folders: Vec<_> = fs::read_dir(backup_root).unwrap().collect();
    assert!(folders.len() <= 1, "retention of 1 kept {} folders", folders.len());
}

#[test]
fn fmt_style_save_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_file(&dir);

    // First save canonicalizes the block formatting.
    let loaded = store::load(&path).unwrap();
    store::save(&path, &loaded.alerts, 5).unwrap();
    let once = fs::read_to_string(&path).unwrap();

    // A second save of the reloaded list changes nothing.
    let reloaded = store::load(&path).unwrap();
    store::save(&path, &reloaded.alerts, 5).unwrap();
    let twice = fs::read_to_string(&path).unwrap();
    assert_eq!(once, twice);
}
