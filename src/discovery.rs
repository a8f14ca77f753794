// src/discovery.rs
//! Finds the stacks (directories) that carry an alert definitions file.

use crate::config::Settings;
use crate::error::{AlertError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PRUNE_DIRS: &[&str] = &[".git", ".terraform", "node_modules", "target"];

/// Lists stack directories under the conventional stacks path that
/// contain the alerts file, sorted by name.
pub fn list_stacks(settings: &Settings) -> Result<Vec<String>> {
    let stacks_dir = settings.stacks_dir()?;
    let entries = fs::read_dir(&stacks_dir).map_err(|e| AlertError::io(&stacks_dir, e))?;

    let mut stacks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AlertError::io(&stacks_dir, e))?;
        let path = entry.path();
        if path.is_dir() && path.join(&settings.file_name).is_file() {
            stacks.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    stacks.sort();
    Ok(stacks)
}

/// Walks the whole data directory for alert files, for repositories that
/// do not follow the conventional stacks layout. Unreadable entries are
/// skipped rather than failing the walk.
pub fn find_alert_files(settings: &Settings) -> Result<Vec<PathBuf>> {
    let root = settings.data_dir.clone().ok_or_else(|| {
        AlertError::Config("data_dir is not set (tfalert config data_dir <path>)".to_string())
    })?;

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !should_prune(e.path()));

    let mut files: Vec<PathBuf> = walker
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy() == settings.file_name)
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    Ok(files)
}

fn should_prune(path: &Path) -> bool {
    path.file_name()
        .map(|name| PRUNE_DIRS.iter().any(|d| name == std::ffi::OsStr::new(d)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(dir: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.data_dir = Some(dir.to_path_buf());
        settings.stacks_path = "stacks".to_string();
        settings
    }

    #[test]
    fn lists_only_stacks_with_alert_file() {
        let dir = tempfile::tempdir().unwrap();
        let stacks = dir.path().join("stacks");
        fs::create_dir_all(stacks.join("beta")).unwrap();
        fs::create_dir_all(stacks.join("alpha")).unwrap();
        fs::create_dir_all(stacks.join("empty")).unwrap();
        fs::write(stacks.join("beta/auto.tfvars"), "x = 1\n").unwrap();
        fs::write(stacks.join("alpha/auto.tfvars"), "x = 1\n").unwrap();

        let found = list_stacks(&settings_for(dir.path())).unwrap();
        assert_eq!(found, vec!["alpha", "beta"]);
    }

    #[test]
    fn walk_finds_nested_files_and_prunes_noise() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::create_dir_all(dir.path().join(".terraform/modules")).unwrap();
        fs::write(dir.path().join("a/b/auto.tfvars"), "x = 1\n").unwrap();
        fs::write(dir.path().join(".terraform/modules/auto.tfvars"), "x = 1\n").unwrap();

        let found = find_alert_files(&settings_for(dir.path())).unwrap();
        assert_eq!(found, vec![dir.path().join("a/b/auto.tfvars")]);
    }

    #[test]
    fn missing_stacks_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_stacks(&settings_for(dir.path()));
        assert!(matches!(result, Err(AlertError::Io { .. })));
    }
}
