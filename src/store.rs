// src/store.rs
//! Load/save pipeline around the block parser and serializer.
//!
//! Save re-reads the file and re-derives the block range immediately
//! before writing, so an edit session never splices against a stale range
//! after the file changed on disk (git operations touch these files).

use crate::alerts::record::AlertRecord;
use crate::alerts::validate;
use crate::error::{AlertError, Result};
use crate::tfvars;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const BACKUP_DIR: &str = ".tfalert_backup";

/// A parsed alert file.
#[derive(Debug)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub content: String,
    pub alerts: Vec<AlertRecord>,
}

/// Reads and parses the alert file, mapping each failure mode onto the
/// error taxonomy: unreadable file, absent block, unparseable contents.
pub fn load(path: &Path) -> Result<LoadedFile> {
    let content = read_text(path)?;
    if tfvars::locate(&content).is_none() {
        return Err(AlertError::BlockNotFound { path: path.to_path_buf() });
    }
    let alerts = tfvars::parse(&content).ok_or_else(|| AlertError::ParseFailed {
        path: path.to_path_buf(),
    })?;
    Ok(LoadedFile {
        path: path.to_path_buf(),
        content,
        alerts,
    })
}

/// Validates and writes the alert list back into the file.
///
/// The current content is re-read and the range re-derived here, not
/// reused from load. The previous content is backed up before the write;
/// nothing in memory is treated as saved until the write returns Ok.
pub fn save(path: &Path, alerts: &[AlertRecord], backup_retention: usize) -> Result<()> {
    let issues = validate::validate_all(alerts);
    if !issues.is_empty() {
        let summary: Vec<String> = issues
            .iter()
            .map(|i| format!("alert {} ('{}'): {}", i.index, i.name, i.problem))
            .collect();
        return Err(AlertError::Validation(summary.join("; ")));
    }

    let content = read_text(path)?;
    let range = tfvars::locate(&content).ok_or_else(|| AlertError::BlockNotFound {
        path: path.to_path_buf(),
    })?;
    let updated = tfvars::splice(&content, alerts, range);

    backup(path, &content, backup_retention)?;
    fs::write(path, updated).map_err(|e| AlertError::io(path, e))
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AlertError::io(path, e))
}

/// Copies the pre-save content into `.tfalert_backup/<timestamp>/` beside
/// the file, then prunes old backups past the retention count.
fn backup(path: &Path, content: &str, retention: usize) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| AlertError::Config(format!("not a file path: {}", path.display())))?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AlertError::Config("system clock before unix epoch".to_string()))?
        .as_secs();

    let folder = parent.join(BACKUP_DIR).join(timestamp.to_string());
    fs::create_dir_all(&folder).map_err(|e| AlertError::io(&folder, e))?;
    let backup_path = folder.join(file_name);
    fs::write(&backup_path, content).map_err(|e| AlertError::io(&backup_path, e))?;

    cleanup_old_backups(&parent.join(BACKUP_DIR), retention);
    Ok(())
}

/// Best-effort: backup pruning never fails a save.
fn cleanup_old_backups(backup_root: &Path, retention: usize) {
    let Ok(entries) = fs::read_dir(backup_root) else {
        return;
    };
    let mut folders: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    folders.sort();
    if folders.len() <= retention {
        return;
    }
    let excess = folders.len() - retention;
    for folder in folders.into_iter().take(excess) {
        let _ = fs::remove_dir_all(folder);
    }
}
