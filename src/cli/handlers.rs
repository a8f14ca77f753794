// src/cli/handlers.rs
use crate::alerts::record::{AlertValue, NAME, SEVERITY};
use crate::alerts::{changelog, edit, validate, Editor};
use crate::config::Settings;
use crate::discovery;
use crate::error::AlertError;
use crate::exit::TfAlertExit;
use crate::git::{self, CommitResult};
use crate::store;
use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// A target is either a stack name resolved through the settings, or a
/// direct path to a tfvars file.
fn resolve_target(settings: &Settings, target: &str) -> std::result::Result<PathBuf, AlertError> {
    let as_path = Path::new(target);
    if target.contains(std::path::MAIN_SEPARATOR)
        || target.ends_with(".tfvars")
        || as_path.is_file()
    {
        Ok(as_path.to_path_buf())
    } else {
        settings.alerts_file(target)
    }
}

/// Prints a domain error and maps it onto the exit-code contract.
fn report(e: AlertError) -> TfAlertExit {
    eprintln!("{} {e}", "error:".red().bold());
    TfAlertExit::from(e)
}

fn load_target(settings: &Settings, target: &str) -> std::result::Result<store::LoadedFile, AlertError> {
    let path = resolve_target(settings, target)?;
    store::load(&path)
}

/// Handles the stacks command.
///
/// # Errors
/// Returns error if JSON serialization fails (discovery errors map to exit codes).
pub fn handle_stacks(walk: bool) -> Result<TfAlertExit> {
    let settings = Settings::load();
    if walk {
        let files = match discovery::find_alert_files(&settings) {
            Ok(files) => files,
            Err(e) => return Ok(report(e)),
        };
        if files.is_empty() {
            println!("{}", "No alert files found.".yellow());
        }
        for file in files {
            println!("{}", file.display());
        }
        return Ok(TfAlertExit::Success);
    }

    let stacks = match discovery::list_stacks(&settings) {
        Ok(stacks) => stacks,
        Err(e) => return Ok(report(e)),
    };
    if stacks.is_empty() {
        println!("{}", "No stacks found.".yellow());
    }
    for stack in stacks {
        println!("{stack}");
    }
    Ok(TfAlertExit::Success)
}

/// Handles the show command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_show(target: &str, json: bool, full: bool) -> Result<TfAlertExit> {
    let settings = Settings::load();
    let loaded = match load_target(&settings, target) {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report(e)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.alerts)?);
        return Ok(TfAlertExit::Success);
    }

    println!(
        "{} ({} alerts)",
        loaded.path.display().to_string().bold(),
        loaded.alerts.len()
    );
    for (index, alert) in loaded.alerts.iter().enumerate() {
        let severity = alert.str_field(SEVERITY);
        let enabled = alert.get("enabled").and_then(AlertValue::as_bool) == Some(true);
        let state = if enabled {
            "enabled".green()
        } else {
            "disabled".yellow()
        };
        println!("[{index}] {} ({severity}, {state})", alert.name().bold());
        if full {
            for (key, value) in alert.iter() {
                if key != NAME {
                    println!("      {key} = {value}");
                }
            }
        }
    }
    Ok(TfAlertExit::Success)
}

/// Handles the add command.
///
/// # Errors
/// Returns error if the post-save commit fails.
pub fn handle_add(
    target: &str,
    name: Option<&str>,
    set: &[String],
    commit: bool,
) -> Result<TfAlertExit> {
    let settings = Settings::load();
    let loaded = match load_target(&settings, target) {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report(e)),
    };

    let mut editor = Editor::new(loaded.alerts);
    let index = editor.add();

    let mut patch = Vec::new();
    if let Some(name) = name {
        patch.push((NAME.to_string(), AlertValue::from(name)));
    }
    match parse_assignments(set) {
        Ok(mut assignments) => patch.append(&mut assignments),
        Err(exit) => return Ok(exit),
    }
    if editor.update(index, &patch).is_err() {
        return Err(anyhow!("internal error: freshly added index {index} vanished"));
    }

    let summary = editor.summary();
    let alerts = editor.into_alerts();
    if let Err(e) = store::save(&loaded.path, &alerts, settings.backup_retention) {
        return Ok(report(e));
    }
    println!(
        "{} Added '{}' to {}",
        "ok:".green().bold(),
        alerts[index].name(),
        loaded.path.display()
    );
    finish_commit(&settings, &loaded.path, commit, &summary)
}

/// Handles the edit command.
///
/// # Errors
/// Returns error if the post-save commit fails.
pub fn handle_edit(
    target: &str,
    index: usize,
    set: &[String],
    dry_run: bool,
    commit: bool,
) -> Result<TfAlertExit> {
    let settings = Settings::load();
    let loaded = match load_target(&settings, target) {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report(e)),
    };

    let mut editor = Editor::new(loaded.alerts);
    let Some(snapshot) = editor.get(index).cloned() else {
        eprintln!("{} no alert at index {index}", "error:".red().bold());
        return Ok(TfAlertExit::InvalidInput);
    };

    let patch = match parse_assignments(set) {
        Ok(patch) => patch,
        Err(exit) => return Ok(exit),
    };
    editor
        .update(index, &patch)
        .map_err(|e| anyhow!("internal error: {e}"))?;

    let current = editor
        .get(index)
        .ok_or_else(|| anyhow!("internal error: edited index {index} vanished"))?;
    let entries = changelog::diff(&snapshot, current);
    if entries.is_empty() {
        println!("No changes for '{}'.", snapshot.name());
        return Ok(TfAlertExit::Success);
    }
    println!("Changes for '{}':", snapshot.name().bold());
    for entry in &entries {
        println!("  {}: {} -> {}", entry.label, entry.from.red(), entry.to.green());
    }
    if dry_run {
        println!("{}", "[dry run] Nothing written.".yellow());
        return Ok(TfAlertExit::Success);
    }

    let summary = editor.summary();
    let alerts = editor.into_alerts();
    if let Err(e) = store::save(&loaded.path, &alerts, settings.backup_retention) {
        return Ok(report(e));
    }
    println!("{} Saved {}", "ok:".green().bold(), loaded.path.display());
    finish_commit(&settings, &loaded.path, commit, &summary)
}

/// Handles the delete command.
///
/// # Errors
/// Returns error if the post-save commit fails.
pub fn handle_delete(target: &str, index: usize, commit: bool) -> Result<TfAlertExit> {
    let settings = Settings::load();
    let loaded = match load_target(&settings, target) {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report(e)),
    };

    let mut editor = Editor::new(loaded.alerts);
    let name = match editor.delete(index) {
        Ok(name) => name,
        Err(_) => {
            eprintln!("{} no alert at index {index}", "error:".red().bold());
            return Ok(TfAlertExit::InvalidInput);
        }
    };

    let summary = editor.summary();
    let alerts = editor.into_alerts();
    if let Err(e) = store::save(&loaded.path, &alerts, settings.backup_retention) {
        return Ok(report(e));
    }
    println!(
        "{} Deleted '{name}' from {}",
        "ok:".green().bold(),
        loaded.path.display()
    );
    finish_commit(&settings, &loaded.path, commit, &summary)
}

/// Handles the check command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_check(target: &str, json: bool) -> Result<TfAlertExit> {
    let settings = Settings::load();
    let loaded = match load_target(&settings, target) {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report(e)),
    };

    let issues = validate::validate_all(&loaded.alerts);
    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else if issues.is_empty() {
        println!(
            "{} {} alerts, nothing to report.",
            "ok:".green().bold(),
            loaded.alerts.len()
        );
    } else {
        for issue in &issues {
            println!(
                "{} alert {} ('{}'): {}",
                "invalid:".red().bold(),
                issue.index,
                issue.name,
                issue.problem
            );
        }
    }
    if issues.is_empty() {
        Ok(TfAlertExit::Success)
    } else {
        Ok(TfAlertExit::ValidationFailed)
    }
}

/// Handles the fmt command.
///
/// # Errors
/// Returns error if the post-save commit fails.
pub fn handle_fmt(target: &str, commit: bool) -> Result<TfAlertExit> {
    let settings = Settings::load();
    let loaded = match load_target(&settings, target) {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report(e)),
    };

    if let Err(e) = store::save(&loaded.path, &loaded.alerts, settings.backup_retention) {
        return Ok(report(e));
    }
    println!("{} Formatted {}", "ok:".green().bold(), loaded.path.display());
    finish_commit(&settings, &loaded.path, commit, "reformat alert block")
}

/// Handles the config command.
///
/// # Errors
/// Returns error if writing the settings file fails.
pub fn handle_config(key: Option<&str>, value: Option<&str>) -> Result<TfAlertExit> {
    let mut settings = Settings::load();
    match (key, value) {
        (None, _) => {
            for key in ["data_dir", "stacks_path", "file_name", "backup_retention", "auto_commit"]
            {
                let value = settings.get(key).unwrap_or_default();
                println!("{key} = {value}");
            }
            Ok(TfAlertExit::Success)
        }
        (Some(key), None) => match settings.get(key) {
            Some(value) => {
                println!("{value}");
                Ok(TfAlertExit::Success)
            }
            None => {
                eprintln!("{} unknown settings key '{key}'", "error:".red().bold());
                Ok(TfAlertExit::InvalidInput)
            }
        },
        (Some(key), Some(value)) => {
            if let Err(e) = settings.set(key, value) {
                eprintln!("{} {e}", "error:".red().bold());
                return Ok(TfAlertExit::InvalidInput);
            }
            settings.save()?;
            println!("{key} = {value}");
            Ok(TfAlertExit::Success)
        }
    }
}

fn parse_assignments(set: &[String]) -> std::result::Result<Vec<(String, AlertValue)>, TfAlertExit> {
    let mut patch = Vec::with_capacity(set.len());
    for raw in set {
        match edit::parse_assignment(raw) {
            Ok(pair) => patch.push(pair),
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                return Err(TfAlertExit::InvalidInput);
            }
        }
    }
    Ok(patch)
}

fn finish_commit(
    settings: &Settings,
    path: &Path,
    requested: bool,
    message: &str,
) -> Result<TfAlertExit> {
    if !requested && !settings.auto_commit {
        return Ok(TfAlertExit::Success);
    }
    match git::commit_file(path, &format!("tfalert: {message}")) {
        Ok(CommitResult::Committed) => {
            println!("{} Committed {}", "ok:".green().bold(), path.display());
            Ok(TfAlertExit::Success)
        }
        Ok(CommitResult::NothingToCommit) => {
            println!("Nothing to commit.");
            Ok(TfAlertExit::Success)
        }
        Err(e) => Ok(report(e)),
    }
}
