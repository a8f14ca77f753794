// src/config.rs
//! Tool settings, persisted as `tfalert.toml` next to where the tool runs.

use crate::error::{AlertError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "tfalert.toml";

/// Conventional location of the per-stack alert files inside the
/// infrastructure repository.
pub const DEFAULT_STACKS_PATH: &str = "metaform/mpm/copies/production/prd/eu-west-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the infrastructure repository holding the tfvars files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Relative path from `data_dir` to the stack directories.
    #[serde(default = "default_stacks_path")]
    pub stacks_path: String,
    /// Name of the alert definitions file inside each stack directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// How many timestamped pre-save backups to keep per file.
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
    /// Commit the edited file after every successful save.
    #[serde(default)]
    pub auto_commit: bool,
}

fn default_stacks_path() -> String {
    DEFAULT_STACKS_PATH.to_string()
}

fn default_file_name() -> String {
    "auto.tfvars".to_string()
}

fn default_backup_retention() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            stacks_path: default_stacks_path(),
            file_name: default_file_name(),
            backup_retention: default_backup_retention(),
            auto_commit: false,
        }
    }
}

impl Settings {
    /// Loads settings from `tfalert.toml` in the working directory.
    /// A missing or unreadable file yields defaults; a malformed file is
    /// reported and yields defaults rather than aborting.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("warning: ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Writes settings to `tfalert.toml` in the working directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AlertError::Config(format!("could not serialize settings: {e}")))?;
        fs::write(path, content).map_err(|e| AlertError::io(path, e))
    }

    /// Value of one settings key, rendered as text.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(
                self.data_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "stacks_path" => Some(self.stacks_path.clone()),
            "file_name" => Some(self.file_name.clone()),
            "backup_retention" => Some(self.backup_retention.to_string()),
            "auto_commit" => Some(self.auto_commit.to_string()),
            _ => None,
        }
    }

    /// Sets one settings key from text, with per-key coercion.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "stacks_path" => self.stacks_path = value.to_string(),
            "file_name" => self.file_name = value.to_string(),
            "backup_retention" => {
                self.backup_retention = value.parse().map_err(|_| {
                    AlertError::Config(format!("backup_retention expects a number, got '{value}'"))
                })?;
            }
            "auto_commit" => {
                self.auto_commit = value.parse().map_err(|_| {
                    AlertError::Config(format!("auto_commit expects true or false, got '{value}'"))
                })?;
            }
            _ => return Err(AlertError::Config(format!("unknown settings key '{key}'"))),
        }
        Ok(())
    }

    /// Directory holding the stack directories.
    pub fn stacks_dir(&self) -> Result<PathBuf> {
        let data_dir = self.data_dir.as_ref().ok_or_else(|| {
            AlertError::Config("data_dir is not set (tfalert config data_dir <path>)".to_string())
        })?;
        Ok(data_dir.join(&self.stacks_path))
    }

    /// Path of the alert definitions file for one stack.
    pub fn alerts_file(&self, stack: &str) -> Result<PathBuf> {
        Ok(self.stacks_dir()?.join(stack).join(&self.file_name))
    }
}
