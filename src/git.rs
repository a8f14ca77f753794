// src/git.rs
//! Optional git commit of the edited alerts file.

use crate::error::{AlertError, Result};
use std::path::Path;
use std::process::Command;

/// Checks whether `dir` is inside a git work tree.
#[must_use]
pub fn in_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .current_dir(dir)
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Stages and commits a single file. A file with no changes is a no-op,
/// not an error.
pub fn commit_file(path: &Path, message: &str) -> Result<CommitResult> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AlertError::Git(format!("not a file path: {}", path.display())))?;

    if !in_git_repo(dir) {
        return Err(AlertError::Git(format!(
            "{} is not inside a git repository",
            dir.display()
        )));
    }

    if run_git(dir, &["status", "--porcelain", "--", file])?.is_empty() {
        return Ok(CommitResult::NothingToCommit);
    }

    run_git(dir, &["add", "--", file])?;
    run_git(dir, &["commit", "-m", message, "--", file])?;
    Ok(CommitResult::Committed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    Committed,
    NothingToCommit,
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .map_err(|e| AlertError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AlertError::Git(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
