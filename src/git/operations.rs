//! Basic git operations and command execution

use anyhow::Result;
use std::ffi::OsStr;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use crate::core::config::GIT_METADATA_MARKER;

/// Runs a git command in the specified directory with an optional timeout
/// Returns (success, stdout, stderr)
pub async fn run_git<I, S>(path: &Path, args: I, timeout: Option<Duration>) -> Result<(bool, String, String)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(path)
        // Fail instead of blocking on a credential prompt
        .env("GIT_TERMINAL_PROMPT", "0")
        .kill_on_drop(true);

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result?,
            Err(_) => anyhow::bail!("git operation timed out after {} seconds", limit.as_secs()),
        },
        None => command.output().await?,
    };

    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    ))
}

/// Check if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .map_while(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// Returns true if `path` is a directory holding git metadata
///
/// Accepts a `.git` directory or a `.git` file pointing elsewhere, as
/// worktrees and submodules use.
pub fn is_git_working_copy(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    let marker = path.join(GIT_METADATA_MARKER);
    marker.is_dir() || (marker.is_file() && is_git_file(&marker))
}

/// Clones `remote` into `dest`; the parent of `dest` must exist
/// Returns (success, stdout, stderr)
pub async fn clone_repository(
    remote: &str,
    dest: &Path,
    timeout: Option<Duration>,
) -> Result<(bool, String, String)> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let args: [&OsStr; 3] = [OsStr::new("clone"), OsStr::new(remote), dest.as_os_str()];
    run_git(parent, args, timeout).await
}

/// Pulls the current branch of the working copy at `path`
/// Returns (success, stdout, stderr)
pub async fn pull_repository(path: &Path, timeout: Option<Duration>) -> Result<(bool, String, String)> {
    run_git(path, ["pull"], timeout).await
}
