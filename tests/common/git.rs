//! Git testing utilities

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Checks whether the `git` executable can be run
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Sets up a git repository with user config
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let init_result = Command::new("git")
        .args(["init", "-q"])
        .current_dir(path)
        .output()?;

    if !init_result.status.success() {
        anyhow::bail!("Git not available - skipping test");
    }

    for (key, value) in [
        ("user.name", "Test User"),
        ("user.email", "test@example.com"),
        ("commit.gpgsign", "false"),
    ] {
        Command::new("git")
            .args(["config", key, value])
            .current_dir(path)
            .output()?;
    }

    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;

    Command::new("git")
        .args(["add", file_name])
        .current_dir(path)
        .output()?;

    let commit_result = Command::new("git")
        .args(["commit", "-q", "-m", message])
        .current_dir(path)
        .output()?;

    if !commit_result.status.success() {
        anyhow::bail!(
            "Failed to create commit: {}",
            String::from_utf8_lossy(&commit_result.stderr)
        );
    }

    Ok(())
}

/// Pushes the current branch of `work` to `origin`, setting it as upstream
pub fn push_to_origin(work: &Path) -> Result<()> {
    let push_result = Command::new("git")
        .args(["push", "-q", "-u", "origin", "HEAD"])
        .current_dir(work)
        .output()?;

    if !push_result.status.success() {
        anyhow::bail!(
            "Failed to push: {}",
            String::from_utf8_lossy(&push_result.stderr)
        );
    }

    Ok(())
}

/// Creates `<parent>/<name>.git` as a bare repository with one commit
///
/// Returns the bare repository path (usable as a clone URL) and the
/// scratch working copy used to seed it, so tests can push more commits.
pub fn create_bare_origin(parent: &Path, name: &str) -> Result<(PathBuf, PathBuf)> {
    let bare = parent.join(format!("{name}.git"));
    let work = parent.join(format!("{name}-seed"));
    std::fs::create_dir_all(&work)?;

    setup_git_repo(&work)?;
    create_test_commit(&work, "README.md", &format!("# {name}\n"), "Initial commit")?;

    let clone_result = Command::new("git")
        .args(["clone", "-q", "--bare"])
        .arg(&work)
        .arg(&bare)
        .output()?;
    if !clone_result.status.success() {
        anyhow::bail!(
            "Failed to create bare repo: {}",
            String::from_utf8_lossy(&clone_result.stderr)
        );
    }

    Command::new("git")
        .args(["remote", "add", "origin"])
        .arg(&bare)
        .current_dir(&work)
        .output()?;
    push_to_origin(&work)?;

    Ok((bare, work))
}
