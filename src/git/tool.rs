//! Version-control tool boundary used by the synchronizer.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use super::operations::{clone_repository, is_git_working_copy, pull_repository};
use crate::sync::SyncError;

/// Clone and update operations delegated to an external tool.
#[async_trait]
pub trait VcsTool: Send + Sync {
    /// Whether `path` already holds a working copy.
    async fn is_working_copy(&self, path: &Path) -> bool;

    /// Creates `dest` as a working copy of `remote`.
    async fn clone_repo(&self, remote: &str, dest: &Path) -> Result<(), SyncError>;

    /// Brings the working copy at `path` up to date.
    async fn update_repo(&self, path: &Path) -> Result<(), SyncError>;
}

#[async_trait]
impl<'a, T: VcsTool + ?Sized> VcsTool for &'a T {
    async fn is_working_copy(&self, path: &Path) -> bool {
        (**self).is_working_copy(path).await
    }

    async fn clone_repo(&self, remote: &str, dest: &Path) -> Result<(), SyncError> {
        (**self).clone_repo(remote, dest).await
    }

    async fn update_repo(&self, path: &Path) -> Result<(), SyncError> {
        (**self).update_repo(path).await
    }
}

/// The `git` executable.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    timeout: Option<Duration>,
}

impl GitCli {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl VcsTool for GitCli {
    async fn is_working_copy(&self, path: &Path) -> bool {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || is_git_working_copy(&path))
            .await
            .unwrap_or(false)
    }

    async fn clone_repo(&self, remote: &str, dest: &Path) -> Result<(), SyncError> {
        let failure = |message: String| SyncError::Clone {
            remote: remote.to_string(),
            path: dest.to_path_buf(),
            message,
        };
        match clone_repository(remote, dest, self.timeout).await {
            Ok((true, _, _)) => Ok(()),
            Ok((false, _, stderr)) => Err(failure(clean_stderr(&stderr))),
            Err(e) => Err(failure(e.to_string())),
        }
    }

    async fn update_repo(&self, path: &Path) -> Result<(), SyncError> {
        let failure = |message: String| SyncError::Update {
            path: path.to_path_buf(),
            message,
        };
        match pull_repository(path, self.timeout).await {
            Ok((true, _, _)) => Ok(()),
            Ok((false, _, stderr)) => Err(failure(clean_stderr(&stderr))),
            Err(e) => Err(failure(e.to_string())),
        }
    }
}

/// Keeps the last meaningful stderr line; git prints progress noise first
fn clean_stderr(stderr: &str) -> String {
    let last = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .rfind(|line| line.starts_with("fatal:") || line.starts_with("error:"))
        .or_else(|| stderr.lines().map(str::trim).rfind(|line| !line.is_empty()));
    match last {
        Some(line) => line.to_string(),
        None => "git exited with a non-zero status".to_string(),
    }
}
