//! Clone-if-absent / update-if-present for discovered projects.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::destination::local_path;
use super::error::SyncError;
use super::RemoteProtocol;
use crate::core::{Diagnostic, DiagnosticSink, SyncStatistics};
use crate::git::{Status, VcsTool};
use crate::gitlab::Project;

/// Keeps one local working copy per project under `dest_root`.
pub struct RepoSynchronizer<V> {
    vcs: V,
    dest_root: PathBuf,
    protocol: RemoteProtocol,
}

impl<V: VcsTool> RepoSynchronizer<V> {
    pub fn new(vcs: V, dest_root: impl Into<PathBuf>, protocol: RemoteProtocol) -> Self {
        Self {
            vcs,
            dest_root: dest_root.into(),
            protocol,
        }
    }

    pub fn local_path(&self, project: &Project) -> PathBuf {
        local_path(&self.dest_root, project)
    }

    /// Clones the project if it has no working copy yet, pulls it otherwise.
    ///
    /// A destination that exists without git metadata and is not an empty
    /// directory is refused and left untouched.
    pub async fn sync_project(&self, project: &Project) -> Result<Status, SyncError> {
        let path = self.local_path(project);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SyncError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        if self.vcs.is_working_copy(&path).await {
            info!(project = %project.display_name(), path = %path.display(), "updating existing repo");
            self.vcs.update_repo(&path).await?;
            return Ok(Status::Updated);
        }

        if is_occupied(&path).await {
            return Err(SyncError::NotAWorkingCopy { path });
        }

        let remote = self
            .protocol
            .remote_for(project)
            .ok_or_else(|| SyncError::MissingRemote {
                project: project.display_name().to_string(),
                protocol: self.protocol,
            })?;

        info!(project = %project.display_name(), path = %path.display(), "cloning");
        self.vcs.clone_repo(remote, &path).await?;
        Ok(Status::Cloned)
    }

    /// Synchronizes every project, `jobs` at a time.
    ///
    /// Every outcome is counted in `stats`; failures also go to `sink` and
    /// never stop the remaining projects. With `jobs <= 1` projects are
    /// processed strictly in order.
    pub async fn sync_all(
        &self,
        projects: &[Project],
        jobs: usize,
        stats: &SyncStatistics,
        sink: &dyn DiagnosticSink,
        progress: &ProgressBar,
    ) {
        if jobs <= 1 {
            for project in projects {
                self.sync_reported(project, stats, sink, progress).await;
            }
            return;
        }

        debug!(jobs, "synchronizing with a bounded pool");
        stream::iter(projects)
            .for_each_concurrent(jobs, move |project| {
                self.sync_reported(project, stats, sink, progress)
            })
            .await;
    }

    async fn sync_reported(
        &self,
        project: &Project,
        stats: &SyncStatistics,
        sink: &dyn DiagnosticSink,
        progress: &ProgressBar,
    ) {
        progress.set_message(project.display_name().to_string());

        let status = match self.sync_project(project).await {
            Ok(status) => status,
            Err(err) => {
                sink.report(Diagnostic::sync_failed(
                    project.display_name(),
                    self.local_path(project),
                    &err,
                ));
                Status::Error
            }
        };

        stats.update(&status);
        progress.println(format!("{} {:10} {}", status.symbol(), status.text(), project.display_name()));
        progress.inc(1);
    }
}

/// True when `path` exists and is anything but an empty directory
async fn is_occupied(path: &Path) -> bool {
    match tokio::fs::symlink_metadata(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(_) => true,
        Ok(meta) if meta.is_dir() => match tokio::fs::read_dir(path).await {
            Ok(mut entries) => !matches!(entries.next_entry().await, Ok(None)),
            Err(_) => true,
        },
        Ok(_) => true,
    }
}
