//! Test fixtures and builders

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use group_sync::core::{Diagnostic, DiagnosticSink};
use group_sync::git::VcsTool;
use group_sync::gitlab::{GroupRef, GroupSource, Namespace, Project, Subgroup, TransportError};
use group_sync::sync::SyncError;

/// Builds a project record the way the API reports it
pub fn project(id: u64, namespace: &str, slug: &str) -> Project {
    let full = if namespace.is_empty() {
        slug.to_string()
    } else {
        format!("{namespace}/{slug}")
    };
    Project {
        id,
        slug: slug.to_string(),
        path_with_namespace: full.clone(),
        namespace: Some(Namespace {
            full_path: Some(namespace.to_string()),
        }),
        http_url: format!("https://gitlab.test/{full}.git"),
        ssh_url: format!("git@gitlab.test:{full}.git"),
    }
}

/// In-memory group hierarchy
///
/// Unknown groups answer with HTTP 404, like a real instance would.
#[derive(Default)]
pub struct FakeGroupSource {
    projects: HashMap<GroupRef, Vec<Project>>,
    subgroups: HashMap<GroupRef, Vec<Subgroup>>,
    failing_projects: HashSet<GroupRef>,
    failing_subgroups: HashSet<GroupRef>,
    calls: Mutex<Vec<String>>,
}

impl FakeGroupSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group with its direct projects
    pub fn group(mut self, group: impl Into<GroupRef>, projects: Vec<Project>) -> Self {
        let group = group.into();
        self.subgroups.entry(group.clone()).or_default();
        self.projects.insert(group, projects);
        self
    }

    /// Declares `child` as a direct subgroup of `parent`
    pub fn subgroup(mut self, parent: impl Into<GroupRef>, child: u64) -> Self {
        self.subgroups.entry(parent.into()).or_default().push(Subgroup {
            id: child,
            full_path: None,
        });
        self
    }

    /// Declares `child` as a direct subgroup of `parent`, reported with its full path
    pub fn named_subgroup(mut self, parent: impl Into<GroupRef>, child: u64, full_path: &str) -> Self {
        self.subgroups.entry(parent.into()).or_default().push(Subgroup {
            id: child,
            full_path: Some(full_path.to_string()),
        });
        self
    }

    /// Makes the project listing of `group` fail with HTTP 500
    pub fn failing_projects(mut self, group: impl Into<GroupRef>) -> Self {
        self.failing_projects.insert(group.into());
        self
    }

    /// Makes the subgroup listing of `group` fail with HTTP 500
    pub fn failing_subgroups(mut self, group: impl Into<GroupRef>) -> Self {
        self.failing_subgroups.insert(group.into());
        self
    }

    /// Listing calls made so far, as `projects:<group>` / `subgroups:<group>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn listing_error(group: &GroupRef, what: &str, status: u16) -> TransportError {
    TransportError::from_status(
        &format!("https://gitlab.test/api/v4/groups/{group}/{what}"),
        status,
        b"{\"message\":\"boom\"}",
    )
}

#[async_trait]
impl GroupSource for FakeGroupSource {
    async fn list_projects(&self, group: &GroupRef) -> Result<Vec<Project>, TransportError> {
        self.record(format!("projects:{group}"));
        if self.failing_projects.contains(group) {
            return Err(listing_error(group, "projects", 500));
        }
        self.projects
            .get(group)
            .cloned()
            .ok_or_else(|| listing_error(group, "projects", 404))
    }

    async fn list_subgroups(&self, group: &GroupRef) -> Result<Vec<Subgroup>, TransportError> {
        self.record(format!("subgroups:{group}"));
        if self.failing_subgroups.contains(group) {
            return Err(listing_error(group, "subgroups", 500));
        }
        self.subgroups
            .get(group)
            .cloned()
            .ok_or_else(|| listing_error(group, "subgroups", 404))
    }
}

/// Version-control double that marks clones with a `.git` directory
#[derive(Default)]
pub struct RecordingVcs {
    failing_remotes: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes cloning `remote` fail
    pub fn failing(mut self, remote: &str) -> Self {
        self.failing_remotes.insert(remote.to_string());
        self
    }

    /// Calls made so far, as `clone <remote> <path>` / `pull <path>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clone_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("clone ")).count()
    }

    pub fn pull_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("pull ")).count()
    }
}

#[async_trait]
impl VcsTool for RecordingVcs {
    async fn is_working_copy(&self, path: &Path) -> bool {
        tokio::fs::metadata(path.join(".git"))
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    async fn clone_repo(&self, remote: &str, dest: &Path) -> Result<(), SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("clone {remote} {}", dest.display()));
        if self.failing_remotes.contains(remote) {
            return Err(SyncError::Clone {
                remote: remote.to_string(),
                path: dest.to_path_buf(),
                message: "fatal: repository not found".to_string(),
            });
        }
        std::fs::create_dir_all(dest.join(".git")).map_err(|source| SyncError::CreateDir {
            path: dest.to_path_buf(),
            source,
        })
    }

    async fn update_repo(&self, path: &Path) -> Result<(), SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("pull {}", path.display()));
        Ok(())
    }
}

/// Diagnostic sink that keeps everything it receives
#[derive(Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    pub fn skipped_groups(&self) -> Vec<GroupRef> {
        self.diagnostics()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::GroupSkipped { group, .. } => Some(group),
                _ => None,
            })
            .collect()
    }

    pub fn failed_paths(&self) -> Vec<PathBuf> {
        self.diagnostics()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::SyncFailed { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic);
    }
}
