//! Group synchronization command implementation
//!
//! Sequences one run: walk every configured root group, merge the results
//! into unique projects, make sure the destination exists, then clone or
//! update each project.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::core::{
    create_progress_bar, set_terminal_title, set_terminal_title_and_flush, DiagnosticSink,
    SyncSettings, SyncStatistics,
};
use crate::discovery::{GroupTraverser, ProjectRegistry};
use crate::git::{GitCli, VcsTool};
use crate::gitlab::{GitLabClient, GroupRef, GroupSource, Project};
use crate::sync::{RemoteProtocol, RepoSynchronizer};

/// Everything a run needs besides the API and VCS handles
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub roots: Vec<GroupRef>,
    pub dest: PathBuf,
    pub protocol: RemoteProtocol,
    pub jobs: usize,
    pub show_progress: bool,
}

impl RunOptions {
    pub fn from_settings(settings: &SyncSettings, show_progress: bool) -> Self {
        Self {
            roots: settings.roots.clone(),
            dest: settings.dest.clone(),
            protocol: settings.protocol,
            jobs: settings.jobs,
            show_progress,
        }
    }
}

/// Counts describing a finished run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub groups_visited: usize,
    pub groups_failed: usize,
    pub projects: usize,
    pub cloned: u64,
    pub updated: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.groups_failed > 0
    }
}

/// Unique projects below all roots, plus traversal counters
#[derive(Debug, Default)]
pub struct Discovery {
    pub projects: Vec<Project>,
    pub groups_visited: usize,
    pub groups_failed: usize,
}

/// Handles the sync command using the real GitLab API and `git`
pub async fn handle_sync_command(settings: SyncSettings, show_progress: bool) -> Result<RunSummary> {
    // Set terminal title to indicate group-sync is running
    if show_progress {
        set_terminal_title("🚀 group-sync");
    }

    let client = GitLabClient::new(&settings.gitlab_url, &settings.token, settings.http_timeout)
        .context("failed to set up the GitLab client")?;
    info!(host = client.host(), roots = settings.roots.len(), "starting sync");

    let vcs = GitCli::new(settings.git_timeout);
    let stats = SyncStatistics::new();
    let options = RunOptions::from_settings(&settings, show_progress);

    let result = run_sync(&client, vcs, &options, &stats).await;

    if show_progress {
        set_terminal_title_and_flush("✅ group-sync");
    }
    result
}

/// Walks every root in order and merges the projects found
pub async fn discover_projects<S: GroupSource + ?Sized>(
    source: &S,
    roots: &[GroupRef],
    sink: &dyn DiagnosticSink,
) -> Discovery {
    let traverser = GroupTraverser::new(source, sink);
    let mut registry = ProjectRegistry::new();
    let mut discovery = Discovery::default();

    for root in roots {
        info!(group = %root, "fetching projects under group");
        let traversal = traverser.collect(root.clone()).await;
        discovery.groups_visited += traversal.groups_visited;
        discovery.groups_failed += traversal.groups_failed;
        registry.extend(traversal.projects);
    }

    info!(total = registry.len(), "unique projects to process");
    discovery.projects = registry.into_projects();
    discovery
}

/// Runs discovery and synchronization against the given API and VCS tool
///
/// Only a destination root that cannot be created aborts the run; group and
/// project failures are recorded in `stats`.
pub async fn run_sync<S, V>(
    source: &S,
    vcs: V,
    options: &RunOptions,
    stats: &SyncStatistics,
) -> Result<RunSummary>
where
    S: GroupSource + ?Sized,
    V: VcsTool,
{
    let start_time = Instant::now();

    let discovery = discover_projects(source, &options.roots, stats).await;

    let dest_root = prepare_dest_root(&options.dest).await?;
    let synchronizer = RepoSynchronizer::new(vcs, dest_root, options.protocol);

    let progress = create_progress_bar(discovery.projects.len(), !options.show_progress)?;
    synchronizer
        .sync_all(&discovery.projects, options.jobs, stats, stats, &progress)
        .await;
    progress.finish_and_clear();

    let summary = RunSummary {
        groups_visited: discovery.groups_visited,
        groups_failed: discovery.groups_failed,
        projects: discovery.projects.len(),
        cloned: stats.cloned(),
        updated: stats.updated(),
        failed: stats.failed(),
    };

    if options.show_progress {
        print_summary(stats, start_time);
    }
    info!(
        projects = summary.projects,
        cloned = summary.cloned,
        updated = summary.updated,
        failed = summary.failed,
        groups_failed = summary.groups_failed,
        "sync finished"
    );

    Ok(summary)
}

/// Creates the destination root and returns it as an absolute path
async fn prepare_dest_root(dest: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dest)
        .await
        .with_context(|| format!("failed to create destination directory {}", dest.display()))?;
    std::path::absolute(dest)
        .with_context(|| format!("failed to resolve destination directory {}", dest.display()))
}

fn print_summary(stats: &SyncStatistics, start_time: Instant) {
    println!();
    println!("{}", stats.generate_summary(start_time.elapsed()));

    let detailed_summary = stats.generate_detailed_summary();
    if !detailed_summary.is_empty() {
        println!("\n{}", "━".repeat(70));
        println!("{}", detailed_summary);
        println!("{}", "━".repeat(70));
    }
}
