//! # group-sync
//!
//! `group-sync` mirrors every project below one or more GitLab groups into a
//! local directory tree that follows the projects' namespaces. It powers the
//! `group-sync` CLI tool.
//!
//! ## Core Features
//!
//! - **Complete Discovery**: Paginated listing of projects and subgroups,
//!   walked with an explicit worklist that tolerates cyclic hierarchies.
//! - **Deduplication**: Projects reachable from several roots are synced once.
//! - **Idempotent Sync**: Missing projects are cloned, existing working
//!   copies are pulled; re-running never clones twice.
//! - **Failure Isolation**: A failing group or project is reported and
//!   skipped while the rest of the run completes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use group_sync::core::SyncStatistics;
//! use group_sync::commands::discover_projects;
//! use group_sync::gitlab::{GitLabClient, GroupRef};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GitLabClient::new("https://gitlab.com", "glpat-...", None)?;
//!     let stats = SyncStatistics::new();
//!     let found = discover_projects(&client, &[GroupRef::Id(42)], &stats).await;
//!     for project in &found.projects {
//!         println!("{}", project.path_with_namespace);
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod discovery;
pub mod git;
pub mod gitlab;
pub mod sync;
pub mod utils;
