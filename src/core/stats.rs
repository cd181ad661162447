//! Statistics tracking for synchronization runs

use crate::core::config::{
    ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH, PATH_DISPLAY_WIDTH,
};
use crate::core::diagnostics::{Diagnostic, DiagnosticSink};
use crate::git::Status;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, warn};

/// Statistics for tracking discovery and synchronization results
///
/// Uses atomic counters for lock-free reads and writes of simple counters,
/// while complex data structures (vectors) remain behind a Mutex. Also acts
/// as the run's diagnostic sink: every recovered failure is logged and kept
/// for the final report.
#[derive(Debug)]
pub struct SyncStatistics {
    // Atomic counters for lock-free access
    pub cloned_repos: AtomicU64,
    pub updated_repos: AtomicU64,
    pub error_repos: AtomicU64,
    pub skipped_groups: AtomicU64,
    // Complex data behind mutex
    pub failed_repos: Mutex<Vec<(String, String, String)>>, // (project, local_path, error_message)
    pub failed_groups: Mutex<Vec<(String, String)>>,        // (group, error_message)
}

impl Default for SyncStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self {
            cloned_repos: AtomicU64::new(0),
            updated_repos: AtomicU64::new(0),
            error_repos: AtomicU64::new(0),
            skipped_groups: AtomicU64::new(0),
            failed_repos: Mutex::new(Vec::new()),
            failed_groups: Mutex::new(Vec::new()),
        }
    }

    /// Updates statistics based on a synchronization result
    pub fn update(&self, status: &Status) {
        match status {
            Status::Cloned => {
                self.cloned_repos.fetch_add(1, Ordering::Relaxed);
            }
            Status::Updated => {
                self.updated_repos.fetch_add(1, Ordering::Relaxed);
            }
            Status::Error => {
                self.error_repos.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn cloned(&self) -> u64 {
        self.cloned_repos.load(Ordering::Relaxed)
    }

    pub fn updated(&self) -> u64 {
        self.updated_repos.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.error_repos.load(Ordering::Relaxed)
    }

    pub fn groups_skipped(&self) -> u64 {
        self.skipped_groups.load(Ordering::Relaxed)
    }

    /// Generates a summary string of the synchronization results
    pub fn generate_summary(&self, duration: Duration) -> String {
        let duration_secs = duration.as_secs_f64();

        let cloned = self.cloned();
        let updated = self.updated();
        let errors = self.failed();
        let groups = self.groups_skipped();

        let mut summary = format!(
            "✅ Completed in {:.1}s • {} cloned • {} updated",
            duration_secs, cloned, updated
        );
        if errors > 0 {
            summary.push_str(&format!(" • {} failed", errors));
        }
        if groups > 0 {
            summary.push_str(&format!(" • {} groups skipped", groups));
        }

        summary
    }

    /// Generates detailed messages for projects and groups needing attention
    pub fn generate_detailed_summary(&self) -> String {
        let mut lines = Vec::new();

        let failed_repos = match self.failed_repos.lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("failed to acquire lock for failed_repos");
                return String::new();
            }
        };
        let failed_groups = match self.failed_groups.lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("failed to acquire lock for failed_groups");
                return String::new();
            }
        };

        // Failed projects get priority
        if !failed_repos.is_empty() {
            lines.push(format!("🔴 FAILED PROJECTS ({})", failed_repos.len()));
            for (i, (project, path, error)) in failed_repos.iter().enumerate() {
                let tree_char = if i == failed_repos.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                let short_path = crate::utils::shorten_path(path, PATH_DISPLAY_WIDTH);
                lines.push(format!(
                    "   {} {:20} {:30} # {}",
                    tree_char,
                    project,
                    short_path,
                    clean_error_message(error)
                ));
            }
            lines.push(String::new());
        }

        if !failed_groups.is_empty() {
            lines.push(format!("🟠 SKIPPED GROUPS ({})", failed_groups.len()));
            for (i, (group, error)) in failed_groups.iter().enumerate() {
                let tree_char = if i == failed_groups.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                lines.push(format!(
                    "   {} {:20} # {}",
                    tree_char,
                    group,
                    clean_error_message(error)
                ));
            }
        }

        // Remove trailing blank line if it exists
        if lines.last() == Some(&String::new()) {
            lines.pop();
        }

        lines.join("\n")
    }
}

impl DiagnosticSink for SyncStatistics {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::GroupSkipped { group, error } => {
                warn!(%group, %error, "could not fetch group, skipping its subtree");
                self.skipped_groups.fetch_add(1, Ordering::Relaxed);
                if let Ok(mut guard) = self.failed_groups.lock() {
                    guard.push((group.to_string(), error));
                } else {
                    warn!(%group, "failed to record skipped group");
                }
            }
            Diagnostic::SyncFailed {
                project,
                path,
                error,
            } => {
                error!(%project, path = %path.display(), %error, "synchronization failed");
                if let Ok(mut guard) = self.failed_repos.lock() {
                    guard.push((project, path.to_string_lossy().into_owned(), error));
                } else {
                    warn!(%project, "failed to record project failure");
                }
            }
        }
    }
}

/// Cleans and formats error messages for display
pub(crate) fn clean_error_message(error: &str) -> String {
    // Replace newlines/tabs with spaces and collapse whitespace
    let cleaned = error
        .replace('\n', " ")
        .replace('\r', "")
        .replace('\t', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let lower = cleaned.to_lowercase();

    // Extract key error patterns
    if lower.contains("timed out") {
        "timeout".to_string()
    } else if lower.contains("authentication failed")
        || lower.contains("permission denied")
        || lower.contains("could not read username")
        || lower.contains("http 401")
    {
        "authentication failed".to_string()
    } else if lower.contains("http 403") {
        "access denied".to_string()
    } else if lower.contains("http 404") {
        "not found".to_string()
    } else if lower.contains("could not resolve host")
        || lower.contains("connection")
        || lower.contains("network")
    {
        "network error".to_string()
    } else if lower.contains("not a git working copy") {
        "destination exists and is not a repository".to_string()
    } else if lower.contains("conflict") || lower.contains("diverg") {
        "merge conflict".to_string()
    } else if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        // Truncate long messages
        let head: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{head}...")
    } else {
        cleaned
    }
}
