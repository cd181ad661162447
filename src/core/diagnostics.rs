//! Failure reports emitted while a run keeps going

use std::path::PathBuf;

use crate::gitlab::{GroupRef, TransportError};
use crate::sync::SyncError;

/// A recovered failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Listing a group failed; its projects and subgroups were not explored
    GroupSkipped { group: GroupRef, error: String },
    /// Cloning or updating one project failed; the run continued
    SyncFailed {
        project: String,
        path: PathBuf,
        error: String,
    },
}

impl Diagnostic {
    pub fn group_skipped(group: &GroupRef, error: &TransportError) -> Self {
        Diagnostic::GroupSkipped {
            group: group.clone(),
            error: error.to_string(),
        }
    }

    pub fn sync_failed(project: &str, path: impl Into<PathBuf>, error: &SyncError) -> Self {
        Diagnostic::SyncFailed {
            project: project.to_string(),
            path: path.into(),
            error: error.to_string(),
        }
    }
}

/// Receiver for failures that components recover from.
///
/// Each failure is reported exactly once, by the component that absorbed it.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}
