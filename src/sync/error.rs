//! Per-project synchronization errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::RemoteProtocol;

/// A failure confined to one project.
///
/// The synchronizer reports these and carries on with the next project.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("git clone of {remote} into {} failed: {message}", .path.display())]
    Clone {
        remote: String,
        path: PathBuf,
        message: String,
    },

    #[error("git pull in {} failed: {message}", .path.display())]
    Update { path: PathBuf, message: String },

    #[error("{} exists but is not a git working copy; move it away to clone again", .path.display())]
    NotAWorkingCopy { path: PathBuf },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("project {project} has no {protocol} remote URL")]
    MissingRemote {
        project: String,
        protocol: RemoteProtocol,
    },
}
