//! Local synchronization of discovered projects.

pub mod destination;
pub mod error;
pub mod synchronizer;

use std::fmt;

use crate::gitlab::Project;

pub use destination::{local_path, resolve_namespace};
pub use error::SyncError;
pub use synchronizer::RepoSynchronizer;

/// Which remote address of a project is cloned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoteProtocol {
    #[default]
    Http,
    Ssh,
}

impl RemoteProtocol {
    /// The project's remote for this protocol, if the API reported one.
    pub fn remote_for<'a>(&self, project: &'a Project) -> Option<&'a str> {
        let url = match self {
            RemoteProtocol::Http => project.http_url.as_str(),
            RemoteProtocol::Ssh => project.ssh_url.as_str(),
        };
        Some(url).filter(|u| !u.is_empty())
    }
}

impl fmt::Display for RemoteProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteProtocol::Http => f.write_str("HTTP"),
            RemoteProtocol::Ssh => f.write_str("SSH"),
        }
    }
}
