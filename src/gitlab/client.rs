//! GitLab group listing client.

use async_trait::async_trait;
use std::time::Duration;

use super::error::TransportError;
use super::http::{HttpTransport, ReqwestTransport};
use super::pagination::PaginatedFetcher;
use super::types::{GroupRef, Project, Subgroup};

/// The two listing operations group traversal needs.
///
/// Implemented by [`GitLabClient`] for real instances and by in-memory
/// fakes in tests.
#[async_trait]
pub trait GroupSource: Send + Sync {
    /// Projects directly inside `group` (subgroups not included).
    async fn list_projects(&self, group: &GroupRef) -> Result<Vec<Project>, TransportError>;

    /// Direct child groups of `group`.
    async fn list_subgroups(&self, group: &GroupRef) -> Result<Vec<Subgroup>, TransportError>;
}

/// GitLab API client owned by the run and passed to traversal by reference.
pub struct GitLabClient<T = ReqwestTransport> {
    fetcher: PaginatedFetcher<T>,
}

impl GitLabClient<ReqwestTransport> {
    /// Create a client backed by reqwest.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitLab base URL (e.g., "https://gitlab.com")
    /// * `token` - Personal access token with `read_api` scope
    /// * `timeout` - Optional per-request timeout
    pub fn new(base_url: &str, token: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Self::with_transport(transport, base_url, token)
    }
}

impl<T: HttpTransport> GitLabClient<T> {
    pub fn with_transport(transport: T, base_url: &str, token: &str) -> Result<Self, TransportError> {
        Ok(Self {
            fetcher: PaginatedFetcher::new(transport, base_url, token)?,
        })
    }

    /// Base URL requests are issued against.
    pub fn host(&self) -> &str {
        self.fetcher.base_url().as_str()
    }
}

#[async_trait]
impl<T: HttpTransport> GroupSource for GitLabClient<T> {
    async fn list_projects(&self, group: &GroupRef) -> Result<Vec<Project>, TransportError> {
        let id = group.as_segment();
        self.fetcher
            .fetch_all(
                &["api", "v4", "groups", id.as_str(), "projects"],
                &[("include_subgroups", "false")],
            )
            .await
    }

    async fn list_subgroups(&self, group: &GroupRef) -> Result<Vec<Subgroup>, TransportError> {
        let id = group.as_segment();
        self.fetcher
            .fetch_all(&["api", "v4", "groups", id.as_str(), "subgroups"], &[])
            .await
    }
}
