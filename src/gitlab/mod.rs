//! GitLab API access: transport, pagination and group listings.

pub mod client;
pub mod error;
pub mod http;
pub mod pagination;
pub mod types;

pub use client::{GitLabClient, GroupSource};
pub use error::TransportError;
pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use pagination::PaginatedFetcher;
pub use types::{GroupRef, Namespace, Project, Subgroup};
