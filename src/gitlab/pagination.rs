//! Page-by-page assembly of GitLab listing endpoints.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::TransportError;
use super::http::{HttpRequest, HttpTransport};
use crate::core::config::{PAGE_SIZE, PRIVATE_TOKEN_HEADER};

/// Issues authenticated GET requests and collects every page of a listing.
///
/// Nothing is cached: each call to [`PaginatedFetcher::fetch_all`] walks the
/// endpoint from page 1 again.
pub struct PaginatedFetcher<T> {
    transport: T,
    base_url: Url,
    token: String,
}

impl<T: HttpTransport> PaginatedFetcher<T> {
    /// Creates a fetcher rooted at `base_url` (e.g. `https://gitlab.com`).
    ///
    /// A path prefix on the base URL is kept, so instances served under a
    /// sub-path work as well.
    pub fn new(transport: T, base_url: &str, token: impl Into<String>) -> Result<Self, TransportError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).map_err(|e| TransportError::InvalidUrl(format!("{trimmed}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(trimmed.to_string()));
        }

        Ok(Self {
            transport,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL of one page: base, endpoint segments, caller query,
    /// then `per_page` and `page`.
    pub(crate) fn page_url(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        page: usize,
    ) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .extend_pairs(query)
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Returns the complete, ordered record sequence of a listing endpoint.
    ///
    /// Stops on an empty page or on a page shorter than [`PAGE_SIZE`]; a
    /// full page always triggers a request for the next one.
    pub async fn fetch_all<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Vec<R>, TransportError> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = self.page_url(segments, query, page)?.to_string();
            debug!(%url, page, "requesting listing page");

            let response = self
                .transport
                .get(HttpRequest {
                    url: url.clone(),
                    headers: vec![
                        (PRIVATE_TOKEN_HEADER.to_string(), self.token.clone()),
                        ("Accept".to_string(), "application/json".to_string()),
                    ],
                })
                .await?;

            if response.is_error() {
                return Err(TransportError::from_status(&url, response.status, &response.body));
            }

            let batch: Vec<R> =
                serde_json::from_slice(&response.body).map_err(|e| TransportError::Decode {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

            if batch.is_empty() {
                break;
            }
            let batch_len = batch.len();
            items.extend(batch);
            if batch_len < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}
