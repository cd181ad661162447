//! GitLab listing errors.

use thiserror::Error;

/// Maximum number of response-body bytes kept in a status error.
const ERROR_BODY_LIMIT: usize = 200;

/// A listing request that could not produce a usable page.
///
/// Raised by the paginated fetcher and recovered by group traversal, which
/// abandons the affected group and keeps going.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid API URL {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Builds a status error, keeping only the head of the response body.
    pub fn from_status(url: &str, status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();
        let body = match trimmed.char_indices().nth(ERROR_BODY_LIMIT) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        };
        Self::Status {
            url: url.to_string(),
            status,
            body,
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
