//! HTTP transport boundary for the GitLab listing calls.

use async_trait::async_trait;
use std::time::Duration;

use super::error::TransportError;

/// HTTP headers represented as key/value pairs.
pub type HttpHeaders = Vec<(String, String)>;

/// A GET request against the listing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HttpHeaders,
}

impl HttpRequest {
    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Transport boundary for all HTTP I/O.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// A real HTTP transport backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with an optional whole-request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("group-sync/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Http {
            url: "(client setup)".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (k, v) in &request.headers {
            builder = builder.header(k, v);
        }

        let resp = builder.send().await.map_err(|e| TransportError::Http {
            url: request.url.clone(),
            message: e.to_string(),
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Http {
                url: request.url.clone(),
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

// ---------- Test-only mock transport ----------

#[cfg(test)]
use std::collections::{HashMap, VecDeque};
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// In-memory mock transport.
///
/// Responses are registered per URL and handed out in FIFO order. Requests
/// without a registered response fail as a transport error.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[cfg(test)]
#[derive(Default)]
struct MockTransportInner {
    routes: HashMap<String, VecDeque<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, url: impl Into<String>, response: HttpResponse) {
        let mut inner = self
            .inner
            .lock()
            .expect("mock transport lock should not be poisoned");
        inner.routes.entry(url.into()).or_default().push_back(response);
    }

    /// Registers a 200 response whose body is `body` serialized as JSON.
    pub fn push_json(&self, url: impl Into<String>, body: serde_json::Value) {
        self.push_response(
            url,
            HttpResponse {
                status: 200,
                body: serde_json::to_vec(&body).expect("serialize mock body"),
            },
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        let inner = self
            .inner
            .lock()
            .expect("mock transport lock should not be poisoned");
        inner.requests.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self
            .inner
            .lock()
            .expect("mock transport lock should not be poisoned");

        let url = request.url.clone();
        inner.requests.push(request);

        match inner.routes.get_mut(&url).and_then(|q| q.pop_front()) {
            Some(resp) => Ok(resp),
            None => Err(TransportError::Http {
                url,
                message: "connection refused".to_string(),
            }),
        }
    }
}
