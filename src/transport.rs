//! The transport seam: an injectable, fetch-like dependency.
//!
//! The client never performs networking itself. It hands a fully assembled
//! URL and request descriptor to a [`Transport`] and interprets the response.
//! [`HttpTransport`] is the default implementation, backed by `reqwest`;
//! tests can inject anything else that satisfies the trait.

use std::future::Future;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// A fully composed request, ready for the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: Method,
    /// The effective header set.
    pub headers: HeaderMap,
    /// The request body, if any.
    pub body: Option<String>,
    /// Per-request timeout, if any. No timeout is imposed otherwise.
    pub timeout: Option<Duration>,
}

/// A transport-level response: status, headers, and the raw body text.
///
/// JSON decoding is deferred to [`TransportResponse::json`] so that failure
/// handling can capture the raw body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The URL the response came from.
    pub url: String,
    /// The raw response body.
    pub body: String,
}

impl TransportResponse {
    /// Returns `true` for 2xx status codes.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// The canonical reason phrase for the status, e.g. `"Not Found"`.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDecode`] with the raw body preserved if decoding
    /// fails.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::JsonDecode {
            raw_response: self.body.clone(),
            serde_error: e.to_string(),
        })
    }
}

/// An asynchronous, fetch-like HTTP transport.
///
/// Implementations resolve to a [`TransportResponse`] for any response the
/// server produced, success or not; [`Error::Transport`] is reserved for
/// failures where no response was obtained at all.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response.
    fn fetch(
        &self,
        url: Url,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// The default transport, backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the underlying client cannot be
    /// built (e.g. TLS backend initialization failure).
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client, sharing its connection pool.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: Url, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self.client.request(request.method, url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        // Best-effort body capture; a failed read still yields the status.
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse {
            status,
            headers,
            url,
            body,
        })
    }
}
