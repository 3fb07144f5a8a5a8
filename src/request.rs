//! Per-request options.

use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::config::RequestInit;
use crate::error::{Error, Result};
use crate::query::QueryParams;

/// Options for a single request, consumed once by a verb operation.
///
/// # Examples
///
/// ```
/// use quickapi::{QueryParams, RequestOptions};
///
/// let options = RequestOptions::new("orders")
///     .params(QueryParams::new().set("status", "open"))
///     .header("X-Request-Id", "abc-123")
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Path fragment (relative to the base URL) or absolute URL.
    pub endpoint: String,
    /// Query parameters merged over the configuration defaults.
    pub params: Option<QueryParams>,
    /// Headers merged over the configuration headers. Superseded wholesale
    /// by `init.headers` when that is set.
    pub headers: Option<HeaderMap>,
    /// Request body.
    pub body: Option<String>,
    /// Transport-level overrides layered over the method/headers/body and
    /// the configuration defaults.
    pub init: Option<RequestInit>,
}

impl RequestOptions {
    /// Creates options for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the query parameters.
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a request header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the header name or value is
    /// invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("invalid header value: {e}")))?;
        self.headers.get_or_insert_with(HeaderMap::new).insert(name, value);
        Ok(self)
    }

    /// Sets a raw request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON request body and sets the
    /// `Content-Type: application/json` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the value cannot be serialized.
    pub fn json(mut self, value: &impl Serialize) -> Result<Self> {
        let body = serde_json::to_string(value)
            .map_err(|e| Error::Configuration(format!("failed to serialize body: {e}")))?;
        self.body = Some(body);
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Sets the transport-level overrides for this request.
    pub fn init(mut self, init: RequestInit) -> Self {
        self.init = Some(init);
        self
    }
}
