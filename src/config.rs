//! Client configuration types.
//!
//! A [`ClientConfig`] is built once by the caller and never mutated after the
//! client is created; every request derives from it. Configuration layering
//! follows a documented later-wins order, see [`RequestInit::layered_under`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::query::QueryParams;

/// Configuration shared by every request a client makes.
///
/// # Examples
///
/// ```
/// use quickapi::{ClientConfig, QueryParams};
///
/// let config = ClientConfig::new()
///     .base_url("https://api.example.com/v2")
///     .header("Authorization", "Bearer token")
///     .unwrap()
///     .default_query_params(QueryParams::new().set("lang", "en"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL prepended to relative endpoints.
    pub base_url: Option<String>,
    /// Headers applied to every request, overridable per request.
    pub headers: HeaderMap,
    /// Transport-level defaults (e.g. timeout) merged under per-request
    /// overrides.
    pub default_init: RequestInit,
    /// Conventions for [`get_paginated`](crate::Client::get_paginated).
    pub pagination: Option<PaginationOptions>,
    /// Query parameters merged under per-request parameters.
    pub default_query_params: Option<QueryParams>,
}

impl ClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL prepended to relative endpoints.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Adds a header sent with every request.
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
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the transport-level defaults merged under per-request overrides.
    pub fn default_init(mut self, init: RequestInit) -> Self {
        self.default_init = init;
        self
    }

    /// Sets the pagination conventions.
    pub fn pagination(mut self, options: PaginationOptions) -> Self {
        self.pagination = Some(options);
        self
    }

    /// Sets the query parameters merged under per-request parameters.
    pub fn default_query_params(mut self, params: QueryParams) -> Self {
        self.default_query_params = Some(params);
        self
    }
}

/// Transport-level request options.
///
/// Used both as a configuration-wide default ([`ClientConfig::default_init`])
/// and as a per-request override ([`RequestOptions::init`]). Each field is
/// optional; when layering, a set field in the higher-priority layer replaces
/// the lower layer's field wholesale.
///
/// [`RequestOptions::init`]: crate::RequestOptions
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// Overrides the HTTP method chosen by the verb operation.
    pub method: Option<Method>,
    /// Replaces the request's own headers (but is still merged key-by-key
    /// over the configuration headers).
    pub headers: Option<HeaderMap>,
    /// Replaces the request body.
    pub body: Option<String>,
    /// Per-request timeout, enforced by the transport.
    pub timeout: Option<Duration>,
}

impl RequestInit {
    /// Creates an empty init.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the header map for this layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("invalid header value: {e}")))?;
        self.headers.get_or_insert_with(HeaderMap::new).insert(name, value);
        Ok(self)
    }

    /// Sets the request body for this layer.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Layers `over` on top of `self`, field by field.
    ///
    /// A `Some` field in `over` replaces this layer's field entirely (no
    /// element-wise header merge at this stage); a `None` field lets this
    /// layer's value through.
    pub(crate) fn layered_under(&self, over: &RequestInit) -> RequestInit {
        RequestInit {
            method: over.method.clone().or_else(|| self.method.clone()),
            headers: over.headers.clone().or_else(|| self.headers.clone()),
            body: over.body.clone().or_else(|| self.body.clone()),
            timeout: over.timeout.or(self.timeout),
        }
    }
}

/// Predicate deciding, from a decoded result page, whether it is the last
/// one.
pub type LastPageFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Conventions for automatic pagination.
///
/// # Examples
///
/// ```
/// use quickapi::PaginationOptions;
///
/// let options = PaginationOptions::new()
///     .result_key("items")
///     .last_page(|page| page.as_array().is_some_and(|a| a.len() < 10));
/// ```
#[derive(Clone, Default)]
pub struct PaginationOptions {
    /// Query parameter carrying the current page number. Defaults to
    /// `"page"` when unset.
    pub page_param: Option<String>,
    /// Key within the response body holding the item collection. When unset
    /// the whole body is the collection.
    pub result_key: Option<String>,
    /// Tells proactively that a page is the last one, saving the extra
    /// request that would otherwise be needed to observe an empty page.
    pub last_page: Option<LastPageFn>,
    /// Upper bound on pages delivered per `get_paginated` call. Without it
    /// the loop is unbounded and relies entirely on the stop conditions; an
    /// API that never reports an empty or terminal page loops indefinitely.
    pub max_pages: Option<u64>,
}

impl PaginationOptions {
    /// Creates pagination options with all conventions unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query parameter used for the page number.
    pub fn page_param(mut self, name: impl Into<String>) -> Self {
        self.page_param = Some(name.into());
        self
    }

    /// Sets the response key holding the item collection.
    pub fn result_key(mut self, key: impl Into<String>) -> Self {
        self.result_key = Some(key.into());
        self
    }

    /// Sets the last-page predicate.
    ///
    /// The terminal page (the first one for which the predicate returns
    /// `true`) is not delivered to the page consumer.
    pub fn last_page(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.last_page = Some(Arc::new(predicate));
        self
    }

    /// Caps the number of pages delivered per call.
    pub fn max_pages(mut self, max_pages: u64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// The effective page parameter name.
    pub fn effective_page_param(&self) -> &str {
        self.page_param.as_deref().unwrap_or("page")
    }
}

impl fmt::Debug for PaginationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationOptions")
            .field("page_param", &self.page_param)
            .field("result_key", &self.result_key)
            .field("last_page", &self.last_page.as_ref().map(|_| "<predicate>"))
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
