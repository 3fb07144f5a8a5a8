//! The client: verb operations and automatic pagination.

use std::future::Future;
use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, RequestInit};
use crate::error::{Error, Result};
use crate::query::QueryValue;
use crate::request::RequestOptions;
use crate::transport::{HttpTransport, Transport, TransportRequest};
use crate::urls;

/// An HTTP API client derived from a [`ClientConfig`].
///
/// The configuration is read-only after construction, so one client can be
/// shared freely between concurrent operations. Each operation performs a
/// single request with no internal retries; callers own their retry policy.
///
/// # Examples
///
/// ```no_run
/// use quickapi::{Client, ClientConfig, RequestOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Item {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), quickapi::Error> {
/// let client = Client::new(ClientConfig::new().base_url("https://api.example.com"))?;
///
/// let item: Item = client.get(RequestOptions::new("items/1")).await?;
/// println!("{}: {}", item.id, item.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T: Transport = HttpTransport> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client backed by the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over an injected transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues a GET request and decodes the JSON response body.
    pub async fn get<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.make_request(Method::GET, options).await
    }

    /// Issues a PUT request and decodes the JSON response body.
    pub async fn put<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.make_request(Method::PUT, options).await
    }

    /// Issues a POST request and decodes the JSON response body.
    pub async fn post<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.make_request(Method::POST, options).await
    }

    /// Issues a DELETE request and decodes the JSON response body.
    pub async fn del<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.make_request(Method::DELETE, options).await
    }

    /// Composes and dispatches one request.
    ///
    /// Init layering, in increasing priority: `config.default_init`, then
    /// the verb base (method plus the request's own headers and body — these
    /// three fields always come from the verb base), then `options.init`
    /// field by field. The effective header set is `config.headers` overlaid
    /// key-by-key with the layered init's headers, so `init.headers` beats
    /// `options.headers`, which beats the configuration headers.
    async fn make_request<R: DeserializeOwned>(
        &self,
        method: Method,
        options: RequestOptions,
    ) -> Result<R> {
        let url = urls::assemble(&self.config, &options.endpoint, options.params.as_ref())?;

        let mut init = RequestInit {
            method: Some(method),
            headers: options.headers,
            body: options.body,
            timeout: self.config.default_init.timeout,
        };
        if let Some(overrides) = &options.init {
            init = init.layered_under(overrides);
        }

        let mut headers = self.config.headers.clone();
        if let Some(init_headers) = &init.headers {
            for (name, value) in init_headers {
                headers.insert(name, value.clone());
            }
        }

        let request = TransportRequest {
            method: init.method.unwrap_or(Method::GET),
            headers,
            body: init.body,
            timeout: init.timeout,
        };

        tracing::debug!(method = %request.method, url = %url, "dispatching request");
        let response = self.transport.fetch(url, request).await?;

        if response.is_ok() {
            tracing::debug!(
                status = response.status.as_u16(),
                url = %response.url,
                "request succeeded"
            );
            response.json()
        } else {
            tracing::warn!(
                status = response.status.as_u16(),
                url = %response.url,
                "request failed"
            );
            Err(Error::RequestFailed {
                status: response.status,
                headers: response.headers,
                url: response.url,
                raw_response: response.body,
            })
        }
    }

    /// Repeatedly issues GET requests against a paginated endpoint, feeding
    /// each non-empty page to `on_page` in ascending page order.
    ///
    /// The page number is sent in the query parameter named by the
    /// configuration's [`PaginationOptions`](crate::PaginationOptions)
    /// (`"page"` by default), starting from `start_page`, or the request's
    /// own value for that parameter, or 1. Requests are strictly sequential:
    /// `on_page` for page N is fully awaited before page N+1 is fetched.
    ///
    /// The loop stops when a page is null or an empty array (that page is
    /// not delivered), when the configured `last_page` predicate returns
    /// `true` (the terminal page is evaluated but not delivered), or when
    /// the `max_pages` ceiling is reached. Without a ceiling the loop is
    /// unbounded: an API that never reports an empty or terminal page loops
    /// indefinitely. There is no cancellation primitive; early termination
    /// has to come from the caller's own signal checked inside `on_page`.
    ///
    /// # Errors
    ///
    /// An error from any page's request propagates out immediately,
    /// terminating the loop.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use quickapi::{Client, ClientConfig, PaginationOptions, RequestOptions};
    ///
    /// # async fn example() -> Result<(), quickapi::Error> {
    /// let config = ClientConfig::new()
    ///     .base_url("https://api.example.com")
    ///     .pagination(PaginationOptions::new().result_key("items"));
    /// let client = Client::new(config)?;
    ///
    /// client
    ///     .get_paginated::<Vec<serde_json::Value>, _, _>(
    ///         RequestOptions::new("items"),
    ///         |page, _raw| async move {
    ///             println!("got {} items", page.len());
    ///         },
    ///         None,
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_paginated<R, F, Fut>(
        &self,
        options: RequestOptions,
        mut on_page: F,
        start_page: Option<u64>,
    ) -> Result<()>
    where
        R: DeserializeOwned,
        F: FnMut(R, &Value) -> Fut,
        Fut: Future<Output = ()>,
    {
        let pagination = self.config.pagination.clone().unwrap_or_default();
        let page_param = pagination.effective_page_param().to_string();

        let mut current_page = start_page
            .or_else(|| {
                options
                    .params
                    .as_ref()
                    .and_then(|params| params.get(&page_param))
                    .and_then(QueryValue::as_str)
                    .and_then(|value| value.parse().ok())
            })
            .unwrap_or(1);

        let mut delivered: u64 = 0;

        loop {
            let mut params = options.params.clone().unwrap_or_default();
            params.insert(page_param.clone(), current_page.to_string());
            let page_options = RequestOptions {
                params: Some(params),
                ..options.clone()
            };

            let raw: Value = self.get(page_options).await?;

            let page = match &pagination.result_key {
                Some(key) => raw.get(key).cloned().unwrap_or(Value::Null),
                None => raw.clone(),
            };

            if page.is_null() || page.as_array().is_some_and(|items| items.is_empty()) {
                tracing::debug!(page = current_page, "pagination stopped on empty page");
                return Ok(());
            }

            if let Some(last_page) = &pagination.last_page {
                if last_page(&page) {
                    tracing::debug!(
                        page = current_page,
                        "pagination stopped on last-page predicate"
                    );
                    return Ok(());
                }
            }

            let typed: R = serde_json::from_value(page.clone()).map_err(|e| Error::JsonDecode {
                raw_response: page.to_string(),
                serde_error: e.to_string(),
            })?;
            on_page(typed, &raw).await;

            delivered += 1;
            if pagination.max_pages.is_some_and(|max| delivered >= max) {
                tracing::debug!(pages = delivered, "pagination stopped at max_pages ceiling");
                return Ok(());
            }
            current_page += 1;
        }
    }
}
