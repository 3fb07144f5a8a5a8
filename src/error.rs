//! Error types for client operations.
//!
//! Every client operation is fallible. Errors preserve the raw response data
//! and HTTP details when available so callers can diagnose failures without
//! replaying requests.

use http::{HeaderMap, StatusCode};

/// The error type for all client operations.
///
/// # Examples
///
/// ```no_run
/// use quickapi::{Client, ClientConfig, Error, RequestOptions};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new(ClientConfig::new().base_url("https://api.example.com"))?;
///
/// match client.get::<serde_json::Value>(RequestOptions::new("items")).await {
///     Ok(items) => println!("{items}"),
///     Err(Error::RequestFailed { status, raw_response, .. }) => {
///         eprintln!("server said {status}: {raw_response}");
///     }
///     Err(e) => eprintln!("request error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying transport failed before a response was produced
    /// (connection refused, DNS failure, timeout, etc.).
    ///
    /// The client adds no retry layer; callers own their retry policy.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The assembled request URL is not a well-formed absolute URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server responded with a non-success status code.
    ///
    /// Carries the full response details for diagnostics. Never retried.
    #[error("HTTP error {status} for {url}: {raw_response}")]
    RequestFailed {
        /// The HTTP status code.
        status: StatusCode,
        /// The response headers.
        headers: HeaderMap,
        /// The URL the request was sent to.
        url: String,
        /// The raw response body, when it could be read.
        raw_response: String,
    },

    /// A success response body could not be decoded as JSON into the
    /// requested type.
    #[error("failed to decode response JSON: {serde_error}")]
    JsonDecode {
        /// The raw text that failed to decode.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
    },

    /// Invalid configuration, such as a malformed header name or value.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the canonical status text for a failed request, e.g.
    /// `"Not Found"` for a 404.
    pub fn status_text(&self) -> Option<&'static str> {
        self.status().and_then(|s| s.canonical_reason())
    }

    /// Returns the raw response body if this error carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::RequestFailed { raw_response, .. } => Some(raw_response),
            Error::JsonDecode { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
