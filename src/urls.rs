//! URL assembly from a base URL, an endpoint fragment, and query parameters.

use url::Url;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::query::{build_query_params, QueryParams};

/// Builds the absolute request URL for an endpoint.
///
/// The configured base URL is prepended unless the endpoint already carries
/// its own scheme (`http://` or `https://`). Each path part tolerates one
/// leading and one trailing slash, so `"/items/"` against a base of
/// `"https://example.com/api/"` still yields `https://example.com/api/items`.
///
/// The endpoint may carry a pre-existing query string; additional parameters
/// are appended with `&` rather than a second `?`, and a trailing `?` or `&`
/// on the endpoint is reused as the separator.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the assembled
/// string is not a parseable absolute URL.
///
/// # Examples
///
/// ```
/// use quickapi::{build_request_url, ClientConfig, QueryParams};
///
/// let config = ClientConfig::new().base_url("https://example.com/api");
/// let url = build_request_url(&config, "items", Some(&QueryParams::new().set("test", "hey")))
///     .unwrap();
/// assert_eq!(url, "https://example.com/api/items?test=hey");
/// ```
pub fn build_request_url(
    config: &ClientConfig,
    endpoint: &str,
    params: Option<&QueryParams>,
) -> Result<String> {
    Ok(assemble(config, endpoint, params)?.to_string())
}

/// Assembles and validates the request URL, returning the parsed form.
pub(crate) fn assemble(
    config: &ClientConfig,
    endpoint: &str,
    params: Option<&QueryParams>,
) -> Result<Url> {
    let mut parts: Vec<&str> = vec![endpoint];
    if let Some(base_url) = &config.base_url {
        if !endpoint.contains("http://") && !endpoint.contains("https://") {
            parts.insert(0, base_url);
        }
    }

    let mut url = parts
        .iter()
        .map(|part| {
            // Exactly one slash is trimmed from each end, not all of them.
            let part = part.strip_suffix('/').unwrap_or(part);
            part.strip_prefix('/').unwrap_or(part)
        })
        .collect::<Vec<_>>()
        .join("/");

    let query = build_query_params(config, params);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        match url.chars().last() {
            // A trailing separator on the endpoint is reused as-is.
            Some('?' | '&') => {}
            _ if url.contains('?') => url.push('&'),
            _ => url.push('?'),
        }
        url.push_str(&query);
    }

    Ok(Url::parse(&url)?)
}
