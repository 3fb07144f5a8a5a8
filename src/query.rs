//! Query parameter sets and query-string assembly.
//!
//! Query parameters keep insertion order so that serialized query strings are
//! deterministic: default parameters appear first in the order they were
//! configured, followed by any request-only keys. A key present in both the
//! defaults and the request parameters keeps its original position but takes
//! the request-supplied value.

use url::form_urlencoded;

use crate::config::ClientConfig;

/// The value of a single query parameter: either one scalar or an ordered
/// sequence of scalars.
///
/// Sequence values are serialized as repeated pairs when the parameter name
/// contains the literal substring `[]`, e.g. `tags[]=a&tags[]=b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A single scalar value.
    Single(String),
    /// An ordered sequence of values.
    List(Vec<String>),
}

impl QueryValue {
    /// Returns the scalar value, if this is a single-valued parameter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Single(v) => Some(v),
            QueryValue::List(_) => None,
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::List(values.into_iter().map(String::from).collect())
    }
}

macro_rules! query_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Single(value.to_string())
                }
            }
        )*
    };
}

query_value_from_display!(i32, i64, u32, u64, usize, f64, bool);

/// An insertion-ordered set of query parameters.
///
/// # Examples
///
/// ```
/// use quickapi::QueryParams;
///
/// let params = QueryParams::new()
///     .set("page", 2)
///     .set("tags[]", vec!["a", "b"]);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, consuming and returning `self` for chaining.
    ///
    /// If the key already exists its value is replaced in place, so the key
    /// keeps its original position in the serialized query string.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlays `overrides` on top of `self`, returning the merged set.
    ///
    /// Override semantics are whole-value: a key present in both sets takes
    /// the override's value entirely, even for sequence values. Keys from
    /// `self` keep their original order; keys only in `overrides` are
    /// appended in their order.
    pub fn merged_with(&self, overrides: &QueryParams) -> QueryParams {
        let mut merged = self.clone();
        for (key, value) in &overrides.entries {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Builds the canonical query string for a request, merging the
/// configuration's default parameters with the request-supplied ones.
///
/// Returns `None` when neither source provides any parameters, signaling
/// that no query string (not even a bare `?`) should be appended to the URL.
///
/// Keys containing the literal substring `[]` are treated as sequence-valued
/// and emit one `key=value` pair per element, in sequence order. All keys and
/// values are percent-encoded with `application/x-www-form-urlencoded` rules,
/// so the brackets themselves appear as `%5B%5D`.
///
/// # Examples
///
/// ```
/// use quickapi::{build_query_params, ClientConfig, QueryParams};
///
/// let config = ClientConfig::new().default_query_params(QueryParams::new().set("lang", "en"));
/// let query = build_query_params(&config, Some(&QueryParams::new().set("q", "rust")));
/// assert_eq!(query.as_deref(), Some("lang=en&q=rust"));
/// ```
pub fn build_query_params(config: &ClientConfig, params: Option<&QueryParams>) -> Option<String> {
    let defaults = config.default_query_params.as_ref();
    if defaults.is_none() && params.is_none() {
        return None;
    }

    let merged = match (defaults, params) {
        (Some(defaults), Some(params)) => defaults.merged_with(params),
        (Some(defaults), None) => defaults.clone(),
        (None, Some(params)) => params.clone(),
        (None, None) => unreachable!(),
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in merged.iter() {
        match value {
            QueryValue::Single(v) => {
                serializer.append_pair(key, v);
            }
            QueryValue::List(values) => {
                for v in values {
                    serializer.append_pair(key, v);
                }
            }
        }
    }
    Some(serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_params_anywhere_yields_none() {
        let config = ClientConfig::new();
        assert_eq!(build_query_params(&config, None), None);
    }

    #[test]
    fn empty_request_params_yield_empty_string_not_none() {
        // An empty set is still "params were supplied", distinct from absent.
        let config = ClientConfig::new();
        let params = QueryParams::new();
        assert_eq!(build_query_params(&config, Some(&params)), Some(String::new()));
    }

    #[test]
    fn defaults_only() {
        let config =
            ClientConfig::new().default_query_params(QueryParams::new().set("api_key", "k1"));
        assert_eq!(
            build_query_params(&config, None).as_deref(),
            Some("api_key=k1")
        );
    }

    #[test]
    fn request_value_wins_and_default_order_is_kept() {
        let config = ClientConfig::new()
            .default_query_params(QueryParams::new().set("a", 1).set("b", 2));
        let params = QueryParams::new().set("a", 9);
        assert_eq!(
            build_query_params(&config, Some(&params)).as_deref(),
            Some("a=9&b=2")
        );
    }

    #[test]
    fn request_only_keys_are_appended_after_defaults() {
        let config = ClientConfig::new().default_query_params(QueryParams::new().set("a", 1));
        let params = QueryParams::new().set("c", 3);
        assert_eq!(
            build_query_params(&config, Some(&params)).as_deref(),
            Some("a=1&c=3")
        );
    }

    #[test]
    fn array_key_emits_one_pair_per_element_in_order() {
        let config = ClientConfig::new();
        let params = QueryParams::new().set("test[]", vec!["hi", "hello", "hey"]);
        assert_eq!(
            build_query_params(&config, Some(&params)).as_deref(),
            Some("test%5B%5D=hi&test%5B%5D=hello&test%5B%5D=hey")
        );
    }

    #[test]
    fn array_merge_is_whole_value_override() {
        let config = ClientConfig::new()
            .default_query_params(QueryParams::new().set("tags[]", vec!["x", "y"]));
        let params = QueryParams::new().set("tags[]", vec!["z"]);
        assert_eq!(
            build_query_params(&config, Some(&params)).as_deref(),
            Some("tags%5B%5D=z")
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let config = ClientConfig::new();
        let params = QueryParams::new().set("q", "a b&c");
        assert_eq!(
            build_query_params(&config, Some(&params)).as_deref(),
            Some("q=a+b%26c")
        );
    }

    #[test]
    fn inputs_are_not_mutated() {
        let defaults = QueryParams::new().set("a", 1);
        let config = ClientConfig::new().default_query_params(defaults.clone());
        let params = QueryParams::new().set("a", 2);
        let _ = build_query_params(&config, Some(&params));
        assert_eq!(config.default_query_params.as_ref(), Some(&defaults));
        assert_eq!(params.get("a"), Some(&QueryValue::Single("2".into())));
    }
}
