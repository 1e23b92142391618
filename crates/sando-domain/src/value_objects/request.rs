//! Request value objects
//!
//! A [`ApiRequest`] is what a client hands to a transport; a
//! [`MatchedRequest`] is what the router builds once a route matched. Both
//! live only for the duration of one dispatch.

use super::HttpMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter mapping handed to endpoint handlers
pub type Params = BTreeMap<String, String>;

/// Request headers with case-insensitive names
///
/// Names are stored lowercased so `Authorization` and `authorization`
/// address the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any previous value
    pub fn insert<K: AsRef<str>, V: Into<String>>(&mut self, name: K, value: V) {
        self.0.insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Builder-style insert
    pub fn with<K: AsRef<str>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a header by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Remove a header by name
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&name.to_ascii_lowercase())
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no headers are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (lowercased name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

/// Outgoing request as seen by a transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Request method
    pub method: HttpMethod,
    /// Path with optional query string, relative to the service base address
    pub url: String,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
    /// Request headers
    pub headers: Headers,
}

impl ApiRequest {
    /// Create a request without body or headers
    pub fn new<S: Into<String>>(method: HttpMethod, url: S) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            headers: Headers::new(),
        }
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach headers
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Stable key identifying this request for caching
    ///
    /// Query parameters are sorted so `?a=1&b=2` and `?b=2&a=1` share an
    /// entry.
    pub fn signature(&self) -> String {
        let (path, query) = match self.url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.url.as_str(), None),
        };
        let mut pairs: Vec<&str> = query
            .map(|q| q.split('&').filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        pairs.sort_unstable();
        if pairs.is_empty() {
            format!("{} {}", self.method, path)
        } else {
            format!("{} {}?{}", self.method, path, pairs.join("&"))
        }
    }
}

/// Request after a route matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRequest {
    /// Request method
    pub method: HttpMethod,
    /// Raw path without query string
    pub path: String,
    /// Parameters extracted from the path template
    pub path_params: Params,
    /// Parameters parsed from the query string
    pub query_params: Params,
    /// Request headers
    pub headers: Headers,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
}

impl MatchedRequest {
    /// Merge query and path parameters; path parameters win on collision
    pub fn merged_params(&self) -> Params {
        let mut merged = self.query_params.clone();
        merged.extend(
            self.path_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }
}
