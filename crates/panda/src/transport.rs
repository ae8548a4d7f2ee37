//! The transport port consumed by [`crate::CloudClient`].
//!
//! The facade never talks HTTP itself. It builds a path and a [`Params`] map
//! and hands both to a [`RestClient`]; the implementation owns connection
//! handling, authentication signing and TLS. The `rest` crate provides the
//! production implementation; tests substitute an in-memory fake.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::TransportError;

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain text, sent as a query-string or form field.
    Text(String),
    /// A local file, sent as a multipart file part.
    File(PathBuf),
}

impl ParamValue {
    /// Returns the text value, or `None` for a file part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::File(_) => None,
        }
    }

    /// Returns the file path, or `None` for a text value.
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(p) => Some(p),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ---------------------------------------------------------------------------

/// Request parameters, ordered by name.
///
/// Ordering is by key so that signing implementations can build a canonical
/// query string directly from iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a text parameter, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ParamValue::Text(value.into()));
    }

    /// Inserts a file parameter, replacing any previous value for `key`.
    pub fn insert_file(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
        self.0.insert(key.into(), ParamValue::File(path.into()));
    }

    /// Builder form of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Returns the text value stored under `key`, if it is a text parameter.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ParamValue::as_text)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    /// Returns `true` if any parameter is a file part.
    pub fn has_files(&self) -> bool {
        self.0.values().any(|v| matches!(v, ParamValue::File(_)))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// HTTP transport against one encoding cloud.
///
/// `path` is relative to the API root and always starts with `/` (for example
/// `/videos/abc.json`). Implementations return the raw response body on any
/// 2xx status and a [`TransportError`] otherwise. They must not retry on
/// behalf of the caller.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Issues a GET request; `params` go into the query string.
    async fn get(&self, path: &str, params: &Params) -> Result<String, TransportError>;

    /// Issues a POST request; `params` form the request body.
    async fn post(&self, path: &str, params: &Params) -> Result<String, TransportError>;

    /// Issues a PUT request; `params` form the request body.
    async fn put(&self, path: &str, params: &Params) -> Result<String, TransportError>;

    /// Issues a DELETE request.
    async fn delete(&self, path: &str) -> Result<String, TransportError>;

    /// Returns the cloud this transport is configured for.
    fn cloud_id(&self) -> String;
}

#[async_trait]
impl<T: RestClient + ?Sized> RestClient for std::sync::Arc<T> {
    async fn get(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        (**self).get(path, params).await
    }

    async fn post(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        (**self).post(path, params).await
    }

    async fn put(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        (**self).put(path, params).await
    }

    async fn delete(&self, path: &str) -> Result<String, TransportError> {
        (**self).delete(path).await
    }

    fn cloud_id(&self) -> String {
        (**self).cloud_id()
    }
}
