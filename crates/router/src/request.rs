//! Request types seen by the router.
//!
//! - `RequestHeader`: the request head handed over by the transport
//! - `PathParams`: named captures produced by a matched path template
//! - `RoutedRequest`: the request a matched handler receives, the head plus
//!   its path and query parameters

use crate::QueryParams;
use crate::error::QueryError;
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri, Version};
use serde::Deserialize;
use std::sync::Arc;

/// Represents an HTTP request header.
///
/// This wraps a bodyless `http::Request<()>`: the router only needs the
/// method and the uri, bodies stay with the transport.
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    /// Consumes the header and returns the inner `Request<()>`.
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the request's URI.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the path portion of the URI, without the query string.
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Returns the raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }
}

impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Request::from_parts(parts, ()) }
    }
}

impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}

/// Named parameters captured from the request path.
///
/// For the template `/users/:id` and the path `/users/42`, `id` maps to `42`.
/// Captures keep the order they appear in the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// Creates an empty PathParams instance with no parameters
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Gets the value of a path parameter by its name
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.params.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self { params: iter.into_iter().collect() }
    }
}

/// The request a matched handler receives.
///
/// It carries the original request head together with the path parameters
/// captured by the route's template and the decoded query string. Cloning is
/// cheap, the head is shared.
#[derive(Debug, Clone)]
pub struct RoutedRequest {
    header: Arc<RequestHeader>,
    params: PathParams,
    query: QueryParams,
}

impl RoutedRequest {
    pub fn new(header: Arc<RequestHeader>, params: PathParams, query: QueryParams) -> Self {
        Self { header, params, query }
    }

    /// Returns the underlying request head
    pub fn request_header(&self) -> &RequestHeader {
        &self.header
    }

    pub fn method(&self) -> &Method {
        self.header.method()
    }

    pub fn uri(&self) -> &Uri {
        self.header.uri()
    }

    pub fn path(&self) -> &str {
        self.header.path()
    }

    pub fn version(&self) -> Version {
        self.header.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.header.headers()
    }

    /// Returns the path parameters captured by the matched template
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Shorthand for `self.params().get(name)`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns the decoded query parameters
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Decodes the raw query string into `T`.
    ///
    /// # Errors
    /// Fails with [`QueryError::Missing`] when the request has no query string,
    /// or [`QueryError::Invalid`] when it doesn't fit `T`.
    pub fn query_as<T>(&self) -> Result<T, QueryError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let raw = self.header.query().ok_or(QueryError::Missing)?;
        Ok(serde_qs::from_str::<T>(raw)?)
    }
}
