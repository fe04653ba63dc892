use std::collections::HashMap;
use tracing::warn;

/// Query parameters decoded from the request's query string.
///
/// A flat `name -> value` mapping: when a name repeats, the last value wins.
/// Use [`RoutedRequest::query_as`](crate::RoutedRequest::query_as) to decode
/// into a typed struct instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Parses a raw query string, without the leading `?`.
    ///
    /// A query string that can't be decoded yields an empty mapping.
    pub fn parse(raw: &str) -> Self {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(raw) {
            Ok(pairs) => Self { params: pairs.into_iter().collect() },
            Err(e) => {
                warn!(query = raw, cause = %e, "failed to decode query string");
                Self::default()
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.params.get(key.as_ref()).map(String::as_str)
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.params.contains_key(key.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
