use std::error::Error;
use thiserror::Error;

/// The error type handlers and responders return.
///
/// The router never inspects or wraps it, it reaches the caller of
/// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) as it was produced.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors raised while registering a route.
///
/// These are configuration errors: they are reported synchronously by the
/// registration call and never deferred to request time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("You need to set a valid path")]
    InvalidPath,

    #[error("You need to set a valid handler")]
    InvalidHandler,

    #[error("invalid path template '{template}': {reason}")]
    InvalidPattern { template: String, reason: String },

    #[error("unsupported route method: {method}")]
    UnsupportedMethod { method: http::Method },
}

impl RouteError {
    pub fn invalid_pattern<S: ToString>(template: impl Into<String>, reason: S) -> Self {
        Self::InvalidPattern { template: template.into(), reason: reason.to_string() }
    }
}

/// Errors raised when a query string can't be decoded into a typed value.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("request has no query string")]
    Missing,

    #[error("invalid query string: {source}")]
    Invalid {
        #[from]
        source: serde_qs::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_messages() {
        assert_eq!(RouteError::InvalidPath.to_string(), "You need to set a valid path");
        assert_eq!(RouteError::InvalidHandler.to_string(), "You need to set a valid handler");
    }

    #[test]
    fn invalid_pattern_message() {
        let error = RouteError::invalid_pattern("/{", "unbalanced braces");
        assert_eq!(error.to_string(), "invalid path template '/{': unbalanced braces");
    }
}
