//! Converts handler results into replies.
//!
//! This module provides the [`Responder`] trait which defines how handler
//! return values become a [`Reply`]: a status, headers and a body the
//! transport can write out.

use crate::ResponseSink;
use crate::error::BoxError;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};
use mime::Mime;
use serde::Serialize;

/// A fully produced handler result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Reply {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, headers: HeaderMap::new(), body: body.into() }
    }

    /// A reply with the given status and no body.
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, Bytes::new())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Sets the `Content-Type` header.
    ///
    /// # Errors
    /// Fails if `mime` isn't a valid header value.
    pub fn with_content_type(mut self, mime: &Mime) -> Result<Self, BoxError> {
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_str(mime.as_ref())?);
        Ok(self)
    }

    /// Writes status, headers and body into `sink`, ending it.
    pub fn write_to<S: ResponseSink + ?Sized>(self, sink: &mut S) {
        sink.set_status(self.status);
        sink.headers_mut().extend(self.headers);
        sink.end(self.body);
    }
}

/// A trait for types that can be returned from a route handler.
pub trait Responder {
    /// # Errors
    /// Fails when the value can't be turned into a reply, or when it already
    /// carries a handler error.
    fn respond(self) -> Result<Reply, BoxError>;
}

impl Responder for Reply {
    fn respond(self) -> Result<Reply, BoxError> {
        Ok(self)
    }
}

/// `Ok` values are converted, errors propagate unchanged.
impl<T, E> Responder for Result<T, E>
where
    T: Responder,
    E: Into<BoxError>,
{
    fn respond(self) -> Result<Reply, BoxError> {
        match self {
            Ok(t) => t.respond(),
            Err(e) => Err(e.into()),
        }
    }
}

/// `None` is an empty `204 No Content` reply.
impl<T: Responder> Responder for Option<T> {
    fn respond(self) -> Result<Reply, BoxError> {
        match self {
            Some(t) => t.respond(),
            None => Ok(Reply::empty(StatusCode::NO_CONTENT)),
        }
    }
}

/// Unit is an empty `204 No Content` reply.
impl Responder for () {
    fn respond(self) -> Result<Reply, BoxError> {
        Ok(Reply::empty(StatusCode::NO_CONTENT))
    }
}

impl<T: Responder> Responder for (StatusCode, T) {
    fn respond(self) -> Result<Reply, BoxError> {
        let (status, responder) = self;
        Ok(responder.respond()?.with_status(status))
    }
}

impl Responder for StatusCode {
    fn respond(self) -> Result<Reply, BoxError> {
        Ok(Reply::empty(self))
    }
}

impl Responder for &'static str {
    fn respond(self) -> Result<Reply, BoxError> {
        Reply::new(StatusCode::OK, self).with_content_type(&mime::TEXT_PLAIN_UTF_8)
    }
}

impl Responder for String {
    fn respond(self) -> Result<Reply, BoxError> {
        Reply::new(StatusCode::OK, self).with_content_type(&mime::TEXT_PLAIN_UTF_8)
    }
}

impl Responder for Bytes {
    fn respond(self) -> Result<Reply, BoxError> {
        Reply::new(StatusCode::OK, self).with_content_type(&mime::APPLICATION_OCTET_STREAM)
    }
}

/// Serializes the wrapped value as a JSON reply.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize> Responder for Json<T> {
    fn respond(self) -> Result<Reply, BoxError> {
        let body = serde_json::to_vec(&self.0)?;
        Reply::new(StatusCode::OK, body).with_content_type(&mime::APPLICATION_JSON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferedResponse;
    use serde_json::json;
    use std::io;

    #[test]
    fn string_reply() {
        let reply = String::from("hello").respond().unwrap();

        assert_eq!(reply.status(), StatusCode::OK);
        assert_eq!(reply.body().as_ref(), b"hello");
        assert_eq!(reply.headers().get(CONTENT_TYPE).unwrap(), "text/plain; charset=utf-8");
    }

    #[test]
    fn empty_string_still_replies() {
        let reply = "".respond().unwrap();

        assert_eq!(reply.status(), StatusCode::OK);
        assert!(reply.body().is_empty());
    }

    #[test]
    fn json_reply() {
        let reply = Json(json!({ "name": "foo" })).respond().unwrap();

        assert_eq!(reply.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        let value: serde_json::Value = serde_json::from_slice(reply.body()).unwrap();
        assert_eq!(value["name"], "foo");
    }

    #[test]
    fn unit_and_none_are_no_content() {
        assert_eq!(().respond().unwrap().status(), StatusCode::NO_CONTENT);
        assert_eq!(None::<String>.respond().unwrap().status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn status_override() {
        let reply = (StatusCode::CREATED, "made").respond().unwrap();

        assert_eq!(reply.status(), StatusCode::CREATED);
        assert_eq!(reply.body().as_ref(), b"made");
    }

    #[test]
    fn result_error_propagates() {
        let result: Result<String, io::Error> = Err(io::Error::other("boom"));
        let error = result.respond().unwrap_err();

        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn write_reply_to_sink() {
        let mut response = BufferedResponse::new();
        "hello".respond().unwrap().with_status(StatusCode::ACCEPTED).write_to(&mut response);

        assert!(response.headers_sent());
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.body(), b"hello");
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain; charset=utf-8");
    }
}
