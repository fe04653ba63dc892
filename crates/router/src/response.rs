//! The response side of the transport contract.
//!
//! The router only needs a handful of operations on a response: set the
//! status, observe whether the head has gone out, and end it with a body.
//! [`ResponseSink`] captures exactly that, [`BufferedResponse`] is an
//! in-memory implementation.

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};

/// A response the router and handlers can write to.
#[cfg_attr(test, mockall::automock)]
pub trait ResponseSink: Send {
    fn status(&self) -> StatusCode;

    fn set_status(&mut self, status: StatusCode);

    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Whether the response head has already been written out.
    ///
    /// Once this returns true, status and headers can no longer change.
    fn headers_sent(&self) -> bool;

    /// Writes `body` and finishes the response.
    fn end(&mut self, body: Bytes);
}

/// A response that is assembled in memory.
///
/// The head counts as sent once [`end`](ResponseSink::end) is called.
#[derive(Debug)]
pub struct BufferedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self { status: StatusCode::OK, headers: HeaderMap::new(), body: None }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body written by `end`, empty while the response is still open.
    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn is_ended(&self) -> bool {
        self.body.is_some()
    }

    /// Converts into an `http::Response`.
    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(self.body.unwrap_or_default());
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for BufferedResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for BufferedResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn headers_sent(&self) -> bool {
        self.is_ended()
    }

    fn end(&mut self, body: Bytes) {
        if self.body.is_none() {
            self.body = Some(body);
        }
    }
}
