use crate::error::BoxError;
use crate::responder::Reply;
use crate::router::{RouteEntry, RouteOutcome};
use crate::{RequestHeader, ResponseSink};
use bytes::Bytes;
use http::{Method, StatusCode};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Dispatches requests over a frozen snapshot of routes.
///
/// Produced by [`Router::compose`](crate::Router::compose) and
/// [`Router::dispatcher`](crate::Router::dispatcher). Cloning is cheap and
/// clones share the snapshot, so one dispatcher can serve many concurrent
/// requests.
pub struct Dispatcher<R: ResponseSink + 'static> {
    entries: Arc<[Arc<RouteEntry<R>>]>,
}

impl<R: ResponseSink + 'static> Dispatcher<R> {
    pub(crate) fn new(entries: Arc<[Arc<RouteEntry<R>>]>) -> Self {
        Self { entries }
    }

    /// Routes one request.
    ///
    /// Routes are tried one at a time in registration order, each one awaited
    /// before the next is tried. The walk stops at the first route that
    /// handles the request, returning its reply, or as soon as the response
    /// head has been sent, returning `None`. When no route handles the
    /// request the response is ended with `404 Not Found` and an empty body.
    ///
    /// # Errors
    /// A handler error ends the walk and is returned unchanged.
    pub async fn dispatch(&self, req: RequestHeader, res: &mut R) -> Result<Option<Reply>, BoxError> {
        let req = Arc::new(req);

        for (index, entry) in self.entries.iter().enumerate() {
            trace!(index, method = %entry.method(), template = entry.template(), "try route");

            match entry.try_handle(&req, res).await? {
                RouteOutcome::Matched(reply) => {
                    debug!(method = %req.method(), path = req.path(), template = entry.template(), "route matched");
                    return Ok(Some(reply));
                }
                RouteOutcome::NotMatched if res.headers_sent() => return Ok(None),
                RouteOutcome::NotMatched => {}
            }
        }

        debug!(method = %req.method(), path = req.path(), "no route matched");
        res.set_status(StatusCode::NOT_FOUND);
        res.end(Bytes::new());
        Ok(None)
    }

    /// Routes one request and writes the reply into `res`.
    ///
    /// The reply is only written when the handler hasn't already sent the
    /// response head itself.
    ///
    /// # Errors
    /// Returns the handler error unchanged, `res` is left as the handler left it.
    pub async fn serve(&self, req: RequestHeader, res: &mut R) -> Result<(), BoxError> {
        if let Some(reply) = self.dispatch(req, res).await?
            && !res.headers_sent()
        {
            reply.write_to(res);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(method, template)` of every route, in dispatch order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.entries.iter().map(|entry| (entry.method(), entry.template()))
    }
}

impl<R: ResponseSink + 'static> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Self { entries: Arc::clone(&self.entries) }
    }
}

impl<R: ResponseSink + 'static> fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").field("entries", &self.entries.len()).finish()
    }
}
