//! Route registration and composition.
//!
//! A [`Router`] owns an ordered, append-only list of route entries. The order
//! is the registration order and it is the only thing deciding which handler
//! runs: when several entries could serve a request, the one registered first
//! wins, no matter how specific the others are.

use crate::error::{BoxError, RouteError};
use crate::handler::RouteHandler;
use crate::pattern::{PathPattern, ROUTE_MATCH_OPTIONS};
use crate::responder::Reply;
use crate::{BufferedResponse, Dispatcher, QueryParams, RequestHeader, ResponseSink, RoutedRequest};
use http::Method;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Methods a route can be registered for.
pub const ROUTE_METHODS: [Method; 7] =
    [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::HEAD, Method::OPTIONS];

/// The result of offering a request to a single route entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<T> {
    /// Method and path matched, the handler ran and produced `T`.
    Matched(T),
    /// The entry doesn't serve this request; nothing was touched.
    NotMatched,
}

/// One registered route: a method, a compiled path pattern and a handler.
///
/// Entries are immutable once registered and are shared, never copied, when
/// routers are composed.
pub struct RouteEntry<R: ResponseSink + 'static> {
    method: Method,
    pattern: PathPattern,
    handler: Box<dyn RouteHandler<R>>,
}

impl<R: ResponseSink + 'static> RouteEntry<R> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Offers the request to this entry.
    ///
    /// When the request method equals the entry's method and its path matches
    /// the pattern, the handler is invoked with the path and query parameters
    /// and its reply is returned as [`RouteOutcome::Matched`]. Any other
    /// request yields [`RouteOutcome::NotMatched`] without side effects; a
    /// path that matches under another method is not an error.
    ///
    /// # Errors
    /// Returns the handler's error unchanged.
    pub async fn try_handle(&self, req: &Arc<RequestHeader>, res: &mut R) -> Result<RouteOutcome<Reply>, BoxError> {
        if req.method() != self.method {
            return Ok(RouteOutcome::NotMatched);
        }

        let Some(params) = self.pattern.matches(req.path()) else {
            return Ok(RouteOutcome::NotMatched);
        };

        let query = req.query().map(QueryParams::parse).unwrap_or_default();
        let routed = RoutedRequest::new(Arc::clone(req), params, query);

        let reply = self.handler.invoke(routed, res).await?;
        Ok(RouteOutcome::Matched(reply))
    }
}

impl<R: ResponseSink + 'static> fmt::Debug for RouteEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry").field("method", &self.method).field("pattern", &self.pattern).finish()
    }
}

/// Main router structure, an ordered list of routes.
///
/// Routes are registered with the per-method functions ([`get`](Self::get),
/// [`post`](Self::post), ...). [`compose`](Self::compose) merges other routers
/// in and, like [`dispatcher`](Self::dispatcher), returns a [`Dispatcher`]
/// over a snapshot of the routes registered so far.
pub struct Router<R: ResponseSink + 'static = BufferedResponse> {
    entries: Vec<Arc<RouteEntry<R>>>,
}

macro_rules! method_route {
    ($fn_name:ident, $method:ident) => {
        #[doc = concat!("Registers a `", stringify!($method), "` route for `path`.")]
        ///
        /// # Errors
        /// See [`Router::route`].
        pub fn $fn_name<H: RouteHandler<R> + 'static>(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
            self.route(Method::$method, path, Some(Box::new(handler)))
        }
    };
}

impl<R: ResponseSink + 'static> Router<R> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registers `handler` for `method` requests whose path matches `path`.
    ///
    /// The route is appended after every route registered before it.
    ///
    /// # Errors
    /// Fails, without registering anything, when:
    /// - `path` is empty: [`RouteError::InvalidPath`]
    /// - `handler` is `None`: [`RouteError::InvalidHandler`]
    /// - `method` isn't one of [`ROUTE_METHODS`]: [`RouteError::UnsupportedMethod`]
    /// - `path` isn't a valid template: [`RouteError::InvalidPattern`]
    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        handler: Option<Box<dyn RouteHandler<R>>>,
    ) -> Result<(), RouteError> {
        if path.is_empty() {
            return Err(RouteError::InvalidPath);
        }
        let Some(handler) = handler else {
            return Err(RouteError::InvalidHandler);
        };
        if !ROUTE_METHODS.contains(&method) {
            return Err(RouteError::UnsupportedMethod { method });
        }

        let pattern = PathPattern::compile(path, &ROUTE_MATCH_OPTIONS)?;

        debug!(%method, path, index = self.entries.len(), "register route");
        self.entries.push(Arc::new(RouteEntry { method, pattern, handler }));
        Ok(())
    }

    method_route!(get, GET);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(patch, PATCH);
    method_route!(del, DELETE);
    method_route!(head, HEAD);
    method_route!(options, OPTIONS);

    /// Appends every route of `routers`, in order, after this router's own
    /// routes and returns a dispatcher over the result.
    ///
    /// The argument routers are left untouched. Calling `compose` again later
    /// keeps growing this router, dispatchers returned earlier don't change.
    pub fn compose<'a, I>(&mut self, routers: I) -> Dispatcher<R>
    where
        I: IntoIterator<Item = &'a Router<R>>,
    {
        for router in routers {
            self.entries.extend(router.entries.iter().map(Arc::clone));
        }
        self.dispatcher()
    }

    /// Returns a dispatcher over a snapshot of the current routes.
    pub fn dispatcher(&self) -> Dispatcher<R> {
        Dispatcher::new(self.entries.iter().map(Arc::clone).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(method, template)` of every route, in order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.entries.iter().map(|entry| (entry.method(), entry.template()))
    }
}

impl<R: ResponseSink + 'static> Default for Router<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ResponseSink + 'static> fmt::Debug for Router<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("entries", &self.entries).finish()
    }
}
