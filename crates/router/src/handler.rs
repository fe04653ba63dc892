use crate::error::BoxError;
use crate::responder::{Reply, Responder};
use crate::{ResponseSink, RoutedRequest};
use async_trait::async_trait;
use std::fmt;

/// Handles a request whose method and path matched a route.
///
/// The handler receives the routed request and the response. It may write
/// to the response itself, or return a [`Reply`] for the caller to write.
#[async_trait]
pub trait RouteHandler<R: ResponseSink + 'static>: Send + Sync {
    async fn invoke(&self, req: RoutedRequest, res: &mut R) -> Result<Reply, BoxError>;
}

/// an async `Fn(RoutedRequest)` used as a handler
pub struct FnHandler<F> {
    f: F,
}

/// Wraps an async function into a [`RouteHandler`].
///
/// ```
/// use micro_router::{handler_fn, RoutedRequest};
///
/// let hello = handler_fn(|req: RoutedRequest| async move {
///     format!("Hello {}", req.param("msg").unwrap_or("nobody"))
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(RoutedRequest) -> Fut,
    Fut: Future,
{
    FnHandler { f }
}

#[async_trait]
impl<R, F, Fut, O> RouteHandler<R> for FnHandler<F>
where
    R: ResponseSink + 'static,
    F: Fn(RoutedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: Responder + 'static,
{
    async fn invoke(&self, req: RoutedRequest, _res: &mut R) -> Result<Reply, BoxError> {
        (self.f)(req).await.respond()
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHandler")
    }
}

/// a synchronous `Fn(RoutedRequest, &mut R)` used as a handler
pub struct SyncFnHandler<F> {
    f: F,
}

/// Wraps a synchronous function into a [`RouteHandler`].
///
/// The function gets the response as well, so it can write to it directly.
pub fn sync_handler_fn<F, R, O>(f: F) -> SyncFnHandler<F>
where
    F: Fn(RoutedRequest, &mut R) -> O,
{
    SyncFnHandler { f }
}

#[async_trait]
impl<R, F, O> RouteHandler<R> for SyncFnHandler<F>
where
    R: ResponseSink + 'static,
    F: Fn(RoutedRequest, &mut R) -> O + Send + Sync + 'static,
    O: Responder + 'static,
{
    async fn invoke(&self, req: RoutedRequest, res: &mut R) -> Result<Reply, BoxError> {
        (self.f)(req, res).respond()
    }
}

impl<F> fmt::Debug for SyncFnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncFnHandler")
    }
}
