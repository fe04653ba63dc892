//! A small async HTTP request router.
//!
//! Routes are registered per method on a [`Router`] and tried strictly in
//! registration order: the first route whose method and path template match
//! handles the request. Routers built independently can be merged with
//! [`Router::compose`], which keeps every router's own order and puts the
//! merged routers after the receiver's routes.
//!
//! # Example
//!
//! ```
//! use http::Request;
//! use micro_router::{handler_fn, BufferedResponse, RoutedRequest, Router};
//!
//! async fn hello(req: RoutedRequest) -> String {
//!     format!("Hello {} {}", req.param("msg").unwrap_or_default(), req.query().get("time").unwrap_or_default())
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let mut router: Router = Router::new();
//! router.get("/hello/:msg", handler_fn(hello))?;
//!
//! let dispatcher = router.dispatcher();
//!
//! let req = Request::get("/hello/world?time=now").body(())?;
//! let mut res = BufferedResponse::new();
//! dispatcher.serve(req.into(), &mut res).await?;
//!
//! assert_eq!(res.body(), b"Hello world now");
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod error;
mod handler;
mod query;
mod request;
mod responder;
mod response;

pub mod pattern;
pub mod router;

pub use dispatch::Dispatcher;
pub use error::{BoxError, QueryError, RouteError};
pub use handler::{FnHandler, RouteHandler, SyncFnHandler, handler_fn, sync_handler_fn};
pub use query::QueryParams;
pub use request::{PathParams, RequestHeader, RoutedRequest};
pub use responder::{Json, Reply, Responder};
pub use response::{BufferedResponse, ResponseSink};
pub use router::{RouteOutcome, Router};
