use http::{Method, Request};
use micro_router::{RequestHeader, RoutedRequest, Router, handler_fn};

/// Which route of the table a benchmark request hits.
#[derive(Debug, Copy, Clone)]
pub enum Target {
    First,
    Last,
    Missing,
}

/// A route table of a given size plus the request sent through it.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    routes: usize,
    target: Target,
}

impl TestCase {
    pub fn new(name: &'static str, routes: usize, target: Target) -> Self {
        Self { name, routes, target }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn routes(&self) -> usize {
        self.routes
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Builds a router with `routes` GET routes of the form `/resource{i}/:id`.
    pub fn router(&self) -> Router {
        let mut router: Router = Router::new();
        for i in 0..self.routes {
            router
                .get(&format!("/resource{i}/:id"), handler_fn(resource))
                .expect("generated route template should be valid");
        }
        router
    }

    pub fn request(&self) -> RequestHeader {
        let uri = match self.target {
            Target::First => "/resource0/42".to_owned(),
            Target::Last => format!("/resource{}/42", self.routes.saturating_sub(1)),
            Target::Missing => "/missing/42".to_owned(),
        };

        Request::builder().method(Method::GET).uri(uri).body(()).expect("generated request should be valid").into()
    }
}

async fn resource(req: RoutedRequest) -> String {
    req.param("id").unwrap_or_default().to_owned()
}
