//! Builds two routers, composes them and routes a few in-memory requests.
//!
//! Run with `cargo run -p micro-router --example hello_router`.

use http::{Method, Request, StatusCode};
use micro_router::{BufferedResponse, Json, ResponseSink, RoutedRequest, Router, handler_fn, sync_handler_fn};
use serde_json::json;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

async fn hello(req: RoutedRequest) -> String {
    format!("Hello {} {}", req.param("msg").unwrap_or("nobody"), req.query().get("time").unwrap_or("sometime"))
}

async fn list_users(_req: RoutedRequest) -> Json<serde_json::Value> {
    Json(json!([{ "name": "zava" }, { "name": "foldright" }]))
}

fn create_user(_req: RoutedRequest, _res: &mut BufferedResponse) -> (StatusCode, &'static str) {
    (StatusCode::CREATED, "created")
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut users: Router = Router::new();
    users.get("/users", handler_fn(list_users)).expect("valid route");
    users.post("/users", sync_handler_fn(create_user)).expect("valid route");

    let mut app: Router = Router::new();
    app.get("/hello/:msg", handler_fn(hello)).expect("valid route");

    let dispatcher = app.compose([&users]);

    let requests = [
        (Method::GET, "/hello/world?time=now"),
        (Method::GET, "/users"),
        (Method::POST, "/users"),
        (Method::DELETE, "/users"),
        (Method::GET, "/fake-route"),
    ];

    for (method, uri) in requests {
        let req = match Request::builder().method(method.clone()).uri(uri).body(()) {
            Ok(req) => req,
            Err(e) => {
                error!(cause = %e, uri, "invalid request");
                continue;
            }
        };

        let mut res = BufferedResponse::new();
        if let Err(e) = dispatcher.serve(req.into(), &mut res).await {
            error!(cause = %e, %method, uri, "handler failed");
            continue;
        }

        info!(%method, uri, status = %res.status(), body = %String::from_utf8_lossy(res.body()), "served");
    }
}
