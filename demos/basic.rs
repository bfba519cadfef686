//! Minimal plinth example — the routing shape of a small blog.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:8080/
//!   curl http://localhost:8080/api/posts/
//!   curl http://localhost:8080/api/post/hello-world
//!   curl -X POST http://localhost:8080/anything      (custom fallback)

use http::StatusCode;
use plinth::{Request, Response, Router, Server};
use regex::Regex;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Registration order is the routing policy: the page rule matches every
    // GET path, and the API rules registered after it win the /api/* overlap.
    let app = Router::new()
        .get(Regex::new(r"^/").unwrap(), page)
        .get(Regex::new(r"^/api/posts/").unwrap(), list_posts)
        .get(Regex::new(r"^/api/post/").unwrap(), show_post)
        .fallback(not_found);

    Server::bind("0.0.0.0:8080")
        .serve(app)
        .await
        .expect("server error");
}

// GET <anything> — the page shell.
async fn page(req: Request) -> Response {
    Response::html(format!(
        "<!doctype html><title>blog</title><h1>blog</h1><p>you asked for {}</p>",
        req.path()
    ))
}

// GET /api/posts/ — the post index.
async fn list_posts(_req: Request) -> Response {
    // serde_json::to_vec(&posts).unwrap() once there's a real store behind it
    Response::json(
        br#"[{"link":"hello-world","title":"Hello, world"}]"#.to_vec(),
    )
}

// GET /api/post/<link> — one post, plain text.
async fn show_post(req: Request) -> Response {
    match req.path().splitn(4, '/').nth(3).filter(|link| !link.is_empty()) {
        Some(link) => Response::text(format!("contents of {link}")),
        None => Response::text("fail"),
    }
}

async fn not_found(req: Request) -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .text(format!("no route for {}", req.path()))
}
