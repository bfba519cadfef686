//! # plinth
//!
//! A minimal HTTP router where the last matching route wins.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Routes are an ordered rule list, one list per method, scanned back to
//! front at dispatch time. Registering a broad rule first and narrower
//! rules after it is the whole programming model: the catch-all serves
//! everything, and each later registration carves its paths out of it.
//! When nothing matches, a replaceable fallback answers (404 with an empty
//! body until you say otherwise).
//!
//! Three things follow from that:
//!
//! - **Patterns are predicates.** Regex, prefix, exact string, or your own
//!   [`Pattern`] impl. The router never parses path syntax itself.
//! - **Methods are open string keys.** `GET` and `POST` have shorthands,
//!   but `PURGE`, `REPORT`, or anything else registers via
//!   [`Router::route`] with no enum to extend.
//! - **Dispatch is read-only.** The router is built once, then shared
//!   freely across connections without locks.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use plinth::{Request, Response, Router, Server};
//! use regex::Regex;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get(Regex::new(r"^/").unwrap(), page)
//!         .get(Regex::new(r"^/api/posts/").unwrap(), list_posts);
//!
//!     Server::bind("0.0.0.0:8080").serve(app).await.unwrap();
//! }
//!
//! // The catch-all: every GET path the API rules don't claim.
//! async fn page(_req: Request) -> Response {
//!     Response::html("<h1>hello</h1>")
//! }
//!
//! async fn list_posts(_req: Request) -> Response {
//!     // serde_json::to_vec(&posts).unwrap() in a real app
//!     Response::json(br#"[{"title":"first"}]"#.to_vec())
//! }
//! ```

mod error;
mod handler;
mod pattern;
mod request;
mod response;
mod router;
mod server;

pub use error::Error;
pub use handler::Handler;
pub use pattern::{Exact, Pattern, Prefix};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
