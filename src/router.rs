//! Rule-based request router.
//!
//! One ordered rule list per HTTP method. Dispatch scans the list for the
//! request's method and the **last** matching rule wins: registering a more
//! specific route after a broader one takes the overlap away from it. No
//! rule matching means the fallback handler runs (404, empty body, unless
//! replaced).

use std::collections::HashMap;

use http::StatusCode;

use crate::handler::{BoxedHandler, Handler};
use crate::pattern::Pattern;
use crate::request::Request;
use crate::response::Response;

/// A registered (pattern, handler) pair.
struct Rule {
    pattern: Box<dyn Pattern>,
    handler: BoxedHandler,
}

/// The application router.
///
/// Built once at startup by chained registration calls, then shared
/// read-only with the transport — pass it to
/// [`Server::serve`](crate::Server::serve). Methods are open string keys:
/// [`get`](Router::get) and [`post`](Router::post) cover the common cases,
/// [`route`](Router::route) registers any method name.
pub struct Router {
    rules: HashMap<String, Vec<Rule>>,
    fallback: BoxedHandler,
}

impl Router {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: not_found.into_boxed_handler(),
        }
    }

    /// Registers a handler for a method + pattern pair. Returns `self` so
    /// registrations chain naturally.
    ///
    /// Rules are appended in call order and never deduplicated. Overlapping
    /// patterns are legal; when several match the same path, the rule
    /// registered last is the one dispatched.
    pub fn route(
        mut self,
        method: impl Into<String>,
        pattern: impl Pattern,
        handler: impl Handler,
    ) -> Self {
        self.rules.entry(method.into()).or_default().push(Rule {
            pattern: Box::new(pattern),
            handler: handler.into_boxed_handler(),
        });
        self
    }

    /// Registers a `GET` rule.
    pub fn get(self, pattern: impl Pattern, handler: impl Handler) -> Self {
        self.route("GET", pattern, handler)
    }

    /// Registers a `POST` rule.
    pub fn post(self, pattern: impl Pattern, handler: impl Handler) -> Self {
        self.route("POST", pattern, handler)
    }

    /// Replaces the handler invoked when no rule matches.
    ///
    /// Exactly one fallback is active at a time; later calls overwrite
    /// earlier ones. The default answers `404 Not Found` with no body.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = handler.into_boxed_handler();
        self
    }

    /// Routes one request.
    ///
    /// Scans the rule list for the request's method in reverse registration
    /// order and invokes the first hit, i.e. the *last* matching
    /// registration. A method with no rules, or a path no pattern matches,
    /// goes to the fallback. Never mutates the rule table.
    pub async fn dispatch(&self, req: Request) -> Response {
        let matched = self
            .rules
            .get(req.method())
            .and_then(|rules| rules.iter().rev().find(|rule| rule.pattern.matches(req.path())));

        match matched {
            Some(rule) => rule.handler.call(req).await,
            None => self.fallback.call(req).await,
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// The default fallback.
async fn not_found(_req: Request) -> Response {
    Response::status(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use regex::Regex;

    use super::*;
    use crate::pattern::Prefix;

    fn req(method: &str, path: &str) -> Request {
        Request::new(method.to_owned(), path.to_owned(), Vec::new(), Vec::new())
    }

    /// A handler that counts its invocations and answers with `body`.
    fn counting(hits: &Arc<AtomicUsize>, body: &'static str) -> impl Handler {
        let hits = Arc::clone(hits);
        move |_req: Request| {
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Response::text(body)
            }
        }
    }

    #[tokio::test]
    async fn unique_match_invokes_that_handler_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new().get("/posts", counting(&hits, "posts"));

        let res = router.dispatch(req("GET", "/posts")).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(res.body, b"posts");
    }

    #[tokio::test]
    async fn last_matching_rule_wins() {
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .get(Regex::new(r"^/a").unwrap(), counting(&a, "a"))
            .get(Regex::new(r"^/a/b").unwrap(), counting(&b, "b"));

        // Both patterns match /a/b; b was registered later.
        let res = router.dispatch(req("GET", "/a/b")).await;
        assert_eq!(res.body, b"b");
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);

        // Only a matches /a/c.
        let res = router.dispatch(req("GET", "/a/c")).await;
        assert_eq!(res.body, b"a");
        assert_eq!(a.load(Ordering::SeqCst), 1);

        // Nothing matches /z.
        let res = router.dispatch(req("GET", "/z")).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(res.body.is_empty());
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_patterns_are_legal_and_the_later_one_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .get("/posts", counting(&first, "first"))
            .get("/posts", counting(&second, "second"));

        let res = router.dispatch(req("GET", "/posts")).await;

        assert_eq!(res.body, b"second");
        assert_eq!(first.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unregistered_method_goes_to_the_fallback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new().get(Prefix::new("/"), counting(&hits, "page"));

        let res = router.dispatch(req("POST", "/anything")).await;

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn default_fallback_is_a_bare_404() {
        let router = Router::new();

        let res = router.dispatch(req("GET", "/missing")).await;

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(res.headers.is_empty());
        assert!(res.body.is_empty());
    }

    #[tokio::test]
    async fn replaced_fallback_receives_unmatched_requests() {
        let fallback_hits = Arc::new(AtomicUsize::new(0));
        let route_hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .get("/posts", counting(&route_hits, "posts"))
            .fallback(counting(&fallback_hits, "custom"));

        let res = router.dispatch(req("GET", "/missing")).await;
        assert_eq!(res.body, b"custom");
        assert_eq!(fallback_hits.load(Ordering::SeqCst), 1);

        // Matched requests never touch the fallback.
        router.dispatch(req("GET", "/posts")).await;
        assert_eq!(fallback_hits.load(Ordering::SeqCst), 1);
        assert_eq!(route_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn later_fallback_overwrites_earlier_one() {
        let old = Arc::new(AtomicUsize::new(0));
        let new = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .fallback(counting(&old, "old"))
            .fallback(counting(&new, "new"));

        let res = router.dispatch(req("GET", "/missing")).await;

        assert_eq!(res.body, b"new");
        assert_eq!(old.load(Ordering::SeqCst), 0);
        assert_eq!(new.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn methods_are_open_string_keys() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new().route("PURGE", Prefix::new("/cache"), counting(&hits, "purged"));

        let res = router.dispatch(req("PURGE", "/cache/posts")).await;
        assert_eq!(res.body, b"purged");

        // Same path under a different method misses.
        let res = router.dispatch(req("GET", "/cache/posts")).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dispatch_never_mutates_the_rule_table() {
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .get(Regex::new(r"^/a").unwrap(), counting(&a, "a"))
            .get(Regex::new(r"^/a/b").unwrap(), counting(&b, "b"));

        // Repeat dispatches agree: the winning rule stays the winning rule.
        for _ in 0..3 {
            let res = router.dispatch(req("GET", "/a/b")).await;
            assert_eq!(res.body, b"b");
        }
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 3);
    }
}
