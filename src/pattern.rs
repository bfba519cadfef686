//! Path matching.
//!
//! Routes are registered against a [`Pattern`], not a fixed path syntax.
//! Regex, prefix, and exact-string matching are all first-class; anything
//! that can answer "does this path match?" can route.

use regex::Regex;

/// A predicate over a request path.
pub trait Pattern: Send + Sync + 'static {
    /// Returns `true` if `path` matches.
    fn matches(&self, path: &str) -> bool;
}

/// Matches when the regex matches anywhere in the path. Anchor with `^` to
/// match from the start: `Regex::new(r"^/api/posts/")`.
impl Pattern for Regex {
    fn matches(&self, path: &str) -> bool {
        self.is_match(path)
    }
}

/// Whole-path equality.
#[derive(Clone, Debug)]
pub struct Exact {
    path: String,
}

impl Exact {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Pattern for Exact {
    fn matches(&self, path: &str) -> bool {
        self.path == path
    }
}

/// Case-sensitive path-prefix match.
#[derive(Clone, Debug)]
pub struct Prefix {
    prefix: String,
}

impl Prefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Pattern for Prefix {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// A bare string literal routes by exact match: `.get("/healthz", handler)`.
impl Pattern for &'static str {
    fn matches(&self, path: &str) -> bool {
        *self == path
    }
}

impl Pattern for String {
    fn matches(&self, path: &str) -> bool {
        self == path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches_whole_path_only() {
        let pattern = Exact::new("/api/posts/");

        assert!(pattern.matches("/api/posts/"));
        assert!(!pattern.matches("/api/posts/1"));
        assert!(!pattern.matches("/api"));
    }

    #[test]
    fn str_literal_is_exact() {
        // Called through the trait: `str` has an inherent `matches` of its own.
        let pattern = "/healthz";
        assert!(Pattern::matches(&pattern, "/healthz"));
        assert!(!Pattern::matches(&pattern, "/healthz/deep"));
    }

    #[test]
    fn prefix_is_case_sensitive() {
        let pattern = Prefix::new("/api");

        assert!(pattern.matches("/api/v1"));
        assert!(pattern.matches("/api"));
        assert!(!pattern.matches("/API/v1"));
        assert!(!pattern.matches("/images"));
    }

    #[test]
    fn regex_matches_unanchored_unless_anchored() {
        let anchored = Regex::new(r"^/a/b").unwrap();
        assert!(anchored.matches("/a/b"));
        assert!(anchored.matches("/a/b/c"));
        assert!(!anchored.matches("/x/a/b"));

        let loose = Regex::new(r"posts").unwrap();
        assert!(loose.matches("/api/posts/"));
    }
}
