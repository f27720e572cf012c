//! Ordered, first-match request path routing.
//!
//! Routes are kept per HTTP method in registration order. Dispatch normalizes the
//! request path and returns the first route whose pattern matches it structurally;
//! there is no specificity ranking, so an earlier route shadows any later one that
//! would match the same request.

use std::collections::HashMap;

use essentials::debug;
use http::Method;

use crate::error::{DecodeError, PatternError};

pub use builder::RouterBuilder;
pub use params::Params;
pub use path::normalize;
pub use pattern::{Captures, Pattern, Segment};

mod builder;
mod params;
mod path;
mod pattern;

/// A compiled pattern bound to a handler.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: Method,
    pub pattern: Pattern,
    pub handler: H,
}

impl<H> Route<H> {
    pub fn new(method: Method, pattern: &str, handler: H) -> Result<Self, PatternError> {
        Ok(Self {
            method,
            pattern: Pattern::compile(pattern)?,
            handler,
        })
    }
}

/// Outcome of a successful dispatch.
#[derive(Debug)]
pub struct Match<'r, H> {
    pub handler: &'r H,
    pub pattern: &'r Pattern,
    pub params: Params,
    pub splats: Vec<String>,
}

impl<'r, H> Match<'r, H> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn splat(&self, index: usize) -> Option<&str> {
        self.splats.get(index).map(String::as_str)
    }
}

/// Route table, read-only once built.
#[derive(Debug)]
pub struct Router<H> {
    routes: HashMap<Method, Vec<Route<H>>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern` and appends it to the routes of `method`.
    ///
    /// Duplicate patterns are accepted; the later one is simply never reached.
    pub fn add(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), PatternError> {
        let route = Route::new(method, pattern, handler)?;
        debug!(method = ?route.method, pattern = pattern, "Route registered");
        self.push(route);
        Ok(())
    }

    pub fn push(&mut self, route: Route<H>) {
        self.routes
            .entry(route.method.clone())
            .or_default()
            .push(route);
    }

    /// Routes registered for `method`, in registration order.
    pub fn routes(&self, method: &Method) -> impl Iterator<Item = &Route<H>> {
        self.routes.get(method).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the first route of `method` matching `raw_path`.
    ///
    /// `Ok(None)` means no route matched. An error is returned only when the path is
    /// not valid percent-encoded UTF-8.
    pub fn dispatch(
        &self,
        method: &Method,
        raw_path: &str,
    ) -> Result<Option<Match<'_, H>>, DecodeError> {
        let segments = normalize(raw_path)?;
        for route in self.routes(method) {
            if let Some(Captures { params, splats }) = route.pattern.captures(&segments) {
                debug!(method = ?method, path = raw_path, pattern = route.pattern.as_str(), "Route matched");
                return Ok(Some(Match {
                    handler: &route.handler,
                    pattern: &route.pattern,
                    params,
                    splats,
                }));
            }
        }
        debug!(method = ?method, path = raw_path, "No route matched");
        Ok(None)
    }
}

impl<H> FromIterator<Route<H>> for Router<H> {
    fn from_iter<T: IntoIterator<Item = Route<H>>>(routes: T) -> Self {
        let mut router = Self::new();
        for route in routes {
            router.push(route);
        }
        router
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn body(router: &Router<&'static str>, path: &str) -> Option<&'static str> {
        router
            .dispatch(&Method::GET, path)
            .unwrap()
            .map(|m| *m.handler)
    }

    #[test]
    fn a_bunch_of_routes() {
        let router: Router<&'static str> = [
            ("/", "root"),
            ("/path", "path"),
            ("/path/:path-param", "param"),
            ("/path/:path-param/*", "param-splat"),
            ("/*/*", "splat-splat"),
            ("/*/unreachable", "reached"),
            ("/*/*/:path-param", "splat-splat-param"),
            ("/*/*/:path-param/*", "splat-splat-param-splat"),
        ]
        .into_iter()
        .map(|(pattern, id)| Route::new(Method::GET, pattern, id).unwrap())
        .collect();

        assert_eq!(router.len(), 8);
        assert_eq!(body(&router, "/"), Some("root"));
        assert_eq!(body(&router, "/path"), Some("path"));
        assert_eq!(body(&router, "/path/p"), Some("param"));
        assert_eq!(body(&router, "/path/p/s"), Some("param-splat"));
        assert_eq!(body(&router, "/s1/s2"), Some("splat-splat"));
        assert_eq!(body(&router, "/s/unreachable"), Some("splat-splat"));
        assert_eq!(body(&router, "/s1/s2/p"), Some("splat-splat-param"));
        assert_eq!(body(&router, "/s1/s2/p/s3"), Some("splat-splat-param-splat"));
        assert_eq!(body(&router, "/s/s/s/s"), Some("splat-splat-param-splat"));
        assert_eq!(body(&router, "/a/b/c/d/e"), None);
    }

    #[test]
    fn param_and_splat() {
        let mut router = Router::new();
        router.add(Method::GET, "/:path-param/path/*", ()).unwrap();
        let matched = router
            .dispatch(&Method::GET, "/path-param/path/splat")
            .unwrap()
            .unwrap();
        assert_eq!(matched.param("path-param"), Some("path-param"));
        assert_eq!(matched.splat(0), Some("splat"));
        assert_eq!(matched.splat(1), None);
        assert_eq!(matched.pattern.as_str(), "/:path-param/path/*");
    }

    #[test]
    fn encoded_param_and_splat() {
        let mut router = Router::new();
        router.add(Method::GET, "/:path-param/path/*", ()).unwrap();
        let matched = router
            .dispatch(&Method::GET, "/java%2FKotlin/path/%2Fjava%2Fkotlin")
            .unwrap()
            .unwrap();
        assert_eq!(matched.param("path-param"), Some("java/kotlin"));
        assert_eq!(matched.splat(0), Some("/java/kotlin"));
    }

    #[test]
    fn param_name_and_value_are_lowercased() {
        let mut router = Router::new();
        router.add(Method::GET, "/:ParaM", ()).unwrap();
        let matched = router
            .dispatch(&Method::GET, "/SomeCamelCasedValue")
            .unwrap()
            .unwrap();
        assert_eq!(matched.param("pArAm"), Some("somecamelcasedvalue"));
    }

    #[test]
    fn first_registered_wins_over_more_specific() {
        let mut router = Router::new();
        router.add(Method::GET, "/users/:id", "param").unwrap();
        router.add(Method::GET, "/users/me", "static").unwrap();
        assert_eq!(body(&router, "/users/me"), Some("param"));
    }

    #[test]
    fn duplicates_are_accepted() {
        let mut router = Router::new();
        router.add(Method::GET, "/dup", "first").unwrap();
        router.add(Method::GET, "/dup/", "second").unwrap();
        assert_eq!(router.routes(&Method::GET).count(), 2);
        assert_eq!(body(&router, "/dup"), Some("first"));
    }

    #[test]
    fn methods_have_separate_tables() {
        let mut router = Router::new();
        router.add(Method::GET, "/item", "get").unwrap();
        router.add(Method::POST, "/item", "post").unwrap();
        assert_eq!(
            router.dispatch(&Method::POST, "/item").unwrap().map(|m| *m.handler),
            Some("post")
        );
        assert!(router.dispatch(&Method::DELETE, "/item").unwrap().is_none());
    }

    #[test]
    fn root_only_matches_empty_pattern() {
        let mut router = Router::new();
        router.add(Method::GET, "/*", "splat").unwrap();
        assert_eq!(body(&router, "/"), None);
        router.add(Method::GET, "/", "root").unwrap();
        assert_eq!(body(&router, "/"), Some("root"));
    }

    #[test]
    fn decode_error_is_returned() {
        let mut router = Router::new();
        router.add(Method::GET, "/:id", ()).unwrap();
        assert_eq!(
            router.dispatch(&Method::GET, "/%G1").unwrap_err(),
            DecodeError::MalformedEscape(1)
        );
    }

    #[test]
    fn invalid_pattern_is_not_registered() {
        let mut router = Router::new();
        assert!(router.add(Method::GET, "/(", ()).is_err());
        assert!(router.is_empty());
    }
}
