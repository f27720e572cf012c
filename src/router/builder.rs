use std::iter;

use http::Method;

use crate::error::PatternError;

use super::Router;

/// Declares routes under nested path prefixes.
///
/// ```
/// use http::Method;
/// use pathrouter::RouterBuilder;
///
/// let mut builder = RouterBuilder::new();
/// builder
///     .path("test", |test| {
///         test.get(":id", "by-id")?;
///         test.get("", "index")
///     })
///     .unwrap();
/// let router = builder.build();
/// let matched = router.dispatch(&Method::GET, "/test/42/").unwrap().unwrap();
/// assert_eq!(*matched.handler, "by-id");
/// assert_eq!(matched.param("id"), Some("42"));
/// ```
#[derive(Debug)]
pub struct RouterBuilder<H> {
    router: Router<H>,
    scopes: Vec<String>,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self {
            router: Router::new(),
            scopes: Vec::new(),
        }
    }
}

impl<H> RouterBuilder<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `routes` with `fragment` pushed onto the prefix stack.
    ///
    /// The prefix is popped again whether or not `routes` succeeds. An empty
    /// `fragment` adds no segment.
    pub fn path<F, E>(&mut self, fragment: &str, routes: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.scopes.push(fragment.to_string());
        let result = routes(self);
        self.scopes.pop();
        result
    }

    /// Registers `fragment`, prefixed by every active scope, for `method`.
    pub fn add(&mut self, method: Method, fragment: &str, handler: H) -> Result<(), PatternError> {
        let pattern = self.full_pattern(fragment);
        self.router.add(method, &pattern, handler)
    }

    pub fn get(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::GET, fragment, handler)
    }

    pub fn post(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::POST, fragment, handler)
    }

    pub fn put(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::PUT, fragment, handler)
    }

    pub fn patch(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::PATCH, fragment, handler)
    }

    pub fn delete(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::DELETE, fragment, handler)
    }

    pub fn head(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::HEAD, fragment, handler)
    }

    pub fn options(&mut self, fragment: &str, handler: H) -> Result<(), PatternError> {
        self.add(Method::OPTIONS, fragment, handler)
    }

    pub fn build(self) -> Router<H> {
        self.router
    }

    /// Scope fragments lose one leading and one trailing `/`, the leaf fragment only its
    /// leading one, so empty interior segments survive exactly as with [`Router::add`].
    fn full_pattern(&self, fragment: &str) -> String {
        let scopes = self.scopes.iter().map(|scope| {
            let scope = scope.strip_prefix('/').unwrap_or(scope);
            scope.strip_suffix('/').unwrap_or(scope)
        });
        let leaf = fragment.strip_prefix('/').unwrap_or(fragment);
        let pieces = scopes
            .chain(iter::once(leaf))
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>();
        format!("/{}", pieces.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn patterns<'a>(router: &'a Router<&'static str>) -> Vec<&'a str> {
        router
            .routes(&Method::GET)
            .map(|route| route.pattern.as_str())
            .collect()
    }

    #[test]
    fn joins_nested_scopes() {
        let mut builder = RouterBuilder::new();
        builder
            .path("api", |api| {
                api.path("/v1/", |v1| {
                    v1.get("users/:id", "user")?;
                    v1.get("", "v1")
                })?;
                api.get("/health", "health")
            })
            .unwrap();
        builder.get("/", "root").unwrap();
        let router = builder.build();
        assert_eq!(
            patterns(&router),
            vec!["/api/v1/users/:id", "/api/v1", "/api/health", "/"]
        );
    }

    #[test]
    fn trailing_slashes_and_params() {
        let mut builder = RouterBuilder::new();
        builder
            .path("test", |test| {
                test.path(":id", |id| id.get("", "id"))?;
                test.get("", "test")
            })
            .unwrap();
        let router = builder.build();

        let matched = router
            .dispatch(&Method::GET, "/test/path-param/")
            .unwrap()
            .unwrap();
        assert_eq!(*matched.handler, "id");
        assert_eq!(matched.param("id"), Some("path-param"));
        let matched = router.dispatch(&Method::GET, "/test/").unwrap().unwrap();
        assert_eq!(*matched.handler, "test");
    }

    #[test]
    fn scope_is_popped_after_failure() {
        let mut builder = RouterBuilder::new();
        let result = builder.path("broken", |broken| broken.get("(", "never"));
        assert!(result.is_err());
        builder.get("after", "after").unwrap();
        let router = builder.build();
        assert_eq!(patterns(&router), vec!["/after"]);
    }

    #[test]
    fn shorthands_use_their_method() {
        let mut builder = RouterBuilder::new();
        builder.post("/item", "post").unwrap();
        builder.delete("/item", "delete").unwrap();
        let router = builder.build();
        assert_eq!(router.routes(&Method::POST).count(), 1);
        assert_eq!(router.routes(&Method::DELETE).count(), 1);
        assert_eq!(router.routes(&Method::GET).count(), 0);
    }

    #[test]
    fn empty_interior_segments_match_direct_registration() {
        let mut builder = RouterBuilder::new();
        builder.path("a", |a| a.get("x//", "scoped")).unwrap();
        builder.path("/b/", |b| b.get("/", "b")).unwrap();
        let router = builder.build();
        assert_eq!(patterns(&router), vec!["/a/x//", "/b"]);

        let mut direct = Router::new();
        direct.add(Method::GET, "/a/x//", "direct").unwrap();
        let scoped = router.routes(&Method::GET).next().unwrap();
        let direct = direct.routes(&Method::GET).next().unwrap();
        assert_eq!(scoped.pattern.len(), 3);
        assert_eq!(scoped.pattern.len(), direct.pattern.len());
        assert!(router.dispatch(&Method::GET, "/a/x/").unwrap().is_none());
    }
}
