use http::{header::AsHeaderName, HeaderValue, Method};

use crate::{
    http::{HeaderMapExt, Request},
    Params,
};

/// Everything an endpoint gets to see about the matched request.
#[derive(Debug)]
pub struct Context {
    request: Request,
    params: Params,
    splats: Vec<String>,
}

impl Context {
    pub(crate) fn new(request: Request, params: Params, splats: Vec<String>) -> Self {
        Self {
            request,
            params,
            splats,
        }
    }

    pub fn method(&self) -> &Method {
        &self.request.method
    }

    /// Raw request path, without the query string.
    pub fn path(&self) -> &str {
        self.request.path_only()
    }

    pub fn query(&self) -> Option<&str> {
        self.request.query()
    }

    /// Value bound to `:name`, decoded and lowercased. The name is case-insensitive.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn path_params(&self) -> &Params {
        &self.params
    }

    /// Value captured by the `index`-th `*` of the pattern, counting from the left.
    pub fn splat(&self, index: usize) -> Option<&str> {
        self.splats.get(index).map(String::as_str)
    }

    pub fn splats(&self) -> &[String] {
        &self.splats
    }

    pub fn header<K: AsHeaderName>(&self, key: K) -> Option<&HeaderValue> {
        self.request.header(key)
    }
}
