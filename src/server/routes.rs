use http::Method;

use crate::{error::PatternError, http::Response, RouterBuilder};

use super::{Context, Endpoint, EndpointService};

/// Route declarations of an application, see [`crate::AppBuilder::routes`].
pub struct Routes<'a> {
    builder: &'a mut RouterBuilder<EndpointService>,
}

impl<'a> Routes<'a> {
    pub(crate) fn new(builder: &'a mut RouterBuilder<EndpointService>) -> Self {
        Self { builder }
    }

    /// Declares the routes of `routes` under the `fragment` prefix.
    pub fn path<F>(&mut self, fragment: &str, routes: F) -> Result<(), PatternError>
    where
        F: FnOnce(&mut Routes<'_>) -> Result<(), PatternError>,
    {
        self.builder
            .path(fragment, |builder| routes(&mut Routes::new(builder)))
    }

    pub fn endpoint<E>(&mut self, method: Method, fragment: &str, endpoint: E) -> Result<(), PatternError>
    where
        E: Endpoint + Send + Sync + 'static,
    {
        self.builder.add(method, fragment, Box::new(endpoint))
    }

    pub fn get<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::GET, fragment, handler)
    }

    pub fn post<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::POST, fragment, handler)
    }

    pub fn put<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::PUT, fragment, handler)
    }

    pub fn patch<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::PATCH, fragment, handler)
    }

    pub fn delete<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::DELETE, fragment, handler)
    }

    pub fn head<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::HEAD, fragment, handler)
    }

    pub fn options<F, R>(&mut self, fragment: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.endpoint(Method::OPTIONS, fragment, handler)
    }
}
