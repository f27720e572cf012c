use anyhow::{Context as _, Result};
use essentials::{debug, error};
use std::net::{IpAddr, SocketAddr};

use crate::error::PatternError;
use crate::http::server::Server as HttpServer;
use crate::http::Response;
use crate::RouterBuilder;

use super::{
    entrypoint::EntryPoint, health_check::HealthCheck, Context, EndpointService, Routes,
};

/// A builder for an application server.
pub struct AppBuilder {
    routes: RouterBuilder<EndpointService>,
    registration_error: Option<PatternError>,
    host: IpAddr,
    app_port: u16,
    health_check_port: u16,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            routes: RouterBuilder::new(),
            registration_error: None,
            host: IpAddr::from([127, 0, 0, 1]), // Default host (localhost)
            app_port: 80,
            health_check_port: 9000,
        }
    }

    /// Declare routes, possibly nested under shared path prefixes.
    ///
    /// Routes are matched in declaration order and the first match wins.
    /// A pattern that fails to compile makes [`AppBuilder::build`] fail.
    pub fn routes<F>(mut self, routes: F) -> Self
    where
        F: FnOnce(&mut Routes<'_>) -> std::result::Result<(), PatternError>,
    {
        if self.registration_error.is_some() {
            return self;
        }
        if let Err(err) = routes(&mut Routes::new(&mut self.routes)) {
            error!("Failed to register route: {}", err);
            self.registration_error = Some(err);
        }
        self
    }

    /// Register a single `GET` route.
    pub fn get<F, R>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.routes(|routes| routes.get(pattern, handler))
    }

    /// Register a single `POST` route.
    pub fn post<F, R>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Context) -> R + Send + Sync + 'static,
        R: Into<Response> + Send + 'static,
    {
        self.routes(|routes| routes.post(pattern, handler))
    }

    /// Set the host for the application service.
    /// The default host is 127.0.0.1
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Set the port for the application service.
    /// The default port is 80
    pub fn with_app_port(mut self, port: u16) -> Self {
        self.app_port = port;
        self
    }

    /// Set the port for the health check service.
    /// The default port is 9000
    pub fn with_health_check_port(mut self, port: u16) -> Self {
        self.health_check_port = port;
        self
    }

    /// Build the server with the given configuration.
    pub fn build(self) -> Result<Server> {
        if let Some(err) = self.registration_error {
            return Err(err).context("Invalid route pattern");
        }
        let router = self.routes.build();
        debug!(routes = router.len(), "Routes registered");
        Ok(Server {
            app: HttpServer::new(
                SocketAddr::new(self.host, self.app_port),
                EntryPoint::new(router),
            ),
            health_check: HttpServer::new(
                SocketAddr::new(self.host, self.health_check_port),
                HealthCheck,
            ),
        })
    }
}

pub struct Server {
    pub app: HttpServer<EntryPoint>,
    pub health_check: HttpServer<HealthCheck>,
}

impl Server {
    /// Start the server. Returns once either the app or the health check stops.
    pub async fn run(self) {
        debug!("Starting server");
        tokio::select! {
            result = self.app.run() => {
                debug!("App stopped");
                if let Err(err) = result {
                    error!("App error: {:?}", err);
                }
            }
            result = self.health_check.run() => {
                debug!("health_check stopped");
                if let Err(err) = result {
                    error!("health_check error: {:?}", err);
                }
            }
        }
        debug!("Server stopped");
    }
}

/// Create a new application server builder.
pub fn builder() -> AppBuilder {
    AppBuilder::new()
}
