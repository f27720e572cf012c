use async_trait::async_trait;
use essentials::{debug, info, warn};
use http::{header, HeaderValue};
use tokio::{
    io::{AsyncWriteExt, BufReader},
    net::TcpStream,
};

use crate::{
    http::{server::Handler, HeaderMapExt, ReadRequest, Request, Response, WriteResponse},
    Router,
};

use super::{Context, EndpointService};

pub struct EntryPoint {
    router: Router<EndpointService>,
}

impl EntryPoint {
    pub fn new(router: Router<EndpointService>) -> Self {
        Self { router }
    }

    /// Dispatches `request` and turns the outcome into a response.
    pub async fn respond(&self, request: Request) -> Response {
        let path = request.path_only().to_string();
        match self.router.dispatch(&request.method, &path) {
            Ok(Some(matched)) => {
                debug!(pattern = matched.pattern.as_str(), "Endpoint matched");
                let ctx = Context::new(request, matched.params, matched.splats);
                matched.handler.handle(ctx).await
            }
            Ok(None) => {
                debug!(method = ?request.method, path = %path, "Request could not be matched to an endpoint");
                Response::not_found()
            }
            Err(err) => {
                warn!(path = %path, "Failed to decode request path: {}", err);
                Response::bad_request()
            }
        }
    }
}

#[async_trait]
impl Handler for EntryPoint {
    async fn handle(&self, stream: TcpStream) {
        let ip = stream.peer_addr().ok();
        info!(ip = ?ip, "Connection received");
        let (rx, mut tx) = stream.into_split();
        let mut reader = BufReader::new(rx);
        let mut response = match reader.read_request().await {
            Ok(request) => {
                debug!(target: "entrypoint", stage = "request", data = ?request, "parsed request header");
                self.respond(request).await
            }
            Err(err) => {
                warn!(ip = ?ip, "Failed to read request: {}", err);
                Response::bad_request()
            }
        };
        response.insert_header(header::CONNECTION, HeaderValue::from_static("close"));
        if let Err(err) = tx.write_response(&response).await {
            warn!(ip = ?ip, "Failed to write response: {}", err);
            return;
        }
        debug!(target: "entrypoint", stage = "response", data = ?response, "wrote response");
        let _ = tx.shutdown().await;
        info!(ip = ?ip, status = ?response.status, "Connection closed");
    }
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{server::Routes, RouterBuilder};

    fn entrypoint() -> EntryPoint {
        let mut builder = RouterBuilder::new();
        let mut routes = Routes::new(&mut builder);
        routes.get("/", |_: &Context| "/").unwrap();
        routes
            .get("/:path-param/path/*", |ctx: &Context| {
                format!(
                    "{}{}",
                    ctx.path_param("path-param").unwrap_or_default(),
                    ctx.splat(0).unwrap_or_default()
                )
            })
            .unwrap();
        routes
            .post("/created", |_: &Context| (StatusCode::CREATED, "created"))
            .unwrap();
        EntryPoint::new(builder.build())
    }

    #[tokio::test]
    async fn matched_request_gets_endpoint_response() {
        let entrypoint = entrypoint();
        let response = entrypoint
            .respond(Request::new(Method::GET, "/path-param/path/splat?q=1".to_string()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body(), "path-paramsplat");
        let response = entrypoint
            .respond(Request::new(Method::POST, "/created".to_string()))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unmatched_request_is_not_found() {
        let response = entrypoint()
            .respond(Request::new(Method::GET, "/missing".to_string()))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body(), "Not found");
    }

    #[tokio::test]
    async fn malformed_path_is_bad_request() {
        let response = entrypoint()
            .respond(Request::new(Method::GET, "/%zz".to_string()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
