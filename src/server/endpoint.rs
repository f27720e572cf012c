use async_trait::async_trait;

use crate::http::Response;

use super::Context;

pub type EndpointService = Box<dyn Endpoint + Send + Sync>;

/// Produces the response for a matched request.
///
/// Plain closures taking `&Context` and returning anything convertible into a
/// [`Response`] (`String`, `&'static str`, `(StatusCode, body)`) are endpoints too.
#[async_trait]
pub trait Endpoint {
    async fn handle(&self, ctx: Context) -> Response;
}

#[async_trait]
impl<F, R> Endpoint for F
where
    F: Fn(&Context) -> R + Send + Sync + 'static,
    R: Into<Response> + Send + 'static,
{
    async fn handle(&self, ctx: Context) -> Response {
        self(&ctx).into()
    }
}
