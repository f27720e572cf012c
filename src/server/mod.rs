pub mod app;
mod context;
mod endpoint;
mod entrypoint;
mod health_check;
mod routes;

pub use app::{builder, AppBuilder, Server};
pub use context::Context;
pub use endpoint::{Endpoint, EndpointService};
pub use entrypoint::EntryPoint;
pub use routes::Routes;
