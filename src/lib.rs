//! Request path routing with ordered, first-match dispatch.
//!
//! Patterns are `/`-separated pieces: `:name` binds a named parameter, `*` captures a
//! positional splat and anything else is a case-insensitive regular expression that
//! must match the whole segment. Request paths are percent-decoded and lowercased
//! before matching, and a single trailing `/` is ignored on both sides.
//!
//! # Example usage
//!
//! ```no_run
//! use pathrouter::Context;
//!
//! #[tokio::main]
//! async fn main() {
//!     essentials::install();
//!     pathrouter::builder()
//!         .with_app_port(7878)
//!         .routes(|routes| {
//!             routes.get("/", |_: &Context| "/")?;
//!             routes.path("users", |users| {
//!                 users.get(":id", |ctx: &Context| {
//!                     format!("user {}", ctx.path_param("id").unwrap_or_default())
//!                 })?;
//!                 users.get("*/files/*", |ctx: &Context| ctx.splats().join("/"))
//!             })
//!         })
//!         .build()
//!         .unwrap()
//!         .run()
//!         .await;
//! }
//! ```
pub mod http;
pub(crate) mod io;
mod error;
mod router;
pub(crate) mod server;

pub use error::{DecodeError, PatternError};
pub use router::{
    normalize, Captures, Match, Params, Pattern, Route, Router, RouterBuilder, Segment,
};
pub use server::{
    builder, AppBuilder, Context, Endpoint, EndpointService, EntryPoint, Routes, Server,
};
