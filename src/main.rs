use pathrouter::Context;
use std::net::IpAddr;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "pathrouter", about = "Serve a small set of demo routes")]
struct Opt {
    /// Address the app and health check listen on
    #[structopt(long, env = "HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port of the app service
    #[structopt(long, env = "PORT", default_value = "80")]
    port: u16,

    /// Port of the health check service
    #[structopt(long, env = "HEALTHCHECK_PORT", default_value = "9000")]
    health_check_port: u16,
}

#[tokio::main]
async fn main() {
    essentials::install();
    let opt = Opt::from_args();
    let server = pathrouter::builder()
        .with_host(opt.host)
        .with_app_port(opt.port)
        .with_health_check_port(opt.health_check_port)
        .routes(|routes| {
            routes.get("/", |_: &Context| "/")?;
            routes.get("/hello", |_: &Context| "Hello")?;
            routes.path("users", |users| {
                users.get(":id", |ctx: &Context| {
                    format!("user {}", ctx.path_param("id").unwrap_or_default())
                })?;
                users.get("[0-9]+/files/*", |ctx: &Context| {
                    format!("file {}", ctx.splat(0).unwrap_or_default())
                })
            })?;
            routes.get("/*/*", |ctx: &Context| format!("/{}", ctx.splats().join("/")))
        })
        .build();
    match server {
        Ok(server) => server.run().await,
        Err(err) => essentials::error!("{:?}", err),
    }
}
