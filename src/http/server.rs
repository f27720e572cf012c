use anyhow::{Context, Result};
use async_trait::async_trait;
use essentials::debug;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::{TcpListener, TcpStream};

/// Serves a single accepted connection.
#[async_trait]
pub trait Handler {
    async fn handle(&self, stream: TcpStream);
}

/// Accept loop that hands every connection to its own task.
pub struct Server<H: Handler + Send + Sync + 'static> {
    addr: SocketAddr,
    handler: Arc<H>,
}

impl<H: Handler + Send + Sync + 'static> Server<H> {
    pub fn new(addr: SocketAddr, handler: H) -> Self {
        Self {
            addr,
            handler: Arc::new(handler),
        }
    }

    /// Address the server was configured with. Port `0` lets the OS pick one,
    /// see [`Listening::local_addr`] for the address actually bound.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn bind(self) -> Result<Listening<H>> {
        let listener = TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind to address: {}", self.addr))?;
        let local_addr = listener
            .local_addr()
            .context("Failed to read bound address")?;
        debug!(configured = %self.addr, bound = %local_addr, "Listening");
        Ok(Listening {
            listener,
            local_addr,
            handler: self.handler,
        })
    }

    pub async fn run(self) -> Result<()> {
        self.bind().await?.serve().await
    }
}

/// A bound [`Server`] that has not started accepting yet.
pub struct Listening<H: Handler + Send + Sync + 'static> {
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<H>,
}

impl<H: Handler + Send + Sync + 'static> Listening<H> {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn serve(self) -> Result<()> {
        loop {
            let (stream, peer) = self
                .listener
                .accept()
                .await
                .with_context(|| format!("Failed to accept on: {}", self.local_addr))?;
            debug!("Accepted connection from: {}", peer);
            let handler = self.handler.clone();
            tokio::spawn(async move {
                handler.handle(stream).await;
            });
        }
    }
}
