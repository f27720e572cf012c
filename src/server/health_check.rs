use async_trait::async_trait;
use essentials::{debug, error};
use http::{header, HeaderValue, StatusCode};
use tokio::{io::BufReader, net::TcpStream};

use crate::http::{server::Handler, HeaderMapExt, ReadRequest, Response, WriteResponse};

pub struct HealthCheck;

#[async_trait]
impl Handler for HealthCheck {
    async fn handle(&self, stream: TcpStream) {
        let (rx, mut tx) = stream.into_split();
        if let Err(e) = BufReader::new(rx).read_request().await {
            debug!("Failed to read health check request: {:?}", e);
        }
        let mut response = Response::new(StatusCode::OK);
        response.insert_header(header::CONNECTION, HeaderValue::from_static("close"));
        if let Err(e) = tx.write_response(&response).await {
            error!("Failed to write to stream: {:?}", e);
        }
    }
}
