use super::{headers::HeaderMapExt, WriteHeaders};
use async_trait::async_trait;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use tokio::io::{self, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone)]
pub struct Response {
    pub version: String,
    pub status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: "HTTP/1.1".to_string(),
            status,
            headers: vec![(header::CONTENT_LENGTH, HeaderValue::from_static("0"))]
                .into_iter()
                .collect(),
            body: String::new(),
        }
    }

    pub fn ok<B: Into<String>>(body: B) -> Self {
        Self::new(StatusCode::OK).with_body(body)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND).with_body("Not found")
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST).with_body("Bad request")
    }

    pub fn error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_body<B: Into<String>>(mut self, body: B) -> Self {
        self.set_body(body);
        self
    }

    pub fn set_body<B: Into<String>>(&mut self, body: B) {
        self.body = body.into();
        self.headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(self.body.len()));
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl From<String> for Response {
    fn from(body: String) -> Self {
        Self::ok(body)
    }
}

impl From<&'static str> for Response {
    fn from(body: &'static str) -> Self {
        Self::ok(body)
    }
}

impl<B: Into<String>> From<(StatusCode, B)> for Response {
    fn from((status, body): (StatusCode, B)) -> Self {
        Self::new(status).with_body(body)
    }
}

impl HeaderMapExt for Response {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[async_trait]
pub trait WriteResponse {
    async fn write_response(&mut self, response: &Response) -> io::Result<()>;
}

#[async_trait]
impl<R> WriteResponse for R
where
    R: AsyncWrite + ?Sized + Unpin + Send,
{
    async fn write_response(&mut self, response: &Response) -> io::Result<()> {
        self.write_all(response.version.as_bytes()).await?;
        self.write_all(b" ").await?;
        self.write_all(response.status.as_str().as_bytes()).await?;
        self.write_all(b" ").await?;
        if let Some(reason) = response.status.canonical_reason() {
            self.write_all(reason.as_bytes()).await?;
        }
        self.write_all(b"\r\n").await?;
        self.write_headers(&response.headers).await?;
        self.write_all(b"\r\n").await?;
        self.write_all(response.body.as_bytes()).await?;
        self.flush().await?;
        Ok(())
    }
}
