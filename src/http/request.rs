use crate::io::error::{error, RequestStatusLine};

use super::{headers::HeaderMapExt, ReadHeaders};
use async_trait::async_trait;
use http::{HeaderMap, Method};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};

#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub version: String,
    headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            version: "HTTP/1.1".to_string(),
            headers: HeaderMap::new(),
        }
    }

    /// Request target without the query string.
    pub fn path_only(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }

    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, query)| query)
    }
}

impl HeaderMapExt for Request {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[async_trait]
pub trait ReadRequest {
    async fn read_request(&mut self) -> io::Result<Request>;
}

#[async_trait]
impl<R> ReadRequest for R
where
    R: AsyncBufRead + ?Sized + Unpin + Send,
{
    async fn read_request(&mut self) -> io::Result<Request> {
        let status_line = self
            .lines()
            .next_line()
            .await?
            .ok_or(error(RequestStatusLine::MissingStatusLine))?;
        let (method, path, version) = {
            let mut parts = status_line.split_whitespace();
            (
                parts
                    .next()
                    .ok_or(error(RequestStatusLine::MissingMethod))?
                    .parse()
                    .map_err(|_| error(RequestStatusLine::InvalidMethod))?,
                parts
                    .next()
                    .ok_or(error(RequestStatusLine::MissingPath))?
                    .to_string(),
                parts
                    .next()
                    .ok_or(error(RequestStatusLine::MissingVersion))?
                    .to_string(),
            )
        };
        Ok(Request {
            method,
            path,
            version,
            headers: self.read_headers().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::io::BufReader;

    use super::*;

    #[tokio::test]
    async fn parses_request_head() {
        let mut reader =
            BufReader::new(&b"GET /hello/World?x=1 HTTP/1.1\r\nHost: app\r\n\r\n"[..]);
        let request = reader.read_request().await.unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path_only(), "/hello/World");
        assert_eq!(request.query(), Some("x=1"));
        assert_eq!(request.version, "HTTP/1.1");
        assert_eq!(request.header("host").unwrap(), "app");
    }

    #[tokio::test]
    async fn rejects_missing_version() {
        let mut reader = BufReader::new(&b"GET /hello\r\n\r\n"[..]);
        let error = reader.read_request().await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn path_without_query() {
        let request = Request::new(Method::GET, "/a/b".to_string());
        assert_eq!(request.path_only(), "/a/b");
        assert_eq!(request.query(), None);
    }
}
