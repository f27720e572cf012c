use async_trait::async_trait;
use http::{header::AsHeaderName, HeaderMap, HeaderName, HeaderValue};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::io::error::{error, Headers};

pub trait HeaderMapExt {
    fn headers(&self) -> &HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn header<K: AsHeaderName>(&self, key: K) -> Option<&HeaderValue> {
        self.headers().get(key)
    }

    fn insert_header(&mut self, key: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(key, value);
    }
}

#[async_trait]
pub trait WriteHeaders {
    async fn write_headers(&mut self, headers: &HeaderMap) -> io::Result<()>;
}

#[async_trait]
impl<R> WriteHeaders for R
where
    R: AsyncWrite + ?Sized + Unpin + Send,
{
    async fn write_headers(&mut self, headers: &HeaderMap) -> io::Result<()> {
        for (key, value) in headers {
            self.write_all(key.as_str().as_bytes()).await?;
            self.write_all(b": ").await?;
            self.write_all(value.as_bytes()).await?;
            self.write_all(b"\r\n").await?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait ReadHeaders {
    async fn read_headers(&mut self) -> std::io::Result<HeaderMap>;
}

#[async_trait]
impl<R> ReadHeaders for R
where
    R: AsyncBufRead + ?Sized + Unpin + Send,
{
    async fn read_headers(&mut self) -> std::io::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        loop {
            let mut line = String::new();
            if self.read_line(&mut line).await? == 0 {
                break;
            }
            if line == "\r\n" || line == "\n" {
                break;
            }
            if let Some(i) = line.find(':') {
                let (key, value) = line.split_at(i);
                headers.append(
                    HeaderName::from_bytes(key.trim().as_bytes())
                        .map_err(Headers::InvalidName)
                        .map_err(error)?,
                    HeaderValue::from_str(value[1..].trim())
                        .map_err(Headers::InvalidValue)
                        .map_err(error)?,
                );
            }
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::io::BufReader;

    use super::*;

    #[tokio::test]
    async fn reads_until_blank_line() {
        let mut reader = BufReader::new(&b"Host: app\r\nX-Custom: a:b\r\n\r\nbody"[..]);
        let headers = reader.read_headers().await.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("host").unwrap(), "app");
        assert_eq!(headers.get("x-custom").unwrap(), "a:b");
    }

    #[tokio::test]
    async fn stops_at_end_of_stream() {
        let mut reader = BufReader::new(&b"Host: app\r\n"[..]);
        let headers = reader.read_headers().await.unwrap();
        assert_eq!(headers.len(), 1);
    }

    #[tokio::test]
    async fn writes_each_header() {
        let mut headers = HeaderMap::new();
        headers.insert("content-length", HeaderValue::from_static("0"));
        let mut out = Vec::new();
        out.write_headers(&headers).await.unwrap();
        assert_eq!(out, b"content-length: 0\r\n");
    }
}
