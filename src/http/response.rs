//! HTTP response value passed back up the middleware pipeline.
//!
//! Endpoints build a [`Response`] with the fluent builder; middleware that
//! runs after the endpoint decorates it in place with
//! [`Response::add_header`], which always appends.

use bytes::{BufMut, Bytes, BytesMut};

use super::{Headers, StatusCode};

/// An HTTP response: status, ordered multi-value headers, and a body.
///
/// # Examples
///
/// ```
/// use cacheware::http::{Response, StatusCode};
///
/// let response = Response::new(StatusCode::Ok)
///     .header("Cache-Control", "no-transform")
///     .body("cached");
///
/// assert_eq!(response.headers().get("cache-control"), Some("no-transform"));
/// assert_eq!(response.body_bytes().as_ref(), b"cached");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    /// Creates a new response with the given status and an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Bytes::new(),
        }
    }

    /// Appends a response header. Multiple calls with the same name are additive.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Appends a header in-place. Intended for middleware pipelines that receive
    /// a `Response` from downstream and need to decorate it without consuming it.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.append(name, value);
    }

    /// Sets the response body from a string.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Bytes::from(body.into());
        self
    }

    /// Returns the status code of this response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the response body.
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Serializes the response into HTTP/1.1 wire format.
    ///
    /// Headers are written in insertion order, repeated names on separate
    /// lines, followed by `Content-Length`.
    pub fn into_bytes(self) -> BytesMut {
        let estimated_size = 128 + self.headers.len() * 64 + self.body.len();
        let mut buf = BytesMut::with_capacity(estimated_size);

        buf.put(
            format!(
                "HTTP/1.1 {} {}\r\n",
                self.status.as_u16(),
                self.status.canonical_reason()
            )
            .as_bytes(),
        );
        buf.put(self.headers.to_string().as_bytes());
        buf.put(format!("Content-Length: {}\r\n\r\n", self.body.len()).as_bytes());
        buf.put(self.body);

        buf
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(bytes: BytesMut) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn add_header_appends_after_builder_headers() {
        let mut r = Response::new(StatusCode::Ok).header("Pragma", "private");
        r.add_header("pragma", "no-cache");
        let vals: Vec<_> = r.headers().get_all("Pragma").collect();
        assert_eq!(vals, vec!["private", "no-cache"]);
    }

    #[test]
    fn wire_format_repeats_multi_value_headers() {
        let r = Response::new(StatusCode::Ok)
            .header("Cache-Control", "no-store")
            .header("Cache-Control", "no-cache")
            .body("Hello");
        let s = to_string(r.into_bytes());
        assert!(s.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(s.contains("Cache-Control: no-store\r\nCache-Control: no-cache\r\n"));
        assert!(s.contains("Content-Length: 5\r\n"));
        assert!(s.ends_with("\r\n\r\nHello"));
    }

    #[test]
    fn empty_body() {
        let r = Response::new(StatusCode::NoContent);
        let s = to_string(r.into_bytes());
        assert!(s.starts_with("HTTP/1.1 204 No Content\r\n"));
        assert!(s.ends_with("Content-Length: 0\r\n\r\n"));
    }
}
