//! Inbound HTTP request value.
//!
//! Middleware in this crate never rewrites a request; it is carried through
//! the pipeline inside a [`Context`](crate::context::Context) and handed to
//! the endpoint unchanged.

use bytes::Bytes;

use super::{Headers, Method};

/// An inbound HTTP request.
///
/// # Examples
///
/// ```
/// use cacheware::http::{Method, Request};
///
/// let request = Request::new(Method::Get, "/reports?year=2024")
///     .header("Host", "localhost");
///
/// assert_eq!(request.path(), "/reports");
/// assert_eq!(request.query_string(), Some("year=2024"));
/// assert_eq!(request.headers().get("host"), Some("localhost"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: Headers,
    body: Bytes,
}

impl Request {
    /// Creates a request for `target`, splitting off any query string.
    pub fn new(method: Method, target: impl AsRef<str>) -> Self {
        let target = target.as_ref();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (target.to_owned(), None),
        };

        Self {
            method,
            path,
            query,
            headers: Headers::new(),
            body: Bytes::new(),
        }
    }

    /// Appends a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path (without the query string).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string (without the leading `?`), if any.
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the request body bytes.
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_without_query() {
        let req = Request::new(Method::Get, "/");
        assert_eq!(req.path(), "/");
        assert_eq!(req.query_string(), None);
    }

    #[test]
    fn body_is_kept() {
        let req = Request::new(Method::Post, "/upload").body("payload");
        assert_eq!(req.body_bytes().as_ref(), b"payload");
        assert_eq!(req.method(), &Method::Post);
    }
}
