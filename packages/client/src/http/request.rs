//! HTTP request type
//!
//! A lean request representation for the execution layer: method, URL,
//! headers and an optional payload. The same request value is resent on an
//! authentication retry, so header mutation and payload repeatability are
//! first-class.

use http::{HeaderMap, HeaderName, HeaderValue, Method, Version};
use url::Url;

use super::body::RequestBody;
use crate::error::{self, Error};

/// An HTTP request as seen by the execution layer.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Url,
    version: Version,
    headers: HeaderMap,
    body: Option<RequestBody>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Convenience constructor for a GET request.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the URL does not parse.
    pub fn get(url: &str) -> Result<Self, Error> {
        Ok(Self::new(Method::GET, parse_url(url)?))
    }

    /// Convenience constructor for a POST request.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the URL does not parse.
    pub fn post(url: &str) -> Result<Self, Error> {
        Ok(Self::new(Method::POST, parse_url(url)?))
    }

    /// Convenience constructor for a PUT request.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the URL does not parse.
    pub fn put(url: &str) -> Result<Self, Error> {
        Ok(Self::new(Method::PUT, parse_url(url)?))
    }

    /// Convenience constructor for a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the URL does not parse.
    pub fn delete(url: &str) -> Result<Self, Error> {
        Ok(Self::new(Method::DELETE, parse_url(url)?))
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut RequestBody> {
        self.body.as_mut()
    }

    pub fn set_body(&mut self, body: impl Into<RequestBody>) {
        self.body = Some(body.into());
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(error::builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_url() {
        let err = Request::get("not a url").expect_err("junk URL should fail");
        assert_eq!(err.kind(), crate::error::Kind::Builder);
    }

    #[test]
    fn headers_survive_builder_chain() {
        let request = Request::get("http://foo/test")
            .expect("test URL should parse")
            .with_header(
                http::header::ACCEPT,
                HeaderValue::from_static("application/json"),
            );
        assert_eq!(
            request.headers().get(http::header::ACCEPT),
            Some(&HeaderValue::from_static("application/json"))
        );
    }
}
