//! HTTP response type

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Version};

use super::body::ResponseBody;

/// An HTTP response as seen by the execution layer.
///
/// The body of the response handed back to the caller is left open; bodies of
/// responses consumed internally (authentication challenges) are drained and
/// released before the next attempt.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: ResponseBody,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: ResponseBody::empty(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
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
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }

    #[must_use]
    pub fn into_body(self) -> ResponseBody {
        self.body
    }
}
