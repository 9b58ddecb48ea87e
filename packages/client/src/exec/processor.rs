//! Interceptor processing
//!
//! Outbound and inbound interceptor passes run exactly once per physical
//! attempt. The pipeline is the stock composite; callers with an existing
//! processor implement the trait directly.

use std::sync::Arc;

use http::header::USER_AGENT;
use http::HeaderValue;

use crate::context::ExecContext;
use crate::error::{self, Result};
use crate::http::{Request, Response};

/// Message processing hook, invoked once per attempt per direction.
pub trait HttpProcessor: Send + Sync {
    /// Process an outbound request before it is sent.
    ///
    /// # Errors
    ///
    /// A failure aborts the attempt before anything is sent.
    fn process_request(&self, request: &mut Request, context: &mut ExecContext) -> Result<()>;

    /// Process an inbound response before challenge evaluation.
    ///
    /// # Errors
    ///
    /// A failure discards the connection and is surfaced to the caller
    /// unchanged.
    fn process_response(&self, response: &mut Response, context: &mut ExecContext) -> Result<()>;
}

/// An outbound interceptor.
pub trait RequestInterceptor: Send + Sync {
    /// # Errors
    ///
    /// A failure aborts the attempt before anything is sent.
    fn process(&self, request: &mut Request, context: &mut ExecContext) -> Result<()>;
}

/// An inbound interceptor.
pub trait ResponseInterceptor: Send + Sync {
    /// # Errors
    ///
    /// A failure discards the connection and is surfaced unchanged.
    fn process(&self, response: &mut Response, context: &mut ExecContext) -> Result<()>;
}

/// Sequential interceptor pipeline.
#[derive(Default)]
pub struct InterceptorPipeline {
    request: Vec<Arc<dyn RequestInterceptor>>,
    response: Vec<Arc<dyn ResponseInterceptor>>,
}

impl InterceptorPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_request<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.request.push(Arc::new(interceptor));
        self
    }

    #[must_use]
    pub fn add_response<I: ResponseInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.response.push(Arc::new(interceptor));
        self
    }
}

impl HttpProcessor for InterceptorPipeline {
    fn process_request(&self, request: &mut Request, context: &mut ExecContext) -> Result<()> {
        for interceptor in &self.request {
            interceptor.process(request, context)?;
        }
        Ok(())
    }

    fn process_response(&self, response: &mut Response, context: &mut ExecContext) -> Result<()> {
        for interceptor in &self.response {
            interceptor.process(response, context)?;
        }
        Ok(())
    }
}

/// Stamps a `User-Agent` header on requests that lack one.
pub struct RequestUserAgent {
    agent: HeaderValue,
}

impl RequestUserAgent {
    /// # Errors
    ///
    /// Returns a builder error when `agent` is not a valid header value.
    pub fn new(agent: &str) -> Result<Self> {
        Ok(Self {
            agent: HeaderValue::from_str(agent).map_err(error::builder)?,
        })
    }
}

impl RequestInterceptor for RequestUserAgent {
    fn process(&self, request: &mut Request, _context: &mut ExecContext) -> Result<()> {
        if !request.headers().contains_key(USER_AGENT) {
            request.headers_mut().insert(USER_AGENT, self.agent.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_runs_interceptors_in_order() {
        struct Tag(&'static str);
        impl RequestInterceptor for Tag {
            fn process(&self, request: &mut Request, _context: &mut ExecContext) -> Result<()> {
                let name = http::HeaderName::from_static("x-seen");
                let value = HeaderValue::from_static(self.0);
                request.headers_mut().append(name, value);
                Ok(())
            }
        }

        let pipeline = InterceptorPipeline::new()
            .add_request(Tag("first"))
            .add_request(Tag("second"));
        let mut request = Request::get("http://foo/test").expect("test URL should parse");
        let mut context = ExecContext::new();
        pipeline
            .process_request(&mut request, &mut context)
            .expect("interceptors should succeed");

        let seen: Vec<_> = request.headers().get_all("x-seen").iter().collect();
        assert_eq!(seen, ["first", "second"]);
    }

    #[test]
    fn user_agent_does_not_override() {
        let pipeline = InterceptorPipeline::new().add_request(
            RequestUserAgent::new("parley/0.1").expect("valid header value"),
        );
        let mut request = Request::get("http://foo/test")
            .expect("test URL should parse")
            .with_header(USER_AGENT, HeaderValue::from_static("custom/1.0"));
        let mut context = ExecContext::new();
        pipeline
            .process_request(&mut request, &mut context)
            .expect("interceptors should succeed");
        assert_eq!(
            request.headers().get(USER_AGENT),
            Some(&HeaderValue::from_static("custom/1.0"))
        );
    }
}
