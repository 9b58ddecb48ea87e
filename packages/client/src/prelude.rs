//! Parley Client Prelude
//!
//! The essential types for driving authenticated request execution. Only
//! canonical types that are part of the public API belong here.

// Essential HTTP types - the messages and the route they travel
pub use crate::http::{Host, Request, RequestBody, Response, ResponseBody, Route, StreamBody};

// Error types
pub use crate::error::{Error, Kind, Result};

// Execution core
pub use crate::config::ExecConfig;
pub use crate::context::ExecContext;
pub use crate::exec::{
    ExecChain, ExecRuntime, ExecScope, HttpProcessor, InterceptorPipeline, ProtocolExec,
    RequestInterceptor, RequestUserAgent, ResponseInterceptor,
};

// Authentication
pub use crate::auth::{
    AuthError, AuthExchange, AuthExchangeState, AuthScheme, AuthSchemeRegistry, AuthScope,
    Authenticator, AuthenticationStrategy, BasicCredentialsProvider, BasicScheme, Challenge,
    ChallengeType, Credentials, CredentialsProvider, CredentialsProviderBuilder,
    DefaultAuthenticationStrategy, FixedCredentialsProvider,
};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};

// URL handling
pub use url::Url;
