//! Execution chain contract
//!
//! A chain element forwards the request to the remaining downstream
//! pipeline; the scope is the per-logical-request bundle handed unchanged to
//! every retry so instrumentation can assert the same attempt is replayed.

use crate::context::ExecContext;
use crate::error::Result;
use crate::http::{Request, Response, Route};

use super::runtime::ExecRuntime;

/// The identity bundle of one logical request.
///
/// Exchange id and route are fixed at construction; runtime and context are
/// the mutable collaborators threaded through every attempt.
pub struct ExecScope {
    exchange_id: String,
    route: Route,
    runtime: Box<dyn ExecRuntime>,
    context: ExecContext,
}

impl ExecScope {
    pub fn new(
        exchange_id: impl Into<String>,
        route: Route,
        runtime: Box<dyn ExecRuntime>,
        context: ExecContext,
    ) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            route,
            runtime,
            context,
        }
    }

    #[must_use]
    pub fn exchange_id(&self) -> &str {
        &self.exchange_id
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn runtime_mut(&mut self) -> &mut dyn ExecRuntime {
        &mut *self.runtime
    }

    #[must_use]
    pub fn context(&self) -> &ExecContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ExecContext {
        &mut self.context
    }

    /// Reclaim the context when the logical request is finished, e.g. to
    /// carry its exchanges into a follow-up request.
    #[must_use]
    pub fn into_context(self) -> ExecContext {
        self.context
    }
}

impl std::fmt::Debug for ExecScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecScope")
            .field("exchange_id", &self.exchange_id)
            .field("route", &self.route)
            .finish()
    }
}

/// The remaining downstream processing pipeline.
pub trait ExecChain {
    /// Perform the physical send/receive for one attempt.
    ///
    /// # Errors
    ///
    /// Propagates protocol and I/O failures from the transport.
    fn proceed(&mut self, request: &mut Request, scope: &mut ExecScope) -> Result<Response>;
}
