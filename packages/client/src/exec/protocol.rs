//! Protocol execution
//!
//! Turns one logical request into one or more physical round trips: runs the
//! interceptor passes, detects authentication challenges on either side of
//! the route, negotiates credentials through the exchange state machines and
//! decides connection disposition between attempts.

use std::borrow::Cow;
use std::sync::Arc;

use http::header::{AUTHORIZATION, PROXY_AUTHORIZATION};
use tracing::{debug, trace, warn};

use crate::auth::authenticator::Authenticator;
use crate::auth::credentials::Credentials;
use crate::auth::exchange::AuthExchange;
use crate::auth::scope::AuthScope;
use crate::auth::strategy::{AuthenticationStrategy, ChallengeType};
use crate::config::ExecConfig;
use crate::context::ExecContext;
use crate::error::{self, Result};
use crate::http::{Request, Response, Route};

use super::chain::{ExecChain, ExecScope};
use super::processor::HttpProcessor;

/// The authenticated request-execution element of a client pipeline.
///
/// Stateless across requests: everything mutable lives on the scope's
/// context, so one `ProtocolExec` serves concurrent logical requests as long
/// as each brings its own scope.
pub struct ProtocolExec {
    processor: Arc<dyn HttpProcessor>,
    target_strategy: Arc<dyn AuthenticationStrategy>,
    proxy_strategy: Arc<dyn AuthenticationStrategy>,
    authenticator: Authenticator,
    config: ExecConfig,
}

impl ProtocolExec {
    pub fn new(
        processor: Arc<dyn HttpProcessor>,
        target_strategy: Arc<dyn AuthenticationStrategy>,
        proxy_strategy: Arc<dyn AuthenticationStrategy>,
    ) -> Self {
        Self {
            processor,
            target_strategy,
            proxy_strategy,
            authenticator: Authenticator::new(),
            config: ExecConfig::default(),
        }
    }

    /// Replace the execution configuration.
    ///
    /// # Errors
    ///
    /// Returns a builder error when the configuration is inconsistent.
    pub fn with_config(mut self, config: ExecConfig) -> Result<Self> {
        config.validate().map_err(error::builder)?;
        self.config = config;
        Ok(self)
    }

    /// Execute `request`, retrying through authentication challenges.
    ///
    /// The response handed back has its body left open; challenge responses
    /// consumed internally are drained and released before each retry.
    ///
    /// # Errors
    ///
    /// Propagates interceptor and transport failures unchanged. Whenever a
    /// failure occurs after a response was obtained, the endpoint is
    /// discarded first.
    pub fn execute(
        &self,
        request: &mut Request,
        scope: &mut ExecScope,
        chain: &mut dyn ExecChain,
    ) -> Result<Response> {
        let route = scope.route().clone();
        let target = route.target().clone();

        self.extract_request_credentials(request, scope);

        let mut target_exchange = scope.context_mut().detach_auth_exchange(&target);
        let mut proxy_exchange = match route.proxy() {
            Some(proxy) => scope.context_mut().detach_auth_exchange(proxy),
            None => AuthExchange::new(),
        };

        let result = self.execute_loop(
            request,
            scope,
            chain,
            &route,
            &mut target_exchange,
            &mut proxy_exchange,
        );

        scope
            .context_mut()
            .set_auth_exchange(target, target_exchange);
        if let Some(proxy) = route.proxy() {
            scope
                .context_mut()
                .set_auth_exchange(proxy.clone(), proxy_exchange);
        }
        result
    }

    fn execute_loop(
        &self,
        request: &mut Request,
        scope: &mut ExecScope,
        chain: &mut dyn ExecChain,
        route: &Route,
        target_exchange: &mut AuthExchange,
        proxy_exchange: &mut AuthExchange,
    ) -> Result<Response> {
        let target = route.target();
        let mut attempt: u32 = 1;
        loop {
            trace!("{} attempt {attempt}", scope.exchange_id());

            if !request.headers().contains_key(AUTHORIZATION) {
                self.authenticator.add_auth_response(
                    target,
                    ChallengeType::Target,
                    request,
                    target_exchange,
                );
            }
            if let Some(proxy) = route.proxy() {
                if !request.headers().contains_key(PROXY_AUTHORIZATION) {
                    self.authenticator.add_auth_response(
                        proxy,
                        ChallengeType::Proxy,
                        request,
                        proxy_exchange,
                    );
                }
            }

            self.processor.process_request(request, scope.context_mut())?;

            let mut response = chain.proceed(request, scope)?;

            if let Err(err) = self
                .processor
                .process_response(&mut response, scope.context_mut())
            {
                debug!(
                    "{} response processing failed, discarding endpoint",
                    scope.exchange_id()
                );
                scope.runtime_mut().discard_endpoint();
                return Err(err);
            }

            let challenged = self.config.authentication_enabled
                && self.needs_authentication(
                    route,
                    &response,
                    target_exchange,
                    proxy_exchange,
                    scope.context(),
                );
            if !challenged {
                return Ok(response);
            }

            if let Some(body) = request.body() {
                if !body.is_repeatable() && body.is_consumed() {
                    debug!(
                        "{} cannot retry: request body was consumed and is not repeatable",
                        scope.exchange_id()
                    );
                    return Ok(response);
                }
            }
            if attempt >= self.config.max_auth_attempts {
                debug!(
                    "{} giving up after {attempt} attempts",
                    scope.exchange_id()
                );
                return Ok(response);
            }

            if let Err(err) = response.body_mut().drain() {
                debug!(
                    "{} failed to drain challenge response, discarding endpoint",
                    scope.exchange_id()
                );
                scope.runtime_mut().discard_endpoint();
                return Err(error::io(err));
            }
            if scope.runtime_mut().is_connection_reusable() {
                trace!("{} connection kept alive for retry", scope.exchange_id());
            } else {
                debug!(
                    "{} connection cannot be kept alive, disconnecting",
                    scope.exchange_id()
                );
                scope.runtime_mut().disconnect_endpoint();
            }

            // regenerate against the advanced exchange state
            request.headers_mut().remove(AUTHORIZATION);
            request.headers_mut().remove(PROXY_AUTHORIZATION);
            attempt += 1;
        }
    }

    fn needs_authentication(
        &self,
        route: &Route,
        response: &Response,
        target_exchange: &mut AuthExchange,
        proxy_exchange: &mut AuthExchange,
        context: &ExecContext,
    ) -> bool {
        let target = route.target();
        let proxy = route.proxy().unwrap_or(target);

        let target_challenged = self.authenticator.is_challenged(
            target,
            ChallengeType::Target,
            response,
            target_exchange,
        );
        let proxy_challenged =
            self.authenticator
                .is_challenged(proxy, ChallengeType::Proxy, response, proxy_exchange);

        if target_challenged {
            return self.authenticator.handle_challenge(
                target,
                ChallengeType::Target,
                response,
                self.target_strategy.as_ref(),
                target_exchange,
                context,
            );
        }
        if proxy_challenged {
            return self.authenticator.handle_challenge(
                proxy,
                ChallengeType::Proxy,
                response,
                self.proxy_strategy.as_ref(),
                proxy_exchange,
                context,
            );
        }
        false
    }

    /// Strip user-info from the request URI and register it as an ephemeral
    /// credential for the URI's host. The wire request never carries
    /// user-info.
    fn extract_request_credentials(&self, request: &mut Request, scope: &mut ExecScope) {
        let url = request.url();
        if url.username().is_empty() && url.password().is_none() {
            return;
        }
        let Some(host) = url.host_str().map(str::to_owned) else {
            return;
        };
        let port = url.port();
        let principal = decode_component(url.username());
        let secret = url.password().map(decode_component).unwrap_or_default();

        let url = request.url_mut();
        let _ = url.set_username("");
        let _ = url.set_password(None);

        match scope.context_mut().credentials_store_mut() {
            Some(store) => {
                debug!("registering request URI credentials for {host}");
                store.set_credentials(
                    AuthScope::new(None, Some(&host), port, None),
                    Credentials::user_password(principal, secret),
                );
            }
            None => {
                warn!(
                    "credentials provider on the context is not mutable; \
                     request URI credentials for {host} ignored"
                );
            }
        }
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), Cow::into_owned)
}
