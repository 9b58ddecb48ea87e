//! Challenge bookkeeping
//!
//! The authenticator owns the three operations the retry orchestrator needs:
//! detecting a challenge, advancing an exchange's state machine against it,
//! and stamping the authorization header onto the next attempt. It is
//! stateless; all state lives in the exchange passed in.

use http::HeaderValue;
use tracing::{debug, warn};

use super::challenge::{challenge_map, parse_challenges};
use super::exchange::{AuthExchange, AuthExchangeState};
use super::strategy::{AuthenticationStrategy, ChallengeType};
use crate::context::ExecContext;
use crate::http::{Host, Request, Response};

/// Stateless driver for the per-target authentication handshake.
#[derive(Debug, Default)]
pub struct Authenticator;

impl Authenticator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `response` challenges the given side of the route.
    ///
    /// A non-challenge response while the exchange was mid-handshake marks
    /// the handshake satisfied.
    pub fn is_challenged(
        &self,
        host: &Host,
        challenge_type: ChallengeType,
        response: &Response,
        exchange: &mut AuthExchange,
    ) -> bool {
        if response.status() == challenge_type.status_code() {
            debug!("authentication required by {host}");
            return true;
        }
        match exchange.state() {
            AuthExchangeState::Challenged | AuthExchangeState::Handshake => {
                debug!("authentication succeeded for {host}");
                exchange.set_state(AuthExchangeState::Success);
            }
            AuthExchangeState::Success => {}
            _ => exchange.set_state(AuthExchangeState::Unchallenged),
        }
        false
    }

    /// Advance the exchange against the challenge in `response`.
    ///
    /// Returns true when a retry with (new or further) credentials is
    /// warranted; false when the challenge response must go back to the
    /// caller, with the exchange left in `Failure` where appropriate.
    pub fn handle_challenge(
        &self,
        host: &Host,
        challenge_type: ChallengeType,
        response: &Response,
        strategy: &dyn AuthenticationStrategy,
        exchange: &mut AuthExchange,
        context: &ExecContext,
    ) -> bool {
        let header = challenge_type.challenge_header();
        let challenges = match parse_challenges(response.headers(), &header) {
            Ok(challenges) => challenges,
            Err(err) => {
                warn!("malformed challenge from {host}: {err}");
                exchange.set_state(AuthExchangeState::Failure);
                return false;
            }
        };
        if challenges.is_empty() {
            warn!("challenge response from {host} carries no {header:?} challenge");
            exchange.set_state(AuthExchangeState::Failure);
            return false;
        }
        let challenges = challenge_map(challenges);

        match exchange.state() {
            AuthExchangeState::Failure => {
                debug!("authentication already failed for {host}");
                return false;
            }
            AuthExchangeState::Success => exchange.reset(),
            AuthExchangeState::Challenged | AuthExchangeState::Handshake => {
                if let Some(scheme) = exchange.scheme_mut() {
                    let key = scheme.name().to_ascii_lowercase();
                    if let Some(challenge) = challenges.get(&key) {
                        if let Err(err) = scheme.process_challenge(challenge) {
                            warn!("scheme {key} rejected challenge from {host}: {err}");
                            exchange.set_state(AuthExchangeState::Failure);
                            return false;
                        }
                        if scheme.is_challenge_complete() {
                            debug!("authentication failed: {host} repeated the {key} challenge");
                            exchange.set_state(AuthExchangeState::Failure);
                            return false;
                        }
                        exchange.set_state(AuthExchangeState::Handshake);
                        return true;
                    }
                    // server stopped offering the scheme mid-handshake
                    exchange.reset();
                } else {
                    exchange.reset();
                }
            }
            AuthExchangeState::Unchallenged => {}
        }

        let candidates = strategy.select(challenge_type, &challenges, context);
        if candidates.is_empty() {
            debug!("challenge from {host} cannot be satisfied: no supported scheme offered");
            exchange.set_state(AuthExchangeState::Failure);
            return false;
        }
        let Some(provider) = context.credentials_provider() else {
            debug!("no credentials provider configured on the context");
            exchange.set_state(AuthExchangeState::Failure);
            return false;
        };
        for mut scheme in candidates {
            let key = scheme.name().to_ascii_lowercase();
            let Some(challenge) = challenges.get(&key) else {
                continue;
            };
            if let Err(err) = scheme.process_challenge(challenge) {
                warn!("scheme {key} rejected challenge from {host}: {err}");
                continue;
            }
            match scheme.is_response_ready(host, provider) {
                Ok(true) => {
                    debug!("selected authentication scheme {}", scheme.name());
                    exchange.reset();
                    exchange.select(scheme);
                    exchange.set_state(AuthExchangeState::Challenged);
                    return true;
                }
                Ok(false) => {
                    debug!("no credentials for scheme {key} at {host}");
                }
                Err(err) => {
                    warn!("credentials unusable for scheme {key} at {host}: {err}");
                }
            }
        }
        exchange.set_state(AuthExchangeState::Failure);
        false
    }

    /// Stamp the authorization header for this side of the route, when the
    /// exchange holds a scheme with a response token pending or completed.
    pub fn add_auth_response(
        &self,
        host: &Host,
        challenge_type: ChallengeType,
        request: &mut Request,
        exchange: &mut AuthExchange,
    ) {
        let state = exchange.state();
        let Some(scheme) = exchange.scheme() else {
            return;
        };
        if !matches!(
            state,
            AuthExchangeState::Challenged | AuthExchangeState::Handshake | AuthExchangeState::Success
        ) {
            return;
        }
        match scheme.generate_auth_response(host, request) {
            Ok(token) => match HeaderValue::from_str(&token) {
                Ok(value) => {
                    request
                        .headers_mut()
                        .insert(challenge_type.response_header(), value);
                }
                Err(err) => {
                    warn!("authorization token for {host} is not a valid header value: {err}");
                }
            },
            Err(err) => {
                warn!("auth token generation failed for {host}: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::provider::CredentialsProviderBuilder;
    use crate::auth::scope::AuthScope;
    use crate::auth::strategy::DefaultAuthenticationStrategy;
    use http::header::WWW_AUTHENTICATE;
    use http::{HeaderValue, StatusCode};
    use std::sync::Arc;

    fn challenge_response() -> Response {
        Response::new(StatusCode::UNAUTHORIZED)
            .with_header(WWW_AUTHENTICATE, HeaderValue::from_static("Basic realm=test"))
    }

    fn context_with_credentials(host: &Host) -> ExecContext {
        let mut context = ExecContext::new();
        context.set_credentials_provider(Arc::new(
            CredentialsProviderBuilder::create()
                .add(AuthScope::for_host(host), "user", "pass")
                .build(),
        ));
        context
    }

    #[test]
    fn challenge_selects_scheme_and_requests_retry() {
        let host = Host::new("foo", 80);
        let authenticator = Authenticator::new();
        let strategy = DefaultAuthenticationStrategy::default();
        let mut exchange = AuthExchange::new();
        let context = context_with_credentials(&host);

        let response = challenge_response();
        assert!(authenticator.is_challenged(&host, ChallengeType::Target, &response, &mut exchange));
        assert!(authenticator.handle_challenge(
            &host,
            ChallengeType::Target,
            &response,
            &strategy,
            &mut exchange,
            &context,
        ));
        assert_eq!(exchange.state(), AuthExchangeState::Challenged);
        assert_eq!(exchange.scheme().expect("scheme selected").name(), "Basic");
    }

    #[test]
    fn repeated_challenge_fails_the_exchange() {
        let host = Host::new("foo", 80);
        let authenticator = Authenticator::new();
        let strategy = DefaultAuthenticationStrategy::default();
        let mut exchange = AuthExchange::new();
        let context = context_with_credentials(&host);

        let response = challenge_response();
        assert!(authenticator.handle_challenge(
            &host,
            ChallengeType::Target,
            &response,
            &strategy,
            &mut exchange,
            &context,
        ));
        // the server answers the credentialed retry with the same challenge
        assert!(!authenticator.handle_challenge(
            &host,
            ChallengeType::Target,
            &response,
            &strategy,
            &mut exchange,
            &context,
        ));
        assert_eq!(exchange.state(), AuthExchangeState::Failure);
    }

    #[test]
    fn success_response_completes_mid_handshake_exchange() {
        let host = Host::new("foo", 80);
        let authenticator = Authenticator::new();
        let mut exchange = AuthExchange::new();
        exchange.set_state(AuthExchangeState::Challenged);

        let response = Response::new(StatusCode::OK);
        assert!(!authenticator.is_challenged(&host, ChallengeType::Target, &response, &mut exchange));
        assert_eq!(exchange.state(), AuthExchangeState::Success);
    }

    #[test]
    fn missing_credentials_fail_without_retry() {
        let host = Host::new("foo", 80);
        let authenticator = Authenticator::new();
        let strategy = DefaultAuthenticationStrategy::default();
        let mut exchange = AuthExchange::new();
        let context = ExecContext::new();

        let response = challenge_response();
        assert!(!authenticator.handle_challenge(
            &host,
            ChallengeType::Target,
            &response,
            &strategy,
            &mut exchange,
            &context,
        ));
        assert_eq!(exchange.state(), AuthExchangeState::Failure);
    }

    #[test]
    fn stamps_authorization_header_when_challenged() {
        let host = Host::new("foo", 80);
        let authenticator = Authenticator::new();
        let strategy = DefaultAuthenticationStrategy::default();
        let mut exchange = AuthExchange::new();
        let context = context_with_credentials(&host);
        let response = challenge_response();
        authenticator.handle_challenge(
            &host,
            ChallengeType::Target,
            &response,
            &strategy,
            &mut exchange,
            &context,
        );

        let mut request = Request::get("http://foo/test").expect("test URL should parse");
        authenticator.add_auth_response(&host, ChallengeType::Target, &mut request, &mut exchange);
        let header = request
            .headers()
            .get(http::header::AUTHORIZATION)
            .expect("authorization header stamped");
        assert!(header.to_str().expect("ASCII header").starts_with("Basic "));
    }
}
