//! Scheme selection strategy

use std::collections::HashMap;
use std::sync::Arc;

use http::header::{
    HeaderName, AUTHORIZATION, PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, WWW_AUTHENTICATE,
};
use http::StatusCode;

use super::challenge::Challenge;
use super::registry::AuthSchemeRegistry;
use super::scheme::AuthScheme;
use crate::context::ExecContext;

/// Whether a challenge came from the origin server or an intermediate proxy.
///
/// The two differ in status code and in which header pair carries the
/// challenge and the response token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeType {
    Target,
    Proxy,
}

impl ChallengeType {
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            ChallengeType::Target => StatusCode::UNAUTHORIZED,
            ChallengeType::Proxy => StatusCode::PROXY_AUTHENTICATION_REQUIRED,
        }
    }

    #[must_use]
    pub fn challenge_header(self) -> HeaderName {
        match self {
            ChallengeType::Target => WWW_AUTHENTICATE,
            ChallengeType::Proxy => PROXY_AUTHENTICATE,
        }
    }

    #[must_use]
    pub fn response_header(self) -> HeaderName {
        match self {
            ChallengeType::Target => AUTHORIZATION,
            ChallengeType::Proxy => PROXY_AUTHORIZATION,
        }
    }
}

/// Picks candidate schemes for a set of server-offered challenges.
///
/// Returns candidates in descending preference; the authenticator tries them
/// in order until one yields usable credentials.
pub trait AuthenticationStrategy: Send + Sync {
    fn select(
        &self,
        challenge_type: ChallengeType,
        challenges: &HashMap<String, Challenge>,
        context: &ExecContext,
    ) -> Vec<Box<dyn AuthScheme>>;
}

/// Strategy backed by a scheme registry, preferring registration order.
pub struct DefaultAuthenticationStrategy {
    registry: Arc<AuthSchemeRegistry>,
}

impl DefaultAuthenticationStrategy {
    #[must_use]
    pub fn new(registry: Arc<AuthSchemeRegistry>) -> Self {
        Self { registry }
    }
}

impl Default for DefaultAuthenticationStrategy {
    fn default() -> Self {
        Self::new(Arc::new(AuthSchemeRegistry::default()))
    }
}

impl AuthenticationStrategy for DefaultAuthenticationStrategy {
    fn select(
        &self,
        _challenge_type: ChallengeType,
        challenges: &HashMap<String, Challenge>,
        _context: &ExecContext,
    ) -> Vec<Box<dyn AuthScheme>> {
        let mut candidates = Vec::new();
        for name in self.registry.names() {
            if !challenges.contains_key(name) {
                continue;
            }
            if let Some(scheme) = self.registry.create(name) {
                candidates.push(scheme);
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::challenge::{challenge_map, parse_challenges};
    use http::{HeaderMap, HeaderValue};

    #[test]
    fn selects_only_offered_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic realm=x"));
        let challenges = challenge_map(
            parse_challenges(&headers, &WWW_AUTHENTICATE).expect("challenge should parse"),
        );

        let strategy = DefaultAuthenticationStrategy::default();
        let context = ExecContext::new();
        let candidates = strategy.select(ChallengeType::Target, &challenges, &context);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "Basic");
    }

    #[test]
    fn empty_offer_selects_nothing() {
        let strategy = DefaultAuthenticationStrategy::default();
        let context = ExecContext::new();
        let candidates = strategy.select(ChallengeType::Target, &HashMap::new(), &context);
        assert!(candidates.is_empty());
    }
}
