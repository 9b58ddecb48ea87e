//! Per-target authentication exchange state
//!
//! One exchange exists per (context, target-or-proxy) pair. It survives
//! retries within a logical request and, when the context is reused, spans
//! logical requests so a multi-leg handshake can complete across user-level
//! calls. Never shared across threads.

use super::scheme::AuthScheme;

/// Handshake progress for one target or proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthExchangeState {
    /// No challenge has been seen
    #[default]
    Unchallenged,
    /// A challenge arrived and a scheme was selected; response token pending
    Challenged,
    /// The scheme needs another round trip before completion
    Handshake,
    /// The handshake is satisfied; no further challenge expected
    Success,
    /// No compatible scheme, no credentials, or a repeated challenge
    Failure,
}

/// Mutable authentication state for one target, owned by the context.
#[derive(Debug, Default)]
pub struct AuthExchange {
    state: AuthExchangeState,
    scheme: Option<Box<dyn AuthScheme>>,
}

impl AuthExchange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AuthExchangeState {
        self.state
    }

    pub fn set_state(&mut self, state: AuthExchangeState) {
        self.state = state;
    }

    #[must_use]
    pub fn scheme(&self) -> Option<&dyn AuthScheme> {
        self.scheme.as_deref()
    }

    pub fn scheme_mut(&mut self) -> Option<&mut (dyn AuthScheme + 'static)> {
        self.scheme.as_deref_mut()
    }

    /// Install the scheme chosen for this exchange.
    pub fn select(&mut self, scheme: Box<dyn AuthScheme>) {
        self.scheme = Some(scheme);
    }

    /// Drop all handshake state, returning to `Unchallenged`.
    pub fn reset(&mut self) {
        self.state = AuthExchangeState::Unchallenged;
        self.scheme = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::basic::BasicScheme;

    #[test]
    fn reset_clears_scheme_and_state() {
        let mut exchange = AuthExchange::new();
        exchange.select(Box::new(BasicScheme::new()));
        exchange.set_state(AuthExchangeState::Challenged);

        exchange.reset();
        assert_eq!(exchange.state(), AuthExchangeState::Unchallenged);
        assert!(exchange.scheme().is_none());
    }
}
