//! Execution context
//!
//! Carries the state that outlives a single physical attempt: the
//! credentials provider configured by the caller and the authentication
//! exchanges accumulated per target. A context belongs to one logical
//! request flow at a time; sharing it across concurrent requests is the
//! owner's problem to serialize.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::credentials::Credentials;
use crate::auth::exchange::AuthExchange;
use crate::auth::provider::{BasicCredentialsProvider, CredentialsProvider};
use crate::auth::scope::AuthScope;
use crate::http::Host;

enum ContextCredentials {
    None,
    /// Caller-configured read-only provider
    Fixed(Arc<dyn CredentialsProvider>),
    /// Mutable store, also the sink for request-derived credentials
    Store(BasicCredentialsProvider),
}

/// Per-request-flow execution state.
pub struct ExecContext {
    credentials: ContextCredentials,
    exchanges: HashMap<Host, AuthExchange>,
}

impl ExecContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            credentials: ContextCredentials::None,
            exchanges: HashMap::new(),
        }
    }

    /// Configure a frozen, shareable credentials provider.
    pub fn set_credentials_provider(&mut self, provider: Arc<dyn CredentialsProvider>) {
        self.credentials = ContextCredentials::Fixed(provider);
    }

    /// Configure a mutable credentials store.
    ///
    /// Only a store can absorb credentials extracted from a request URI's
    /// user-info component.
    pub fn set_credentials_store(&mut self, store: BasicCredentialsProvider) {
        self.credentials = ContextCredentials::Store(store);
    }

    /// The configured provider, if any.
    #[must_use]
    pub fn credentials_provider(&self) -> Option<&dyn CredentialsProvider> {
        match self.credentials {
            ContextCredentials::None => None,
            ContextCredentials::Fixed(ref provider) => Some(provider.as_ref()),
            ContextCredentials::Store(ref store) => Some(store),
        }
    }

    /// The configured store, when the provider is mutable.
    pub fn credentials_store_mut(&mut self) -> Option<&mut BasicCredentialsProvider> {
        match self.credentials {
            ContextCredentials::Store(ref mut store) => Some(store),
            _ => None,
        }
    }

    /// Convenience lookup against the configured provider.
    #[must_use]
    pub fn credentials(&self, scope: &AuthScope) -> Option<Credentials> {
        self.credentials_provider()
            .and_then(|provider| provider.credentials(scope))
    }

    /// The exchange accumulated for `host`, if any.
    #[must_use]
    pub fn auth_exchange(&self, host: &Host) -> Option<&AuthExchange> {
        self.exchanges.get(host)
    }

    /// Install (or overwrite) the exchange for `host`.
    pub fn set_auth_exchange(&mut self, host: Host, exchange: AuthExchange) {
        self.exchanges.insert(host, exchange);
    }

    /// Take the exchange for `host` out of the context, creating a fresh one
    /// if none exists. The caller is expected to put it back.
    pub(crate) fn detach_auth_exchange(&mut self, host: &Host) -> AuthExchange {
        self.exchanges.remove(host).unwrap_or_default()
    }
}

impl Default for ExecContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credentials = match self.credentials {
            ContextCredentials::None => "none",
            ContextCredentials::Fixed(_) => "fixed",
            ContextCredentials::Store(_) => "store",
        };
        f.debug_struct("ExecContext")
            .field("credentials", &credentials)
            .field("exchanges", &self.exchanges.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::exchange::AuthExchangeState;

    #[test]
    fn detached_exchange_defaults_to_unchallenged() {
        let mut context = ExecContext::new();
        let exchange = context.detach_auth_exchange(&Host::new("foo", 80));
        assert_eq!(exchange.state(), AuthExchangeState::Unchallenged);
    }

    #[test]
    fn store_receives_credentials() {
        let mut context = ExecContext::new();
        context.set_credentials_store(BasicCredentialsProvider::new());
        context
            .credentials_store_mut()
            .expect("store was configured")
            .set_credentials(
                AuthScope::host_only("bar"),
                Credentials::user_password("somefella", "secret"),
            );
        let found = context
            .credentials(&AuthScope::host_only("bar"))
            .expect("entry matches");
        assert_eq!(found.principal(), "somefella");
    }
}
