//! Credentials providers
//!
//! A provider answers scope queries during challenge handling. The frozen
//! provider is built once and shared across requests; the basic provider is
//! the mutable variant used for per-context registration.

use std::fmt;
use std::sync::Arc;

use super::credentials::Credentials;
use super::matcher;
use super::scope::AuthScope;

/// Read-only credential lookup, queried once per challenge.
///
/// Implementations must be safe for unsynchronized concurrent reads.
pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self, scope: &AuthScope) -> Option<Credentials>;
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Arc<T> {
    fn credentials(&self, scope: &AuthScope) -> Option<Credentials> {
        (**self).credentials(scope)
    }
}

/// An immutable scope-to-credentials mapping.
///
/// Construction copies the entries; no mutation is observable afterward.
/// Lookup picks the most specific compatible entry, ties resolving to the
/// earliest added one.
pub struct FixedCredentialsProvider {
    entries: Vec<(AuthScope, Credentials)>,
}

impl CredentialsProvider for FixedCredentialsProvider {
    fn credentials(&self, scope: &AuthScope) -> Option<Credentials> {
        matcher::match_credentials(&self.entries, scope).cloned()
    }
}

impl fmt::Debug for FixedCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(scope, _)| scope))
            .finish()
    }
}

/// Accumulates scope/credential pairs and freezes them into a
/// [`FixedCredentialsProvider`].
#[derive(Default)]
pub struct CredentialsProviderBuilder {
    entries: Vec<(AuthScope, Credentials)>,
}

impl CredentialsProviderBuilder {
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add(self, scope: AuthScope, principal: &str, secret: &str) -> Self {
        self.add_credentials(scope, Credentials::user_password(principal, secret))
    }

    #[must_use]
    pub fn add_credentials(mut self, scope: AuthScope, credentials: Credentials) -> Self {
        self.entries.push((scope, credentials));
        self
    }

    #[must_use]
    pub fn build(self) -> FixedCredentialsProvider {
        FixedCredentialsProvider {
            entries: self.entries,
        }
    }
}

/// A mutable credentials store for context-local registration.
///
/// Setting credentials for a scope that is already present replaces the
/// previous entry in place, preserving its rank for tie-breaks.
#[derive(Default)]
pub struct BasicCredentialsProvider {
    entries: Vec<(AuthScope, Credentials)>,
}

impl BasicCredentialsProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_credentials(&mut self, scope: AuthScope, credentials: Credentials) {
        match self.entries.iter_mut().find(|(stored, _)| *stored == scope) {
            Some(entry) => entry.1 = credentials,
            None => self.entries.push((scope, credentials)),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl CredentialsProvider for BasicCredentialsProvider {
    fn credentials(&self, scope: &AuthScope) -> Option<Credentials> {
        matcher::match_credentials(&self.entries, scope).cloned()
    }
}

impl fmt::Debug for BasicCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(scope, _)| scope))
            .finish()
    }
}
