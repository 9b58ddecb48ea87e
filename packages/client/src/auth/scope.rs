//! Authentication scopes
//!
//! A scope names the set of challenges a credential applies to. Absent
//! fields are wildcards; specificity ranking lives in the matcher.

use std::fmt;

use crate::http::Host;

/// The (scheme, host, port, realm) tuple identifying which credentials apply.
///
/// A `None` field is a wildcard that matches any concrete value. Scheme and
/// host are normalized to lowercase on construction; realms are compared
/// verbatim. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthScope {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    realm: Option<String>,
}

impl AuthScope {
    pub fn new(
        scheme: Option<&str>,
        host: Option<&str>,
        port: Option<u16>,
        realm: Option<&str>,
    ) -> Self {
        Self {
            scheme: scheme.map(str::to_ascii_lowercase),
            host: host.map(str::to_ascii_lowercase),
            port,
            realm: realm.map(str::to_owned),
        }
    }

    /// The catch-all scope: every field wildcard.
    #[must_use]
    pub fn any() -> Self {
        Self::new(None, None, None, None)
    }

    /// Scope pinned to a concrete endpoint, any scheme and realm.
    #[must_use]
    pub fn for_host(host: &Host) -> Self {
        Self::new(None, Some(host.name()), Some(host.port()), None)
    }

    /// Scope pinned to a hostname only, any port, scheme and realm.
    #[must_use]
    pub fn host_only(name: &str) -> Self {
        Self::new(None, Some(name), None, None)
    }

    #[must_use]
    pub fn with_realm(mut self, realm: &str) -> Self {
        self.realm = Some(realm.to_owned());
        self
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = Some(scheme.to_ascii_lowercase());
        self
    }

    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    #[must_use]
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }
}

impl fmt::Display for AuthScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wildcard = "<any>";
        write!(
            f,
            "{} '{}' {}:{}",
            self.scheme.as_deref().unwrap_or(wildcard),
            self.realm.as_deref().unwrap_or(wildcard),
            self.host.as_deref().unwrap_or(wildcard),
            self.port
                .map_or_else(|| wildcard.to_owned(), |p| p.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_and_host() {
        let scope = AuthScope::new(Some("Basic"), Some("EXAMPLE.com"), Some(80), Some("Realm"));
        assert_eq!(scope.scheme(), Some("basic"));
        assert_eq!(scope.host(), Some("example.com"));
        assert_eq!(scope.realm(), Some("Realm"));
    }

    #[test]
    fn for_host_pins_endpoint_only() {
        let scope = AuthScope::for_host(&Host::new("foo", 80));
        assert_eq!(scope.host(), Some("foo"));
        assert_eq!(scope.port(), Some(80));
        assert_eq!(scope.scheme(), None);
        assert_eq!(scope.realm(), None);
    }
}
