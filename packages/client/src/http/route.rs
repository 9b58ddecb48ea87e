//! Hosts and routes
//!
//! A route names the origin server a request is bound for and, optionally,
//! the proxy it travels through. The route decides which authentication
//! exchange slot (target vs proxy) a challenge belongs to.

use std::fmt;

use url::Url;

/// A network endpoint identified by hostname and port.
///
/// Hostnames are normalized to lowercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    name: String,
    port: u16,
}

impl Host {
    pub fn new(name: impl AsRef<str>, port: u16) -> Self {
        Self {
            name: name.as_ref().to_ascii_lowercase(),
            port,
        }
    }

    /// Derive the host from a URL, falling back to the scheme's default port.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        let name = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(Self::new(name, port))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.port)
    }
}

/// The path a request takes: target origin plus optional proxy hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    target: Host,
    proxy: Option<Host>,
}

impl Route {
    /// A direct route to the target with no intermediate proxy.
    #[must_use]
    pub fn direct(target: Host) -> Self {
        Self {
            target,
            proxy: None,
        }
    }

    /// A route through `proxy` to `target`.
    #[must_use]
    pub fn via_proxy(target: Host, proxy: Host) -> Self {
        Self {
            target,
            proxy: Some(proxy),
        }
    }

    #[must_use]
    pub fn target(&self) -> &Host {
        &self.target
    }

    #[must_use]
    pub fn proxy(&self) -> Option<&Host> {
        self.proxy.as_ref()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.proxy {
            Some(ref proxy) => write!(f, "{} -> {}", proxy, self.target),
            None => write!(f, "{}", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_normalizes_case_and_default_port() {
        let url = Url::parse("http://Example.COM/path").expect("test URL should parse");
        let host = Host::from_url(&url).expect("http URL has a host");
        assert_eq!(host.name(), "example.com");
        assert_eq!(host.port(), 80);
    }

    #[test]
    fn route_display_shows_proxy_hop() {
        let route = Route::via_proxy(Host::new("foo", 80), Host::new("bar", 8888));
        assert_eq!(route.to_string(), "bar:8888 -> foo:80");
    }
}
