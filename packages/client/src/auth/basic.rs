//! Basic authentication scheme

use base64::{engine::general_purpose, Engine as _};

use crate::auth::challenge::Challenge;
use crate::auth::credentials::Credentials;
use crate::auth::provider::CredentialsProvider;
use crate::auth::scheme::{AuthError, AuthScheme};
use crate::auth::scope::AuthScope;
use crate::http::{Host, Request};

/// The `Basic` scheme: a single-round, realm-scoped credential echo.
///
/// Basic has no handshake legs, so the first consumed challenge completes
/// the negotiation; a second challenge for the same exchange means the
/// server rejected the credentials.
#[derive(Debug, Default)]
pub struct BasicScheme {
    realm: Option<String>,
    challenged: bool,
    credentials: Option<Credentials>,
}

impl BasicScheme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthScheme for BasicScheme {
    fn name(&self) -> &str {
        "Basic"
    }

    fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    fn process_challenge(&mut self, challenge: &Challenge) -> Result<(), AuthError> {
        self.realm = challenge.param("realm").map(str::to_owned);
        self.challenged = true;
        Ok(())
    }

    fn is_challenge_complete(&self) -> bool {
        self.challenged
    }

    fn is_response_ready(
        &mut self,
        host: &Host,
        provider: &dyn CredentialsProvider,
    ) -> Result<bool, AuthError> {
        let scope = AuthScope::new(
            Some(self.name()),
            Some(host.name()),
            Some(host.port()),
            self.realm.as_deref(),
        );
        self.credentials = provider.credentials(&scope);
        Ok(self.credentials.is_some())
    }

    fn generate_auth_response(&self, _host: &Host, _request: &Request) -> Result<String, AuthError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AuthError::CredentialsMissing)?;
        let pair = format!("{}:{}", credentials.principal(), credentials.secret());
        let encoded = general_purpose::STANDARD.encode(pair.as_bytes());
        Ok(format!("Basic {encoded}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::provider::CredentialsProviderBuilder;
    use http::header::WWW_AUTHENTICATE;
    use http::{HeaderMap, HeaderValue};

    fn challenge(value: &'static str) -> Challenge {
        let mut headers = HeaderMap::new();
        headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static(value));
        crate::auth::challenge::parse_challenges(&headers, &WWW_AUTHENTICATE)
            .expect("challenge should parse")
            .remove(0)
    }

    #[test]
    fn generates_rfc7617_token() {
        let host = Host::new("foo", 80);
        let provider = CredentialsProviderBuilder::create()
            .add(AuthScope::for_host(&host), "Aladdin", "open sesame")
            .build();

        let mut scheme = BasicScheme::new();
        scheme
            .process_challenge(&challenge("Basic realm=test"))
            .expect("challenge is acceptable");
        assert_eq!(scheme.realm(), Some("test"));
        assert!(scheme
            .is_response_ready(&host, &provider)
            .expect("lookup should succeed"));

        let request = Request::get("http://foo/test").expect("test URL should parse");
        let token = scheme
            .generate_auth_response(&host, &request)
            .expect("token should generate");
        assert_eq!(token, "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn completes_after_first_challenge() {
        let mut scheme = BasicScheme::new();
        assert!(!scheme.is_challenge_complete());
        scheme
            .process_challenge(&challenge("Basic realm=test"))
            .expect("challenge is acceptable");
        assert!(scheme.is_challenge_complete());
    }

    #[test]
    fn token_requires_credentials() {
        let scheme = BasicScheme::new();
        let request = Request::get("http://foo/test").expect("test URL should parse");
        let err = scheme
            .generate_auth_response(&Host::new("foo", 80), &request)
            .expect_err("no credentials were sourced");
        assert!(matches!(err, AuthError::CredentialsMissing));
    }
}
