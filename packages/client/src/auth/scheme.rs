//! Authentication scheme contract
//!
//! Schemes are polymorphic capabilities selected at runtime from a registry
//! of named variants. The execution layer only depends on the state contract
//! below; token formats are the scheme's own business.

use std::fmt;

use crate::auth::challenge::Challenge;
use crate::auth::provider::CredentialsProvider;
use crate::http::{Host, Request};

/// Errors raised by authentication schemes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// A challenge could not be understood by the parser or the scheme
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),
    /// The scheme was asked for a token before credentials were supplied
    #[error("credentials not available")]
    CredentialsMissing,
    /// The scheme could not produce an authorization token
    #[error("failed to generate authorization token: {0}")]
    TokenGeneration(String),
}

/// One authentication scheme instance, owned by a single exchange.
///
/// A scheme accumulates state over the handshake: it consumes each server
/// challenge, reports whether the handshake still needs another round trip,
/// sources its credentials, and generates the authorization token for the
/// next attempt.
pub trait AuthScheme: Send + fmt::Debug {
    /// The scheme name as it appears in challenge headers.
    fn name(&self) -> &str;

    /// Whether the handshake is bound to a single physical connection.
    ///
    /// Connection-based schemes require the same connection across legs;
    /// enforcing that affinity is the scheme/runtime pairing's contract, not
    /// the execution layer's.
    fn is_connection_based(&self) -> bool {
        false
    }

    /// The protection realm announced by the last challenge, if any.
    fn realm(&self) -> Option<&str> {
        None
    }

    /// Consume a server challenge, advancing the handshake state.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedChallenge`] when the challenge is not
    /// acceptable to this scheme.
    fn process_challenge(&mut self, challenge: &Challenge) -> Result<(), AuthError>;

    /// True when no further challenge round is expected.
    ///
    /// For a single-round scheme this is true as soon as the first challenge
    /// has been consumed, so a repeated challenge means the credentials were
    /// rejected. Multi-leg schemes stay incomplete until the final server
    /// token has been consumed.
    fn is_challenge_complete(&self) -> bool;

    /// Source credentials for the challenge from `provider`.
    ///
    /// Returns false when no usable credentials exist, in which case the
    /// challenge response goes back to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider yields credentials the scheme
    /// cannot use.
    fn is_response_ready(
        &mut self,
        host: &Host,
        provider: &dyn CredentialsProvider,
    ) -> Result<bool, AuthError>;

    /// Produce the authorization header value for the next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialsMissing`] when called before
    /// credentials were sourced, or [`AuthError::TokenGeneration`] when the
    /// token cannot be built.
    fn generate_auth_response(&self, host: &Host, request: &Request) -> Result<String, AuthError>;
}
