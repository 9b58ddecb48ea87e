//! Authentication: scopes, credentials, schemes and the challenge handshake

pub mod authenticator;
pub mod basic;
pub mod challenge;
pub mod credentials;
pub mod exchange;
mod matcher;
pub mod provider;
pub mod registry;
pub mod scheme;
pub mod scope;
pub mod strategy;

pub use authenticator::Authenticator;
pub use basic::BasicScheme;
pub use challenge::Challenge;
pub use credentials::Credentials;
pub use exchange::{AuthExchange, AuthExchangeState};
pub use provider::{
    BasicCredentialsProvider, CredentialsProvider, CredentialsProviderBuilder,
    FixedCredentialsProvider,
};
pub use registry::AuthSchemeRegistry;
pub use scheme::{AuthError, AuthScheme};
pub use scope::AuthScope;
pub use strategy::{AuthenticationStrategy, ChallengeType, DefaultAuthenticationStrategy};
