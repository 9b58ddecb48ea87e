//! Credential values

use std::fmt;

/// An immutable principal/secret pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    principal: String,
    secret: String,
}

impl Credentials {
    pub fn user_password(principal: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            secret: secret.into(),
        }
    }

    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// The secret never appears in logs or debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("principal", &self.principal)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::user_password("user", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
