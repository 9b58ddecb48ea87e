//! Execution configuration
//!
//! Explicit knobs for the behavior the retry loop would otherwise have to
//! infer: whether challenge handling runs at all, and how many physical
//! attempts one logical request may spend on it.

/// Runtime execution configuration.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Whether authentication challenges are processed at all
    pub authentication_enabled: bool,
    /// Total physical attempts per logical request, including the first.
    /// Repeated-challenge detection usually terminates earlier; this bound
    /// is the backstop against pathological challenge loops.
    pub max_auth_attempts: u32,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            authentication_enabled: true,
            max_auth_attempts: 3,
        }
    }
}

impl ExecConfig {
    /// Configuration that answers every challenge to the caller unchanged.
    #[must_use]
    pub fn no_authentication() -> Self {
        Self {
            authentication_enabled: false,
            ..Self::default()
        }
    }

    /// Configuration that never retries (single attempt only).
    #[must_use]
    pub fn single_attempt() -> Self {
        Self {
            max_auth_attempts: 1,
            ..Self::default()
        }
    }

    /// Validate configuration for consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_auth_attempts` is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_auth_attempts == 0 {
            return Err("max_auth_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}
