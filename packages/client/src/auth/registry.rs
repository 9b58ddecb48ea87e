//! Scheme registry
//!
//! Named scheme variants registered once, instantiated per exchange. The
//! registration order doubles as the default preference order during
//! selection.

use std::fmt;

use super::basic::BasicScheme;
use super::scheme::AuthScheme;

type SchemeFactory = Box<dyn Fn() -> Box<dyn AuthScheme> + Send + Sync>;

/// Registry of authentication scheme factories, keyed by lowercase name.
pub struct AuthSchemeRegistry {
    factories: Vec<(String, SchemeFactory)>,
}

impl AuthSchemeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Register a factory under `name`, replacing any previous registration
    /// while keeping its preference rank.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn AuthScheme> + Send + Sync + 'static,
    {
        let key = name.to_ascii_lowercase();
        let factory: SchemeFactory = Box::new(factory);
        match self.factories.iter_mut().find(|(stored, _)| *stored == key) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((key, factory)),
        }
    }

    /// Instantiate a fresh scheme for `name`, if registered.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Box<dyn AuthScheme>> {
        let key = name.to_ascii_lowercase();
        self.factories
            .iter()
            .find(|(stored, _)| *stored == key)
            .map(|(_, factory)| factory())
    }

    /// Registered names in preference order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for AuthSchemeRegistry {
    /// The stock registry: `Basic` only.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("Basic", || Box::new(BasicScheme::new()));
        registry
    }
}

impl fmt::Debug for AuthSchemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
