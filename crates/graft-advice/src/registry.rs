//! Advice registry - maps stable identifiers to advice factories.
//!
//! The registry replaces reflective load-by-class-name: the host registers a
//! factory per advice identifier at agent bootstrap, and resolution looks the
//! identifier up instead of instantiating by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use graft_core::PluginConfigSet;

use crate::advice::MethodAdvice;
use crate::error::{AdviceError, AdviceResult};

/// Context handed to advice factories at construction time.
///
/// Carries the opaque plugin configuration set and whether the target is
/// being enhanced in a server-side ("proxy") context, so one identifier can
/// yield a different variant per context.
#[derive(Debug)]
pub struct AdviceContext<'a> {
    /// Configuration of every loaded plugin, uninterpreted by the engine.
    pub plugin_configs: &'a PluginConfigSet,
    /// Whether the enhancement context is server-side.
    pub server_side: bool,
}

/// Factory producing an advice instance for a given context.
pub type AdviceFactory =
    Box<dyn Fn(&AdviceContext<'_>) -> AdviceResult<Arc<dyn MethodAdvice>> + Send + Sync>;

/// Registry of advice factories keyed by stable string identifier.
#[derive(Default)]
pub struct AdviceRegistry {
    factories: HashMap<String, AdviceFactory>,
}

impl AdviceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for an advice identifier, replacing any previous
    /// registration under the same identifier.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&AdviceContext<'_>) -> AdviceResult<Arc<dyn MethodAdvice>> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Register a pre-built shared instance under an identifier.
    pub fn register_instance(&mut self, id: impl Into<String>, advice: Arc<dyn MethodAdvice>) {
        self.register(id, move |_| Ok(advice.clone()));
    }

    /// Whether a factory is registered for the identifier.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered advice identifiers, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct an advice instance for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AdviceError::UnknownAdvice`] when no factory is registered,
    /// or the factory's own error when construction fails.
    pub fn create(
        &self,
        id: &str,
        context: &AdviceContext<'_>,
    ) -> AdviceResult<Arc<dyn MethodAdvice>> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| AdviceError::UnknownAdvice { id: id.to_string() })?;
        factory(context)
    }
}

impl fmt::Debug for AdviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceRegistry")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
