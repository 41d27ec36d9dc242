//! Caching advice loader - idempotent load-or-return-cached over the registry.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use graft_core::PluginConfigSet;

use crate::advice::MethodAdvice;
use crate::error::AdviceResult;
use crate::registry::{AdviceContext, AdviceRegistry};

/// Identity of the loading context, the class-loader analog.
///
/// Instances loaded under distinct scopes are never shared, so the same
/// advice identifier can yield per-scope instances the way per-classloader
/// loading does. The `server_side` flag selects the proxy-enhancement
/// variant for plugins that behave differently in each context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadScope {
    /// Scope identifier.
    pub id: String,
    /// Whether the enhancement context is server-side ("proxy").
    #[serde(default)]
    pub server_side: bool,
}

impl LoadScope {
    /// Create a client-side scope.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            server_side: false,
        }
    }

    /// Mark the scope as server-side.
    #[must_use]
    pub fn server_side(mut self) -> Self {
        self.server_side = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    advice: String,
    scope: String,
    server_side: bool,
}

/// Loads advice instances through the registry, caching per
/// (advice identifier, scope, context).
///
/// The cache may be shared across types transformed concurrently; lookups
/// are idempotent load-or-return-cached, and the first stored instance wins
/// under a racing construction.
pub struct AdviceLoader {
    registry: Arc<AdviceRegistry>,
    cache: DashMap<CacheKey, Arc<dyn MethodAdvice>>,
}

impl AdviceLoader {
    /// Create a loader over the given registry with an empty cache.
    #[must_use]
    pub fn new(registry: Arc<AdviceRegistry>) -> Self {
        Self {
            registry,
            cache: DashMap::new(),
        }
    }

    /// Load or return the cached instance for an advice identifier.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::AdviceError::UnknownAdvice`] and factory
    /// construction failures; a failed load caches nothing.
    pub fn load(
        &self,
        advice_id: &str,
        scope: &LoadScope,
        plugin_configs: &PluginConfigSet,
    ) -> AdviceResult<Arc<dyn MethodAdvice>> {
        let key = CacheKey {
            advice: advice_id.to_string(),
            scope: scope.id.clone(),
            server_side: scope.server_side,
        };
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Arc::clone(&hit));
        }
        let context = AdviceContext {
            plugin_configs,
            server_side: scope.server_side,
        };
        let advice = self.registry.create(advice_id, &context)?;
        let entry = self.cache.entry(key).or_insert(advice);
        Ok(Arc::clone(&entry))
    }

    /// Number of cached instances.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for AdviceLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceLoader")
            .field("registry", &self.registry)
            .field("cached", &self.cache.len())
            .finish()
    }
}
