//! Per-plugin configuration, passed through to advice factories.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque configuration of one plugin.
///
/// The resolution engine never interprets the properties; they travel
/// unchanged from the host's configuration source to the advice factories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Whether the plugin is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Plugin-defined properties.
    #[serde(default)]
    pub props: HashMap<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginConfig {
    /// Create an enabled configuration with no properties.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            props: HashMap::new(),
        }
    }

    /// Add a property.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    /// Disable the plugin.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Get a property value.
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&serde_json::Value> {
        self.props.get(key)
    }
}

/// Mapping from plugin identifier to plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfigSet {
    configs: HashMap<String, PluginConfig>,
}

impl PluginConfigSet {
    /// Create an empty configuration set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a plugin's configuration.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>, config: PluginConfig) -> Self {
        self.configs.insert(plugin.into(), config);
        self
    }

    /// Get a plugin's configuration.
    #[must_use]
    pub fn get(&self, plugin: &str) -> Option<&PluginConfig> {
        self.configs.get(plugin)
    }

    /// Whether the set contains a configuration for the plugin.
    #[must_use]
    pub fn contains(&self, plugin: &str) -> bool {
        self.configs.contains_key(plugin)
    }

    /// Number of configured plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether no plugin is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_config_builder() {
        let config = PluginConfig::new().with_prop("sample_rate", serde_json::json!(0.25));
        assert!(config.enabled);
        assert_eq!(config.prop("sample_rate"), Some(&serde_json::json!(0.25)));
        assert!(config.prop("missing").is_none());
    }

    #[test]
    fn test_config_set_lookup() {
        let set = PluginConfigSet::new()
            .with_plugin("sql-tracer", PluginConfig::new())
            .with_plugin("metrics", PluginConfig::new().disabled());

        assert_eq!(set.len(), 2);
        assert!(set.contains("sql-tracer"));
        assert!(!set.get("metrics").unwrap().enabled);
        assert!(set.get("unknown").is_none());
    }

    #[test]
    fn test_enabled_default_on_deserialize() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enabled);
        assert!(config.props.is_empty());
    }
}
