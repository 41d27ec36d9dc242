//! Advisor declarations contributed by plugins.

use serde::{Deserialize, Serialize};

use crate::pointcut::MethodPointcut;

/// One plugin's claim on a set of methods.
///
/// A declaration names a pointcut, an optional advice identifier resolved
/// through the advice registry, and whether the advice wants to replace the
/// method's arguments before the original call executes. Declarations are
/// immutable once materialized; the engine does not parse or validate their
/// source syntax.
///
/// A declaration without an advice identifier is a legal override-only
/// marker: when composed with others it contributes its `override_args` flag
/// and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorDeclaration {
    /// Identifier of the plugin that contributed this declaration.
    pub plugin: String,
    /// Which methods this declaration applies to.
    pub pointcut: MethodPointcut,
    /// Advice identifier, resolved through the advice registry.
    #[serde(default)]
    pub advice: Option<String>,
    /// Whether the advice may replace the method's argument list.
    #[serde(default)]
    pub override_args: bool,
}

impl AdvisorDeclaration {
    /// Create a declaration with no advice and no override flag.
    #[must_use]
    pub fn new(plugin: impl Into<String>, pointcut: MethodPointcut) -> Self {
        Self {
            plugin: plugin.into(),
            pointcut,
            advice: None,
            override_args: false,
        }
    }

    /// Set the advice identifier.
    #[must_use]
    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice = Some(advice.into());
        self
    }

    /// Request argument-override capability.
    #[must_use]
    pub fn override_args(mut self) -> Self {
        self.override_args = true;
        self
    }

    /// Whether this declaration contributes nothing (no advice, no flag).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.advice.is_none() && !self.override_args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_builder() {
        let declaration = AdvisorDeclaration::new("sql-tracer", MethodPointcut::glob("execute*"))
            .with_advice("sql-tracer/timing")
            .override_args();

        assert_eq!(declaration.plugin, "sql-tracer");
        assert_eq!(declaration.advice.as_deref(), Some("sql-tracer/timing"));
        assert!(declaration.override_args);
        assert!(!declaration.is_noop());
    }

    #[test]
    fn test_noop_declaration() {
        let noop = AdvisorDeclaration::new("empty", MethodPointcut::named("query"));
        assert!(noop.is_noop());

        let marker = AdvisorDeclaration::new("marker", MethodPointcut::named("query"))
            .override_args();
        assert!(!marker.is_noop());
    }

    #[test]
    fn test_deserialize_defaults() {
        let declaration: AdvisorDeclaration = serde_json::from_str(
            r#"{"plugin":"p","pointcut":{"type":"named","name":"run"}}"#,
        )
        .unwrap();
        assert!(declaration.advice.is_none());
        assert!(!declaration.override_args);
    }
}
