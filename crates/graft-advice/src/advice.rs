//! The around-advice capability and the invocation model it observes.

use graft_core::MethodDescriptor;
use thiserror::Error;

/// Failure raised by the woven target call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("target invocation failed: {message}")]
pub struct InvokeError {
    /// What went wrong inside the target.
    pub message: String,
}

impl InvokeError {
    /// Create an invocation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One in-flight call of an advised method, as seen by advices.
///
/// Argument values are opaque to the engine. An advice running under an
/// args-override interceptor may stage a replacement argument list in its
/// `before` hook; plain interceptors ignore the staging.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    method: MethodDescriptor,
    args: Vec<serde_json::Value>,
    overridden: Option<Vec<serde_json::Value>>,
}

impl Invocation {
    /// Create an invocation for the given method and arguments.
    #[must_use]
    pub fn new(method: MethodDescriptor, args: Vec<serde_json::Value>) -> Self {
        Self {
            method,
            args,
            overridden: None,
        }
    }

    /// The method being invoked.
    #[must_use]
    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    /// The original argument values.
    #[must_use]
    pub fn args(&self) -> &[serde_json::Value] {
        &self.args
    }

    /// Stage a replacement argument list for the original call.
    ///
    /// Honored only by args-override interceptor variants; the last staging
    /// before the target call wins.
    pub fn override_args(&mut self, args: Vec<serde_json::Value>) {
        self.overridden = Some(args);
    }

    /// The staged replacement arguments, if any.
    #[must_use]
    pub fn overridden_args(&self) -> Option<&[serde_json::Value]> {
        self.overridden.as_deref()
    }

    /// Take the staged replacement arguments, clearing the staging.
    pub(crate) fn take_overridden_args(&mut self) -> Option<Vec<serde_json::Value>> {
        self.overridden.take()
    }
}

/// Result of the target call, as seen by `after` hooks.
///
/// An `after` hook may rebase the value, replacing what the caller observes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeOutcome {
    value: serde_json::Value,
}

impl InvokeOutcome {
    /// Wrap the target call's return value.
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// The current return value.
    #[must_use]
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Replace the return value observed by the caller.
    pub fn rebase(&mut self, value: serde_json::Value) {
        self.value = value;
    }

    /// Unwrap into the final return value.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.value
    }
}

/// Plugin-supplied logic executed around a matched method's invocation.
///
/// All hooks default to no-ops so an advice only implements the phases it
/// cares about. Instances are shared across matches by the loader cache and
/// must not rely on per-call interior state.
pub trait MethodAdvice: Send + Sync {
    /// Called before the target, in declaration order.
    fn before(&self, _invocation: &mut Invocation) {}

    /// Called after the target returns or fails, in reverse declaration
    /// order. On the error path the outcome carries a null value.
    fn after(&self, _invocation: &Invocation, _outcome: &mut InvokeOutcome) {}

    /// Called when the target fails, in reverse declaration order, before
    /// the `after` hooks run.
    fn on_error(&self, _invocation: &Invocation, _error: &InvokeError) {}
}

impl std::fmt::Debug for dyn MethodAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MethodAdvice")
    }
}
