//! Advisor application driver - wires resolved advisors into the type builder.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use graft_core::{AdvisorDeclaration, MethodDescriptor, PluginConfigSet, TypeDescriptor};

use crate::error::AdviceError;
use crate::interceptor::Interceptor;
use crate::loader::{AdviceLoader, LoadScope};
use crate::resolver::AdvisorResolver;

/// Rejection raised by a type builder for one selector/interceptor pair.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BindError {
    /// The builder's reason for rejecting the binding.
    pub message: String,
}

impl BindError {
    /// Create a bind error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The weaving layer's surface, opaque to this engine.
///
/// A builder accepting args-override interceptors must satisfy the
/// re-invocation contract of [`crate::TargetInvoker`] for the methods it
/// binds.
pub trait TypeBuilder {
    /// Bind a method selector to an interceptor.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when the pair cannot be attached; the driver
    /// leaves that method unmodified and continues.
    fn bind(
        &mut self,
        method: &MethodDescriptor,
        interceptor: Interceptor,
    ) -> Result<(), BindError>;
}

/// One method's failed wiring, with its cause.
#[derive(Debug)]
pub struct BindFailure {
    /// Name of the type being transformed.
    pub type_name: String,
    /// The method left unadvised.
    pub method: MethodDescriptor,
    /// Why wiring failed.
    pub error: AdviceError,
}

/// Side channel receiving per-method failures as they occur.
///
/// Injected at driver construction; the process-wide logging lifecycle is
/// owned by the hosting agent, not by this engine.
pub trait FailureSink: Send + Sync {
    /// Called once per failed method.
    fn on_failure(&self, failure: &BindFailure);
}

/// Default sink: structured error logging through `tracing`.
#[derive(Debug, Default)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn on_failure(&self, failure: &BindFailure) {
        error!(
            target_type = %failure.type_name,
            method = %failure.method,
            error = %failure.error,
            "failed to advise method"
        );
    }
}

/// Outcome of applying advisors to one type.
///
/// Aggregates per-method results instead of aborting: failures are recorded
/// and excluded from the bound set, and the transformation as a whole always
/// completes.
#[derive(Debug)]
pub struct ApplyReport {
    /// Name of the transformed type.
    pub type_name: String,
    /// Methods successfully bound to an interceptor.
    pub bound: Vec<MethodDescriptor>,
    /// Eligible methods with no matching declaration, left untransformed.
    pub unmatched: usize,
    /// Abstract or synthetic methods, never passed to the resolver.
    pub ineligible: usize,
    /// Methods whose wiring failed, left unmodified.
    pub failures: Vec<BindFailure>,
}

impl ApplyReport {
    fn new(type_name: String) -> Self {
        Self {
            type_name,
            bound: Vec::new(),
            unmatched: 0,
            ineligible: 0,
            failures: Vec::new(),
        }
    }

    /// Whether every resolved advisor was bound.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of methods bound.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}

/// Iterates a target type's declared methods, resolves an advisor for each,
/// and binds it through the type builder.
///
/// Each method is wired inside its own fault boundary: a load or bind
/// failure is reported to the sink, recorded in the report, and that method
/// is left unmodified while instrumentation of the rest proceeds. `apply`
/// itself never fails.
pub struct AdvisorApplier {
    loader: Arc<AdviceLoader>,
    plugin_configs: PluginConfigSet,
    scope: LoadScope,
    sink: Arc<dyn FailureSink>,
}

impl AdvisorApplier {
    /// Create a driver with the default tracing failure sink.
    #[must_use]
    pub fn new(
        loader: Arc<AdviceLoader>,
        plugin_configs: PluginConfigSet,
        scope: LoadScope,
    ) -> Self {
        Self {
            loader,
            plugin_configs,
            scope,
            sink: Arc::new(TracingFailureSink),
        }
    }

    /// Replace the failure sink.
    #[must_use]
    pub fn with_failure_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Apply all matching advisors to the target type.
    ///
    /// Abstract and synthetic methods are filtered out before resolution.
    /// The builder is only invoked for methods that resolved to an advisor.
    pub fn apply(
        &self,
        builder: &mut dyn TypeBuilder,
        target: &TypeDescriptor,
        declarations: &[AdvisorDeclaration],
    ) -> ApplyReport {
        let resolver = AdvisorResolver::new(
            declarations,
            &self.loader,
            &self.scope,
            &self.plugin_configs,
        );
        let mut report = ApplyReport::new(target.name.clone());
        for method in &target.methods {
            if !method.is_eligible() {
                report.ineligible = report.ineligible.saturating_add(1);
                continue;
            }
            match resolver.resolve(method) {
                Ok(None) => {
                    report.unmatched = report.unmatched.saturating_add(1);
                },
                Ok(Some(advisor)) => {
                    let (selector, interceptor) = advisor.into_parts();
                    match builder.bind(&selector, interceptor) {
                        Ok(()) => {
                            debug!(
                                target_type = %target.name,
                                method = %selector,
                                "bound advisor"
                            );
                            report.bound.push(selector);
                        },
                        Err(bind_error) => {
                            let failure = BindFailure {
                                type_name: target.name.clone(),
                                method: selector.clone(),
                                error: AdviceError::BindRejected {
                                    method: selector.to_string(),
                                    message: bind_error.message,
                                },
                            };
                            self.record(&mut report, failure);
                        },
                    }
                },
                Err(resolve_error) => {
                    let failure = BindFailure {
                        type_name: target.name.clone(),
                        method: method.clone(),
                        error: resolve_error,
                    };
                    self.record(&mut report, failure);
                },
            }
        }
        report
    }

    fn record(&self, report: &mut ApplyReport, failure: BindFailure) {
        self.sink.on_failure(&failure);
        report.failures.push(failure);
    }
}

impl fmt::Debug for AdvisorApplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorApplier")
            .field("loader", &self.loader)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
