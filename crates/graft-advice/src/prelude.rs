//! Prelude module - commonly used types for convenient import.
//!
//! Use `use graft_advice::prelude::*;` to import the engine surface plus the
//! data-model types from `graft-core` it operates on.

// Advice capability and invocation model
pub use crate::{Invocation, InvokeError, InvokeOutcome, MethodAdvice};

// Registry and loader
pub use crate::{AdviceContext, AdviceLoader, AdviceRegistry, LoadScope};

// Resolution and application
pub use crate::{AdvisorApplier, AdvisorResolver, ApplyReport, MethodAdvisor};

// Weaving contracts
pub use crate::{BindError, Interceptor, TargetInvoker, TypeBuilder};

// Failure reporting
pub use crate::{BindFailure, FailureSink, TracingFailureSink};

// Errors
pub use crate::{AdviceError, AdviceResult};

// Data model
pub use graft_core::{
    AdvisorDeclaration, MethodDescriptor, MethodPointcut, PluginConfig, PluginConfigSet,
    TypeDescriptor,
};
