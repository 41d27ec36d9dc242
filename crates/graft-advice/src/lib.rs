//! Graft Advice - advice resolution and composition for the Graft
//! instrumentation agent.
//!
//! Given a target type's declared methods and the advisor declarations
//! configured for it, this crate computes which advices apply to each method
//! and produces one interception unit per advised method, handed to an
//! opaque type builder supplied by the weaving layer.
//!
//! # Resolution
//!
//! Per method: zero matching declarations produce nothing; one produces a
//! minimal single-advice interceptor; several are merged into an ordered
//! chain with onion nesting (entry hooks in declaration order, exit hooks in
//! reverse). If any matching declaration requests argument override, the
//! produced interceptor is an args-override variant.
//!
//! # Failure isolation
//!
//! Wiring is attempted independently per method: a missing advice, a failing
//! factory, or a builder rejection is logged and recorded, the method is
//! left unmodified, and the rest of the type's transformation proceeds.
//!
//! # Example
//!
//! ```rust,ignore
//! use graft_advice::prelude::*;
//!
//! let mut registry = AdviceRegistry::new();
//! registry.register("sql-tracer/timing", |_| Ok(my_timing_advice()));
//!
//! let loader = Arc::new(AdviceLoader::new(Arc::new(registry)));
//! let applier = AdvisorApplier::new(loader, configs, LoadScope::new("app"));
//! let report = applier.apply(&mut builder, &target, &declarations);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod advice;
pub mod applier;
pub mod error;
pub mod interceptor;
pub mod loader;
pub mod registry;
pub mod resolver;

pub use advice::{Invocation, InvokeError, InvokeOutcome, MethodAdvice};
pub use applier::{
    AdvisorApplier, ApplyReport, BindError, BindFailure, FailureSink, TracingFailureSink,
    TypeBuilder,
};
pub use error::{AdviceError, AdviceResult};
pub use interceptor::{Interceptor, TargetInvoker};
pub use loader::{AdviceLoader, LoadScope};
pub use registry::{AdviceContext, AdviceFactory, AdviceRegistry};
pub use resolver::{AdvisorResolver, MethodAdvisor};
