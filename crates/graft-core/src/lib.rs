//! Graft Core - Foundation types for the Graft instrumentation agent.
//!
//! This crate provides the data model shared by the agent's transformation
//! pipeline:
//! - Method and type descriptors of the instrumentation target
//! - Pointcut predicates for selecting methods
//! - Advisor declarations contributed by plugins
//! - The opaque per-plugin configuration set
//!
//! No engine logic lives here; resolution and composition are implemented in
//! `graft-advice`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod config;
pub mod declaration;
pub mod method;
pub mod pointcut;

pub use config::{PluginConfig, PluginConfigSet};
pub use declaration::AdvisorDeclaration;
pub use method::{MethodDescriptor, TypeDescriptor};
pub use pointcut::MethodPointcut;
