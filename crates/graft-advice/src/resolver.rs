//! Per-method advisor resolution - none, single, or composed.

use graft_core::{AdvisorDeclaration, MethodDescriptor, PluginConfigSet};

use crate::error::AdviceResult;
use crate::interceptor::Interceptor;
use crate::loader::{AdviceLoader, LoadScope};

/// An interception unit bound to one method selector.
///
/// Produced once per advised method per transformation pass; handed to the
/// type builder and then discarded by the engine.
#[derive(Debug)]
pub struct MethodAdvisor {
    method: MethodDescriptor,
    interceptor: Interceptor,
}

impl MethodAdvisor {
    /// Pair a method selector with its interceptor.
    #[must_use]
    pub fn new(method: MethodDescriptor, interceptor: Interceptor) -> Self {
        Self {
            method,
            interceptor,
        }
    }

    /// The target method selector.
    #[must_use]
    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    /// The interception unit.
    #[must_use]
    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    /// Split into selector and interceptor for handoff to the type builder.
    #[must_use]
    pub fn into_parts(self) -> (MethodDescriptor, Interceptor) {
        (self.method, self.interceptor)
    }
}

/// Resolves which advisor, if any, applies to one concrete method.
///
/// Declarations are matched independently per method and in any order;
/// composition order within one method follows declaration order as
/// configured. Semantically identical declarations both participate; any
/// sharing happens in the loader cache, not here.
#[derive(Debug)]
pub struct AdvisorResolver<'a> {
    declarations: &'a [AdvisorDeclaration],
    loader: &'a AdviceLoader,
    scope: &'a LoadScope,
    plugin_configs: &'a PluginConfigSet,
}

impl<'a> AdvisorResolver<'a> {
    /// Create a resolver over one target type's declarations.
    #[must_use]
    pub fn new(
        declarations: &'a [AdvisorDeclaration],
        loader: &'a AdviceLoader,
        scope: &'a LoadScope,
        plugin_configs: &'a PluginConfigSet,
    ) -> Self {
        Self {
            declarations,
            loader,
            scope,
            plugin_configs,
        }
    }

    /// Resolve the advisor for one concrete, eligible method.
    ///
    /// Zero matching declarations resolve to `Ok(None)`; exactly one
    /// delegates to the single builder, several to the composed builder.
    ///
    /// # Errors
    ///
    /// Propagates advice load failures; the caller scopes them to this
    /// method.
    pub fn resolve(&self, method: &MethodDescriptor) -> AdviceResult<Option<MethodAdvisor>> {
        let matched: Vec<&AdvisorDeclaration> = self
            .declarations
            .iter()
            .filter(|declaration| declaration.pointcut.matches(method))
            .collect();
        match matched.as_slice() {
            [] => Ok(None),
            [single] => self.build_single(method, single),
            _ => self.build_composed(method, &matched),
        }
    }

    /// Wrap exactly one matching declaration into a minimal interceptor.
    ///
    /// A sole override-only marker has nothing to run and resolves to none.
    fn build_single(
        &self,
        method: &MethodDescriptor,
        declaration: &AdvisorDeclaration,
    ) -> AdviceResult<Option<MethodAdvisor>> {
        let Some(advice_id) = declaration.advice.as_deref() else {
            return Ok(None);
        };
        let advice = self
            .loader
            .load(advice_id, self.scope, self.plugin_configs)?;
        Ok(Some(MethodAdvisor::new(
            method.clone(),
            Interceptor::single(advice, declaration.override_args),
        )))
    }

    /// Merge N>1 matching declarations into one ordered chain.
    ///
    /// One pass over the matching set: OR the override flags, load one
    /// instance per declaration that names an advice, keep declaration
    /// order. A set of pure markers loads nothing and resolves to none.
    fn build_composed(
        &self,
        method: &MethodDescriptor,
        declarations: &[&AdvisorDeclaration],
    ) -> AdviceResult<Option<MethodAdvisor>> {
        let mut advices = Vec::with_capacity(declarations.len());
        let mut override_args = false;
        for declaration in declarations {
            if declaration.override_args {
                override_args = true;
            }
            if let Some(advice_id) = declaration.advice.as_deref() {
                advices.push(self.loader.load(advice_id, self.scope, self.plugin_configs)?);
            }
        }
        if advices.is_empty() {
            return Ok(None);
        }
        Ok(Some(MethodAdvisor::new(
            method.clone(),
            Interceptor::composed(advices, override_args),
        )))
    }
}
