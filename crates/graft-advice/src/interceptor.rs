//! Interceptors - the runtime units wrapping a method invocation.

use std::fmt;
use std::sync::Arc;

use crate::advice::{Invocation, InvokeError, InvokeOutcome, MethodAdvice};

/// Per-call handle to the woven method, provided by the weaving layer.
///
/// `invoke_with` is the re-invocation capability args-override interceptors
/// depend on; a weaving layer that cannot satisfy it must not accept
/// args-override bindings.
pub trait TargetInvoker {
    /// Call the original method with its original arguments.
    ///
    /// # Errors
    ///
    /// Returns the target's own failure.
    fn invoke(&mut self) -> Result<serde_json::Value, InvokeError>;

    /// Call the original method with a replacement argument list.
    ///
    /// # Errors
    ///
    /// Returns the target's own failure.
    fn invoke_with(
        &mut self,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, InvokeError>;
}

/// An interception unit bound to one method.
///
/// Holds shared references to loaded advice instances; the loader cache owns
/// their lifecycle. Single variants wrap exactly one advice; composed
/// variants chain several in declaration order. Args-override variants
/// additionally honor argument staging via [`Invocation::override_args`].
#[derive(Clone)]
pub enum Interceptor {
    /// One advice, original arguments.
    Single {
        /// The wrapped advice.
        advice: Arc<dyn MethodAdvice>,
    },
    /// One advice with argument-override capability.
    SingleArgsOverride {
        /// The wrapped advice.
        advice: Arc<dyn MethodAdvice>,
    },
    /// Several advices chained in declaration order, original arguments.
    Composed {
        /// The chained advices.
        advices: Vec<Arc<dyn MethodAdvice>>,
    },
    /// Several advices chained in declaration order, with argument-override
    /// capability.
    ComposedArgsOverride {
        /// The chained advices.
        advices: Vec<Arc<dyn MethodAdvice>>,
    },
}

impl Interceptor {
    /// Wrap a single advice.
    #[must_use]
    pub fn single(advice: Arc<dyn MethodAdvice>, override_args: bool) -> Self {
        if override_args {
            Self::SingleArgsOverride { advice }
        } else {
            Self::Single { advice }
        }
    }

    /// Chain several advices in the given order.
    #[must_use]
    pub fn composed(advices: Vec<Arc<dyn MethodAdvice>>, override_args: bool) -> Self {
        if override_args {
            Self::ComposedArgsOverride { advices }
        } else {
            Self::Composed { advices }
        }
    }

    /// Whether this is an args-override variant.
    #[must_use]
    pub fn overrides_args(&self) -> bool {
        matches!(
            self,
            Self::SingleArgsOverride { .. } | Self::ComposedArgsOverride { .. }
        )
    }

    /// Number of advices in the chain.
    #[must_use]
    pub fn advice_count(&self) -> usize {
        self.advices().len()
    }

    fn advices(&self) -> &[Arc<dyn MethodAdvice>] {
        match self {
            Self::Single { advice } | Self::SingleArgsOverride { advice } => {
                std::slice::from_ref(advice)
            },
            Self::Composed { advices } | Self::ComposedArgsOverride { advices } => advices,
        }
    }

    /// Run the full interception around the target call.
    ///
    /// `before` hooks fire in declaration order. The target is then invoked,
    /// with staged replacement arguments when this is an args-override
    /// variant. On failure, `on_error` hooks fire in reverse order. `after`
    /// hooks always fire in reverse order, so each advice's teardown
    /// observes the effects of advices nested inside it; on the error path
    /// they see a null outcome.
    ///
    /// # Errors
    ///
    /// Propagates the target's failure after the error and teardown hooks
    /// have run.
    pub fn intercept(
        &self,
        invocation: &mut Invocation,
        target: &mut dyn TargetInvoker,
    ) -> Result<serde_json::Value, InvokeError> {
        let advices = self.advices();
        for advice in advices {
            advice.before(invocation);
        }

        let result = if self.overrides_args() {
            match invocation.take_overridden_args() {
                Some(args) => target.invoke_with(args),
                None => target.invoke(),
            }
        } else {
            target.invoke()
        };

        match result {
            Ok(value) => {
                let mut outcome = InvokeOutcome::new(value);
                for advice in advices.iter().rev() {
                    advice.after(invocation, &mut outcome);
                }
                Ok(outcome.into_value())
            },
            Err(error) => {
                for advice in advices.iter().rev() {
                    advice.on_error(invocation, &error);
                }
                let mut outcome = InvokeOutcome::default();
                for advice in advices.iter().rev() {
                    advice.after(invocation, &mut outcome);
                }
                Err(error)
            },
        }
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Single { .. } => "Single",
            Self::SingleArgsOverride { .. } => "SingleArgsOverride",
            Self::Composed { .. } => "Composed",
            Self::ComposedArgsOverride { .. } => "ComposedArgsOverride",
        };
        f.debug_struct("Interceptor")
            .field("variant", &variant)
            .field("advices", &self.advice_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::MethodDescriptor;
    use std::sync::Mutex;

    struct Recording {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recording {
        fn push(&self, phase: &str) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", phase, self.tag));
        }
    }

    impl MethodAdvice for Recording {
        fn before(&self, _invocation: &mut Invocation) {
            self.push("before");
        }

        fn after(&self, _invocation: &Invocation, _outcome: &mut InvokeOutcome) {
            self.push("after");
        }

        fn on_error(&self, _invocation: &Invocation, _error: &InvokeError) {
            self.push("error");
        }
    }

    struct FakeTarget {
        fail: bool,
        seen_args: Option<Vec<serde_json::Value>>,
    }

    impl FakeTarget {
        fn ok() -> Self {
            Self {
                fail: false,
                seen_args: None,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                seen_args: None,
            }
        }
    }

    impl TargetInvoker for FakeTarget {
        fn invoke(&mut self) -> Result<serde_json::Value, InvokeError> {
            if self.fail {
                return Err(InvokeError::new("target blew up"));
            }
            Ok(serde_json::json!("original"))
        }

        fn invoke_with(
            &mut self,
            args: Vec<serde_json::Value>,
        ) -> Result<serde_json::Value, InvokeError> {
            self.seen_args = Some(args);
            self.invoke()
        }
    }

    fn invocation() -> Invocation {
        Invocation::new(MethodDescriptor::new("app.Repository", "query"), Vec::new())
    }

    fn chain(log: &Arc<Mutex<Vec<String>>>, tags: &[&'static str]) -> Vec<Arc<dyn MethodAdvice>> {
        tags.iter()
            .map(|tag| {
                Arc::new(Recording {
                    tag,
                    log: Arc::clone(log),
                }) as Arc<dyn MethodAdvice>
            })
            .collect()
    }

    #[test]
    fn test_onion_ordering_on_success() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let interceptor = Interceptor::composed(chain(&log, &["a", "b", "c"]), false);

        let mut target = FakeTarget::ok();
        let result = interceptor.intercept(&mut invocation(), &mut target);
        assert!(result.is_ok());

        let entries = log.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec!["before:a", "before:b", "before:c", "after:c", "after:b", "after:a"]
        );
    }

    #[test]
    fn test_error_hooks_then_teardown_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let interceptor = Interceptor::composed(chain(&log, &["a", "b"]), false);

        let mut target = FakeTarget::failing();
        let result = interceptor.intercept(&mut invocation(), &mut target);
        assert!(result.is_err());

        let entries = log.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec!["before:a", "before:b", "error:b", "error:a", "after:b", "after:a"]
        );
    }

    #[test]
    fn test_args_override_reaches_target() {
        struct Replacer;
        impl MethodAdvice for Replacer {
            fn before(&self, invocation: &mut Invocation) {
                invocation.override_args(vec![serde_json::json!("replaced")]);
            }
        }

        let interceptor = Interceptor::single(Arc::new(Replacer), true);
        let mut target = FakeTarget::ok();
        interceptor.intercept(&mut invocation(), &mut target).unwrap();
        assert_eq!(target.seen_args, Some(vec![serde_json::json!("replaced")]));
    }

    #[test]
    fn test_plain_variant_ignores_staging() {
        struct Replacer;
        impl MethodAdvice for Replacer {
            fn before(&self, invocation: &mut Invocation) {
                invocation.override_args(vec![serde_json::json!("replaced")]);
            }
        }

        let interceptor = Interceptor::single(Arc::new(Replacer), false);
        assert!(!interceptor.overrides_args());
        let mut target = FakeTarget::ok();
        interceptor.intercept(&mut invocation(), &mut target).unwrap();
        assert!(target.seen_args.is_none());
    }

    #[test]
    fn test_after_can_rebase_result() {
        struct Rebaser;
        impl MethodAdvice for Rebaser {
            fn after(&self, _invocation: &Invocation, outcome: &mut InvokeOutcome) {
                outcome.rebase(serde_json::json!("rebased"));
            }
        }

        let interceptor = Interceptor::single(Arc::new(Rebaser), false);
        let mut target = FakeTarget::ok();
        let value = interceptor.intercept(&mut invocation(), &mut target).unwrap();
        assert_eq!(value, serde_json::json!("rebased"));
    }

    #[test]
    fn test_variant_selection() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let advices = chain(&log, &["a"]);

        assert!(matches!(
            Interceptor::single(advices[0].clone(), false),
            Interceptor::Single { .. }
        ));
        assert!(matches!(
            Interceptor::single(advices[0].clone(), true),
            Interceptor::SingleArgsOverride { .. }
        ));
        assert!(matches!(
            Interceptor::composed(chain(&log, &["a", "b"]), false),
            Interceptor::Composed { .. }
        ));
        assert!(matches!(
            Interceptor::composed(chain(&log, &["a", "b"]), true),
            Interceptor::ComposedArgsOverride { .. }
        ));
    }
}
