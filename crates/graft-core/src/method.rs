//! Method and type descriptors of the instrumentation target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptor of one declared method of a target type.
///
/// Descriptors are immutable inputs to advisor resolution; the engine never
/// invokes the method itself, it only matches pointcuts against the
/// descriptor and hands a selector to the weaving layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Fully qualified name of the type declaring this method.
    pub owner: String,
    /// Method name.
    pub name: String,
    /// Parameter type names, in declaration order.
    #[serde(default)]
    pub param_types: Vec<String>,
    /// Whether the method is abstract (no body to instrument).
    #[serde(default)]
    pub is_abstract: bool,
    /// Whether the method is compiler-generated.
    #[serde(default)]
    pub is_synthetic: bool,
}

impl MethodDescriptor {
    /// Create a descriptor for a concrete, non-synthetic method.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            param_types: Vec::new(),
            is_abstract: false,
            is_synthetic: false,
        }
    }

    /// Set the parameter type names.
    #[must_use]
    pub fn with_params(mut self, param_types: Vec<String>) -> Self {
        self.param_types = param_types;
        self
    }

    /// Mark the method as abstract.
    #[must_use]
    pub fn mark_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark the method as compiler-generated.
    #[must_use]
    pub fn mark_synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    /// Whether this method may be advised at all.
    ///
    /// Abstract and synthetic methods are never eligible for matching.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !(self.is_abstract || self.is_synthetic)
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}({})", self.owner, self.name, self.param_types.join(", "))
    }
}

/// A target type together with its declared methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Fully qualified type name.
    pub name: String,
    /// Declared methods, eligible or not; the driver filters eligibility.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Create a type descriptor with no methods.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a declared method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}
