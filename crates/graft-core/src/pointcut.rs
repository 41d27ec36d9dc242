//! Pointcut predicates - rules selecting which methods an advisor applies to.

use serde::{Deserialize, Serialize};

use crate::method::MethodDescriptor;

/// Predicate over method descriptors.
///
/// Matching is declarative and order-independent; several declarations may
/// legitimately claim the same method, and overlap is resolved by the
/// composition layer rather than rejected here. An invalid glob or regex
/// pattern never matches; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MethodPointcut {
    /// Match a method by exact name.
    Named {
        /// The method name.
        name: String,
    },
    /// Match any method whose name appears in the list.
    NameIn {
        /// Method names to match.
        names: Vec<String>,
    },
    /// Match method names against a glob pattern.
    Glob {
        /// The glob pattern.
        pattern: String,
    },
    /// Match method names against a regex pattern.
    Regex {
        /// The regex pattern.
        pattern: String,
    },
    /// Match methods declaring exactly this many parameters.
    ParamCount {
        /// The required parameter count.
        count: usize,
    },
    /// Match when any inner pointcut matches.
    AnyOf {
        /// Inner pointcuts.
        pointcuts: Vec<MethodPointcut>,
    },
    /// Match when every inner pointcut matches (an empty list matches all).
    AllOf {
        /// Inner pointcuts.
        pointcuts: Vec<MethodPointcut>,
    },
}

impl MethodPointcut {
    /// Create an exact-name pointcut.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// Create a name-list pointcut.
    #[must_use]
    pub fn name_in(names: Vec<String>) -> Self {
        Self::NameIn { names }
    }

    /// Create a glob pointcut.
    #[must_use]
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::Glob {
            pattern: pattern.into(),
        }
    }

    /// Create a regex pointcut.
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
        }
    }

    /// Create a parameter-count pointcut.
    #[must_use]
    pub fn param_count(count: usize) -> Self {
        Self::ParamCount { count }
    }

    /// Combine pointcuts disjunctively.
    #[must_use]
    pub fn any_of(pointcuts: Vec<MethodPointcut>) -> Self {
        Self::AnyOf { pointcuts }
    }

    /// Combine pointcuts conjunctively.
    #[must_use]
    pub fn all_of(pointcuts: Vec<MethodPointcut>) -> Self {
        Self::AllOf { pointcuts }
    }

    /// Check whether this pointcut selects the given method.
    #[must_use]
    pub fn matches(&self, method: &MethodDescriptor) -> bool {
        match self {
            Self::Named { name } => method.name == *name,
            Self::NameIn { names } => names.contains(&method.name),
            Self::Glob { pattern } => {
                if let Ok(glob) = globset::Glob::new(pattern) {
                    return glob.compile_matcher().is_match(&method.name);
                }
                false
            },
            Self::Regex { pattern } => {
                if let Ok(re) = regex::Regex::new(pattern) {
                    return re.is_match(&method.name);
                }
                false
            },
            Self::ParamCount { count } => method.param_types.len() == *count,
            Self::AnyOf { pointcuts } => pointcuts.iter().any(|p| p.matches(method)),
            Self::AllOf { pointcuts } => pointcuts.iter().all(|p| p.matches(method)),
        }
    }
}
