//! Error types for advice resolution and binding.

use thiserror::Error;

/// Errors that can occur while resolving or binding an advisor.
///
/// Every variant is scoped to a single method's wiring; the application
/// driver recovers from all of them and continues with the remaining
/// methods. Absence of a match is not an error anywhere in the engine.
#[derive(Debug, Error)]
pub enum AdviceError {
    /// No factory is registered for the advice identifier.
    #[error("unknown advice: {id}")]
    UnknownAdvice {
        /// The unresolved advice identifier.
        id: String,
    },

    /// A registered factory failed to produce an instance.
    #[error("failed to construct advice {id}: {message}")]
    ConstructionFailed {
        /// The advice identifier.
        id: String,
        /// Why construction failed.
        message: String,
    },

    /// The type builder rejected a selector/interceptor pair.
    #[error("type builder rejected {method}: {message}")]
    BindRejected {
        /// The method whose binding was rejected.
        method: String,
        /// The builder's reason.
        message: String,
    },
}

impl AdviceError {
    /// Create a `ConstructionFailed` error; convenience for advice factories.
    #[must_use]
    pub fn construction(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Result type for advice operations.
pub type AdviceResult<T> = Result<T, AdviceError>;
