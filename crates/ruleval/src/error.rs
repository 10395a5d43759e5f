//! Error types.
//!
//! A rule that does not hold is not an error: it is reported through
//! [`ValidationResult`](crate::ValidationResult). The types here cover faults
//! that stop a validation call or a load from completing.

use thiserror::Error;

/// Boxed error returned by custom test predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error that aborts a `validate` call.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A custom test predicate returned an error.
    #[error("custom test for field `{key}` failed: {source}")]
    Predicate {
        /// Field targeted by the failing rule
        key: String,
        #[source]
        source: BoxError,
    },

    /// The data passed to `validate_value` was not a JSON object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Error loading rules or configuration from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ValidateError> = std::result::Result<T, E>;
