//! Validator configuration.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};

/// What to do when a custom test predicate returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PredicateErrorPolicy {
    /// Abort the `validate` call and return the error. Later rules are not run.
    #[default]
    Propagate,
    /// Record the rule as violated and keep going.
    RecordAsFailure,
}

/// Runtime options for a [`RuleValidator`](crate::RuleValidator).
///
/// ## Example
///
/// ```rust
/// use ruleval::{PredicateErrorPolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json(r#"{ "predicateErrors": "recordAsFailure" }"#).unwrap();
/// assert_eq!(config.predicate_errors, PredicateErrorPolicy::RecordAsFailure);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Handling of errors raised by custom test predicates
    pub predicate_errors: PredicateErrorPolicy,
}

impl ValidatorConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the predicate error policy.
    pub fn predicate_errors(mut self, policy: PredicateErrorPolicy) -> Self {
        self.predicate_errors = policy;
        self
    }
}
