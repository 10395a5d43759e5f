//! # ruleval
//!
//! Asynchronous rule-based validation for key/value data.
//!
//! A [`RuleValidator`] holds an ordered list of [`Rule`]s, each targeting one
//! field. Validating a data object runs the rules one at a time in declaration
//! order and reports every violated rule, at most one per field: once a field
//! has failed, its remaining rules are not evaluated.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ruleval::prelude::*;
//!
//! let validator = RuleValidator::new(vec![
//!     Rule::new("phone", "phone is required").required(),
//!     Rule::new("phone", "invalid phone").of_type(RuleType::ChineseMobilePhoneNumber),
//!     Rule::new("name", "name too short").test(Test::from_async(|v, _| async move {
//!         v.as_str().is_some_and(|s| s.chars().count() > 2)
//!     })),
//! ]);
//!
//! let data: Data = serde_json::from_value(json!({ "phone": "", "name": "Al" }))?;
//! let result = validator.validate(&data).await?;
//!
//! assert!(!result.valid);
//! assert_eq!(result.keys(), vec!["phone", "name"]);
//! ```
//!
//! ## Rule evaluation
//!
//! For each rule whose field has not failed yet:
//!
//! 1. Field absent: fails only if `required`.
//! 2. `required` and the value is `null` or `""`: fails.
//! 3. `type` set: the registered predicate must accept the value. Tags with
//!    no registered predicate are ignored.
//! 4. `test` set: a pattern must match the stringified value; a custom
//!    predicate's answer decides the rule.
//!
//! ## Built-in types
//!
//! `number`, `integer`, `chinesePhoneNumber`, `chineseMobilePhoneNumber`,
//! `chineseLandlineNumber`, `chineseIdCard`, `url`, `email`, `chineseName`.
//! More can be added through [`TypeRegistry::register`].
//!
//! ## Errors
//!
//! Violations are data, not errors. `validate` only returns `Err` when a
//! custom predicate itself fails and the [`PredicateErrorPolicy`] is
//! `Propagate` (the default).

#[macro_use]
mod tracing_macros;

mod config;
mod error;
mod rule;
mod types;
mod validator;

#[cfg(test)]
mod tests;

pub use config::{PredicateErrorPolicy, ValidatorConfig};
pub use error::{BoxError, LoadError, ValidateError};
pub use rule::{CustomTest, Data, Rule, RuleSet, RuleType, Test};
pub use types::{TypePredicate, TypeRegistry};
pub use validator::{RuleValidator, RuleValidatorBuilder, ValidationResult};

/// Predicates backing the built-in types.
pub use ruleval_predicates as predicates;

// Re-exported for implementing `CustomTest`
pub use async_trait::async_trait;

/// Prelude module for validation
pub mod prelude {
    pub use crate::config::{PredicateErrorPolicy, ValidatorConfig};
    pub use crate::error::{BoxError, LoadError, ValidateError};
    pub use crate::rule::{CustomTest, Data, Rule, RuleSet, RuleType, Test};
    pub use crate::types::TypeRegistry;
    pub use crate::validator::{RuleValidator, RuleValidatorBuilder, ValidationResult};
    pub use async_trait::async_trait;
    pub use serde_json::{json, Value};
}
