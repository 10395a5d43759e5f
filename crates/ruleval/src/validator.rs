//! The rule validator.

use crate::config::{PredicateErrorPolicy, ValidatorConfig};
use crate::error::{Result, ValidateError};
use crate::rule::{Data, Rule, RuleType, Test};
use crate::types::{TypePredicate, TypeRegistry};
use ruleval_predicates::stringify;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of one `validate` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult<M = Value> {
    /// `true` iff no rule was violated
    pub valid: bool,
    /// Violated rules in declaration order, at most one per key
    pub unvalid_rules: Vec<Rule<M>>,
}

impl<M> ValidationResult<M> {
    fn from_violations(unvalid_rules: Vec<Rule<M>>) -> Self {
        Self {
            valid: unvalid_rules.is_empty(),
            unvalid_rules,
        }
    }

    /// Keys of the violated rules.
    pub fn keys(&self) -> Vec<&str> {
        self.unvalid_rules.iter().map(|r| r.key.as_str()).collect()
    }

    /// Message payloads of the violated rules.
    pub fn messages(&self) -> Vec<&M> {
        self.unvalid_rules.iter().map(|r| &r.message).collect()
    }

    /// Convert to Result - Ok if valid, Err with the violated rules otherwise.
    pub fn into_result(self) -> std::result::Result<(), Vec<Rule<M>>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.unvalid_rules)
        }
    }
}

/// Evaluates an ordered rule list against data objects.
///
/// Rules run one at a time in declaration order; each check, including any
/// async custom test, completes before the next begins. Once a key has a
/// violation, the remaining rules for that key are skipped for that call.
///
/// The rule list is shared and immutable, so a validator can be cloned
/// cheaply and used from many tasks at once.
///
/// ## Example
///
/// ```rust
/// use ruleval::{Data, Rule, RuleType, RuleValidator};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() {
/// let validator = RuleValidator::new(vec![
///     Rule::new("age", "bad age").of_type(RuleType::Integer),
/// ]);
///
/// let data: Data = serde_json::from_value(json!({ "age": "12.5" })).unwrap();
/// let result = validator.validate(&data).await.unwrap();
///
/// assert!(!result.valid);
/// assert_eq!(result.messages(), vec![&json!("bad age")]);
/// # }
/// ```
pub struct RuleValidator<M = Value> {
    rules: Arc<[Rule<M>]>,
    types: Arc<TypeRegistry>,
    config: ValidatorConfig,
}

impl<M> Clone for RuleValidator<M> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            types: Arc::clone(&self.types),
            config: self.config.clone(),
        }
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for RuleValidator<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleValidator")
            .field("rules", &self.rules)
            .field("types", &self.types)
            .field("config", &self.config)
            .finish()
    }
}

impl<M: Clone> RuleValidator<M> {
    /// Create a validator with the built-in types and default configuration.
    pub fn new(rules: impl IntoIterator<Item = Rule<M>>) -> Self {
        Self::builder().rules(rules).build()
    }

    /// Create a builder for a custom type registry or configuration.
    pub fn builder() -> RuleValidatorBuilder<M> {
        RuleValidatorBuilder::new()
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[Rule<M>] {
        &self.rules
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a data object.
    ///
    /// Returns the violated rules as owned copies; changing them does not
    /// affect the validator. Fails only when a custom test errors under
    /// [`PredicateErrorPolicy::Propagate`], in which case later rules are not
    /// evaluated.
    pub async fn validate(&self, data: &Data) -> Result<ValidationResult<M>> {
        trace_debug!(rules = self.rules.len(), "validation started");

        let mut failed_keys: HashSet<&str> = HashSet::new();
        let mut unvalid_rules = Vec::new();

        for rule in self.rules.iter() {
            if failed_keys.contains(rule.key.as_str()) {
                trace_debug!(key = %rule.key, "skipping rule, key already failed");
                continue;
            }

            if !self.check(rule, data).await? {
                failed_keys.insert(rule.key.as_str());
                unvalid_rules.push(rule.clone());
            }
        }

        trace_debug!(violations = unvalid_rules.len(), "validation finished");
        Ok(ValidationResult::from_violations(unvalid_rules))
    }

    /// Validate any JSON value. Non-objects are rejected with
    /// [`ValidateError::NotAnObject`].
    pub async fn validate_value(&self, value: &Value) -> Result<ValidationResult<M>> {
        let data = value
            .as_object()
            .ok_or_else(|| ValidateError::NotAnObject(json_kind(value)))?;
        self.validate(data).await
    }

    /// Check one rule. `Ok(true)` means the rule holds.
    async fn check(&self, rule: &Rule<M>, data: &Data) -> Result<bool> {
        let Some(value) = data.get(&rule.key) else {
            return Ok(!rule.required);
        };

        if rule.required && is_blank(value) {
            return Ok(false);
        }

        if let Some(rule_type) = &rule.rule_type {
            if let Some(predicate) = self.type_predicate(rule_type) {
                if !predicate(value) {
                    return Ok(false);
                }
            }
        }

        match &rule.test {
            Some(Test::Pattern(pattern)) => Ok(pattern.is_match(&stringify(value))),
            // A custom test decides the rule on its own
            Some(Test::Predicate(predicate)) => match predicate.test(value, data).await {
                Ok(passed) => Ok(passed),
                Err(source) => {
                    let error = ValidateError::Predicate {
                        key: rule.key.clone(),
                        source,
                    };
                    match self.config.predicate_errors {
                        PredicateErrorPolicy::Propagate => Err(error),
                        PredicateErrorPolicy::RecordAsFailure => {
                            trace_warn!(error = %error, "recording violation");
                            Ok(false)
                        }
                    }
                }
            },
            None => Ok(true),
        }
    }

    fn type_predicate(&self, rule_type: &RuleType) -> Option<&TypePredicate> {
        let predicate = self.types.lookup(rule_type);
        if predicate.is_none() {
            trace_debug!(rule_type = %rule_type, "no predicate registered for type, skipping check");
        }
        predicate
    }
}

/// Builder for a [`RuleValidator`].
///
/// ## Example
///
/// ```rust
/// use ruleval::{PredicateErrorPolicy, Rule, RuleValidator, ValidatorConfig};
///
/// let validator = RuleValidator::builder()
///     .rule(Rule::new("zip", "bad postcode").of_type("postcode"))
///     .register_type("postcode", |v| v.as_str().is_some_and(|s| s.len() == 6))
///     .config(ValidatorConfig::new().predicate_errors(PredicateErrorPolicy::RecordAsFailure))
///     .build();
///
/// assert_eq!(validator.rules().len(), 1);
/// ```
pub struct RuleValidatorBuilder<M = Value> {
    rules: Vec<Rule<M>>,
    types: TypeRegistry,
    config: ValidatorConfig,
}

impl<M> RuleValidatorBuilder<M> {
    /// Create a builder with no rules, the built-in types and default config.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            types: TypeRegistry::builtin(),
            config: ValidatorConfig::default(),
        }
    }

    /// Append one rule.
    pub fn rule(mut self, rule: Rule<M>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules, keeping their order.
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule<M>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Replace the type registry.
    pub fn types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    /// Register an extra type tag.
    pub fn register_type<F>(mut self, tag: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.types.register(tag, predicate);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the validator.
    pub fn build(self) -> RuleValidator<M> {
        RuleValidator {
            rules: self.rules.into(),
            types: Arc::new(self.types),
            config: self.config,
        }
    }
}

impl<M> Default for RuleValidatorBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
