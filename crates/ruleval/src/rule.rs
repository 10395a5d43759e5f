//! Rule model: rules, rule sets, type tags and custom tests.

use crate::error::{BoxError, LoadError};
use async_trait::async_trait;
use regex::Regex;
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// Data object checked by a validator: field name to value.
pub type Data = serde_json::Map<String, Value>;

/// A single field-level validation directive.
///
/// A rule combines up to three checks on one field, evaluated in order: the
/// `required` check, a built-in or registered type check, and a custom test.
/// `message` is an opaque payload handed back verbatim when the rule is
/// violated.
///
/// ## Example
///
/// ```rust
/// use ruleval::{Rule, RuleType};
///
/// let rule = Rule::new("phone", "invalid phone number")
///     .required()
///     .of_type(RuleType::ChineseMobilePhoneNumber);
/// assert!(rule.required);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule<M = Value> {
    /// Field of the data object this rule checks
    pub key: String,
    /// Type tag dispatched through the validator's type registry
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    /// The field must be present and neither null nor an empty string
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Pattern or custom predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Test>,
    /// Payload returned when the rule is violated
    pub message: M,
}

impl Rule {
    /// Create a rule carrying a JSON message payload.
    pub fn new(key: impl Into<String>, message: impl Into<Value>) -> Self {
        Self::with_payload(key, message.into())
    }
}

impl<M> Rule<M> {
    /// Create a rule with an arbitrary message payload.
    pub fn with_payload(key: impl Into<String>, message: M) -> Self {
        Self {
            key: key.into(),
            rule_type: None,
            required: false,
            test: None,
            message,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the type tag.
    pub fn of_type(mut self, rule_type: impl Into<RuleType>) -> Self {
        self.rule_type = Some(rule_type.into());
        self
    }

    /// Set the custom test.
    pub fn test(mut self, test: Test) -> Self {
        self.test = Some(test);
        self
    }
}

/// Type tag selecting a predicate from the [`TypeRegistry`](crate::TypeRegistry).
///
/// Serialized as its camelCase tag. Tags without a built-in variant parse to
/// [`RuleType::Other`]; the registry decides whether they mean anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleType {
    /// Number or numeric string
    Number,
    /// Numeric value with no fractional part
    Integer,
    /// Mobile or landline phone number
    ChinesePhoneNumber,
    /// Mobile phone number
    ChineseMobilePhoneNumber,
    /// Landline phone number
    ChineseLandlineNumber,
    /// Resident identity card number
    ChineseIdCard,
    /// URL
    Url,
    /// Email address
    Email,
    /// Personal name in Han characters
    ChineseName,
    /// Any other tag, resolved through the registry at check time
    Other(String),
}

impl RuleType {
    /// Every built-in type.
    pub const BUILTIN: [RuleType; 9] = [
        RuleType::Number,
        RuleType::Integer,
        RuleType::ChinesePhoneNumber,
        RuleType::ChineseMobilePhoneNumber,
        RuleType::ChineseLandlineNumber,
        RuleType::ChineseIdCard,
        RuleType::Url,
        RuleType::Email,
        RuleType::ChineseName,
    ];

    /// The tag string for this type.
    pub fn tag(&self) -> &str {
        match self {
            RuleType::Number => "number",
            RuleType::Integer => "integer",
            RuleType::ChinesePhoneNumber => "chinesePhoneNumber",
            RuleType::ChineseMobilePhoneNumber => "chineseMobilePhoneNumber",
            RuleType::ChineseLandlineNumber => "chineseLandlineNumber",
            RuleType::ChineseIdCard => "chineseIdCard",
            RuleType::Url => "url",
            RuleType::Email => "email",
            RuleType::ChineseName => "chineseName",
            RuleType::Other(tag) => tag,
        }
    }
}

impl From<&str> for RuleType {
    fn from(tag: &str) -> Self {
        RuleType::BUILTIN
            .into_iter()
            .find(|t| t.tag() == tag)
            .unwrap_or_else(|| RuleType::Other(tag.to_string()))
    }
}

impl From<String> for RuleType {
    fn from(tag: String) -> Self {
        match RuleType::from(tag.as_str()) {
            RuleType::Other(_) => RuleType::Other(tag),
            builtin => builtin,
        }
    }
}

impl From<RuleType> for String {
    fn from(rule_type: RuleType) -> Self {
        match rule_type {
            RuleType::Other(tag) => tag,
            builtin => builtin.tag().to_string(),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Custom predicate with access to the field value and the whole data object.
///
/// Implement this directly for tests that need to borrow the data, or use the
/// closure adapters on [`Test`]. Returning `Err` signals a fault, not a failed
/// check; see [`PredicateErrorPolicy`](crate::PredicateErrorPolicy).
///
/// ## Example
///
/// ```rust,ignore
/// use ruleval::prelude::*;
///
/// struct MatchesField(&'static str);
///
/// #[async_trait]
/// impl CustomTest for MatchesField {
///     async fn test(&self, value: &Value, data: &Data) -> Result<bool, BoxError> {
///         Ok(data.get(self.0) == Some(value))
///     }
/// }
/// ```
#[async_trait]
pub trait CustomTest: Send + Sync {
    /// Decide whether `value` passes.
    async fn test(&self, value: &Value, data: &Data) -> Result<bool, BoxError>;
}

/// Custom check attached to a rule.
#[derive(Clone)]
pub enum Test {
    /// Regular expression matched against the stringified value
    Pattern(Regex),
    /// Predicate whose result decides the rule
    Predicate(Arc<dyn CustomTest>),
}

impl Test {
    /// Compile a pattern test.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Test::Pattern(Regex::new(pattern)?))
    }

    /// Wrap a [`CustomTest`] implementation.
    pub fn custom(test: impl CustomTest + 'static) -> Self {
        Test::Predicate(Arc::new(test))
    }

    /// Synchronous predicate.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &Data) -> bool + Send + Sync + 'static,
    {
        Test::custom(FnTest(f))
    }

    /// Synchronous predicate that can fail.
    pub fn try_from_fn<F, E>(f: F) -> Self
    where
        F: Fn(&Value, &Data) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Test::custom(TryFnTest(f, PhantomData))
    }

    /// Asynchronous predicate.
    ///
    /// The closure receives owned copies of the value and the data object so
    /// the returned future can be `'static`.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Value, Data) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Test::custom(AsyncFnTest(f))
    }

    /// Asynchronous predicate that can fail.
    pub fn try_from_async<F, Fut, E>(f: F) -> Self
    where
        F: Fn(Value, Data) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Test::custom(TryAsyncFnTest(f))
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Test::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Test::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl Serialize for Test {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Test::Pattern(re) => serializer.serialize_str(re.as_str()),
            Test::Predicate(_) => Err(S::Error::custom(
                "custom predicate tests cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Test {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Test::pattern(&pattern).map_err(D::Error::custom)
    }
}

// Adapters normalizing sync and async closures to `CustomTest`.

struct FnTest<F>(F);

#[async_trait]
impl<F> CustomTest for FnTest<F>
where
    F: Fn(&Value, &Data) -> bool + Send + Sync,
{
    async fn test(&self, value: &Value, data: &Data) -> Result<bool, BoxError> {
        Ok((self.0)(value, data))
    }
}

struct TryFnTest<F, E>(F, PhantomData<fn() -> E>);

#[async_trait]
impl<F, E> CustomTest for TryFnTest<F, E>
where
    F: Fn(&Value, &Data) -> Result<bool, E> + Send + Sync,
    E: Into<BoxError> + 'static,
{
    async fn test(&self, value: &Value, data: &Data) -> Result<bool, BoxError> {
        (self.0)(value, data).map_err(Into::into)
    }
}

struct AsyncFnTest<F>(F);

#[async_trait]
impl<F, Fut> CustomTest for AsyncFnTest<F>
where
    F: Fn(Value, Data) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    async fn test(&self, value: &Value, data: &Data) -> Result<bool, BoxError> {
        Ok((self.0)(value.clone(), data.clone()).await)
    }
}

struct TryAsyncFnTest<F>(F);

#[async_trait]
impl<F, Fut, E> CustomTest for TryAsyncFnTest<F>
where
    F: Fn(Value, Data) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    async fn test(&self, value: &Value, data: &Data) -> Result<bool, BoxError> {
        (self.0)(value.clone(), data.clone())
            .await
            .map_err(Into::into)
    }
}

/// Ordered list of rules. Order decides evaluation order only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet<M = Value> {
    rules: Vec<Rule<M>>,
}

impl<M> RuleSet<M> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn push(&mut self, rule: Rule<M>) {
        self.rules.push(rule);
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule<M>> {
        self.rules.iter()
    }

    /// Take the rules out of the set.
    pub fn into_rules(self) -> Vec<Rule<M>> {
        self.rules
    }
}

impl<M: DeserializeOwned> RuleSet<M> {
    /// Parse a rule set from a JSON array of rules.
    ///
    /// Pattern tests are given as regex source strings. Custom predicates
    /// cannot be expressed in JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<M> Default for RuleSet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> From<Vec<Rule<M>>> for RuleSet<M> {
    fn from(rules: Vec<Rule<M>>) -> Self {
        Self { rules }
    }
}

impl<M> FromIterator<Rule<M>> for RuleSet<M> {
    fn from_iter<I: IntoIterator<Item = Rule<M>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<M> IntoIterator for RuleSet<M> {
    type Item = Rule<M>;
    type IntoIter = std::vec::IntoIter<Rule<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a, M> IntoIterator for &'a RuleSet<M> {
    type Item = &'a Rule<M>;
    type IntoIter = std::slice::Iter<'a, Rule<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
