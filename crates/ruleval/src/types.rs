//! Dispatch table from type tags to predicates.

use crate::rule::RuleType;
use ruleval_predicates as predicates;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Predicate backing a type tag.
pub type TypePredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Registry mapping type tags to predicates.
///
/// The validator looks each rule's [`RuleType`] up by tag. A tag with no entry
/// is a no-op: the type check passes. Register extra tags to extend the set of
/// types without touching the validator.
///
/// ## Example
///
/// ```rust
/// use ruleval::{RuleType, TypeRegistry};
/// use serde_json::json;
///
/// let mut types = TypeRegistry::builtin();
/// types.register("postcode", |v| {
///     v.as_str().is_some_and(|s| s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()))
/// });
///
/// let check = types.lookup(&RuleType::from("postcode")).unwrap();
/// assert!(check(&json!("100080")));
/// ```
#[derive(Clone, Default)]
pub struct TypeRegistry {
    predicates: HashMap<String, TypePredicate>,
}

impl TypeRegistry {
    /// Create a registry with no types.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in type.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(RuleType::Number.tag(), predicates::is_numeric);
        registry.register(RuleType::Integer.tag(), |v| {
            predicates::is_numeric(v) && predicates::to_number(v).is_some_and(predicates::is_integer)
        });
        registry.register(RuleType::ChinesePhoneNumber.tag(), predicates::is_chinese_phone);
        registry.register(
            RuleType::ChineseMobilePhoneNumber.tag(),
            predicates::is_chinese_mobile_phone,
        );
        registry.register(
            RuleType::ChineseLandlineNumber.tag(),
            predicates::is_chinese_landline,
        );
        registry.register(RuleType::ChineseIdCard.tag(), predicates::is_chinese_id_card);
        registry.register(RuleType::Url.tag(), predicates::is_url);
        registry.register(RuleType::Email.tag(), predicates::is_email);
        registry.register(RuleType::ChineseName.tag(), predicates::is_chinese_name);
        registry
    }

    /// Add a type, replacing any predicate already registered for the tag.
    pub fn register<F>(&mut self, tag: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(tag.into(), Arc::new(predicate));
        self
    }

    /// Find the predicate for a type.
    pub fn lookup(&self, rule_type: &RuleType) -> Option<&TypePredicate> {
        self.predicates.get(rule_type.tag())
    }

    /// Check whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.predicates.contains_key(tag)
    }

    /// Registered tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("TypeRegistry").field("tags", &tags).finish()
    }
}
