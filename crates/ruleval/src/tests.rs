//! Property-based tests for the rule validator.

#[cfg(test)]
mod property_tests {
    use crate::rule::{Data, Rule, RuleType, Test};
    use crate::validator::RuleValidator;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    // Small key space so rules collide on keys often
    fn key_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just("a"), Just("b"), Just("c"), Just("d")].prop_map(String::from)
    }

    fn type_strategy() -> impl Strategy<Value = Option<RuleType>> {
        prop_oneof![
            Just(None),
            Just(Some(RuleType::Number)),
            Just(Some(RuleType::Integer)),
            Just(Some(RuleType::Email)),
            Just(Some(RuleType::ChineseMobilePhoneNumber)),
            Just(Some(RuleType::Other("unregistered".to_string()))),
        ]
    }

    fn test_strategy() -> impl Strategy<Value = Option<Test>> {
        prop_oneof![
            Just(None),
            Just(Some(Test::pattern(r"^\d+$").unwrap())),
            Just(Some(Test::from_fn(|v, _| !v.is_null()))),
            Just(Some(Test::from_async(|v, _| async move {
                v.as_str().map_or(true, |s| s.len() < 5)
            }))),
        ]
    }

    fn rule_strategy() -> impl Strategy<Value = Rule> {
        (
            key_strategy(),
            type_strategy(),
            any::<bool>(),
            test_strategy(),
            any::<u16>(),
        )
            .prop_map(|(key, rule_type, required, test, id)| Rule {
                key,
                rule_type,
                required,
                test,
                message: json!(id),
            })
    }

    fn value_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            Just(json!("")),
            Just(json!("12")),
            Just(json!("12.5")),
            Just(json!("13812345678")),
            Just(json!("user@example.com")),
            Just(json!("hello world")),
            any::<i32>().prop_map(|n| json!(n)),
            any::<bool>().prop_map(|b| json!(b)),
        ]
    }

    fn data_strategy() -> impl Strategy<Value = Data> {
        proptest::collection::btree_map(key_strategy(), value_strategy(), 0..4)
            .prop_map(|fields| fields.into_iter().collect())
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Repeated calls with the same rules and data agree
        #[test]
        fn validation_is_deterministic(
            rules in proptest::collection::vec(rule_strategy(), 0..8),
            data in data_strategy(),
        ) {
            let validator = RuleValidator::new(rules);
            let (first, second) = block_on(async {
                (
                    validator.validate(&data).await.unwrap(),
                    validator.validate(&data).await.unwrap(),
                )
            });
            prop_assert_eq!(first.valid, second.valid);
            prop_assert_eq!(first.messages(), second.messages());
        }

        // `valid` is exactly "no violations"
        #[test]
        fn valid_iff_no_violations(
            rules in proptest::collection::vec(rule_strategy(), 0..8),
            data in data_strategy(),
        ) {
            let validator = RuleValidator::new(rules);
            let result = block_on(validator.validate(&data)).unwrap();
            prop_assert_eq!(result.valid, result.unvalid_rules.is_empty());
        }

        // Each key is reported at most once, for its first failing rule
        #[test]
        fn at_most_one_violation_per_key(
            rules in proptest::collection::vec(rule_strategy(), 0..8),
            data in data_strategy(),
        ) {
            let validator = RuleValidator::new(rules);
            let result = block_on(validator.validate(&data)).unwrap();
            let keys: HashSet<_> = result.keys().into_iter().collect();
            prop_assert_eq!(keys.len(), result.unvalid_rules.len());
        }

        // Absent, non-required fields never fail
        #[test]
        fn absent_optional_fields_never_fail(
            rules in proptest::collection::vec(rule_strategy(), 0..8),
        ) {
            let rules: Vec<Rule> = rules
                .into_iter()
                .map(|mut rule| {
                    rule.required = false;
                    rule
                })
                .collect();
            let validator = RuleValidator::new(rules);
            let result = block_on(validator.validate(&Data::new())).unwrap();
            prop_assert!(result.valid);
        }

        // Required fields that are missing or empty are always reported
        #[test]
        fn required_missing_or_empty_is_reported(
            rule in rule_strategy(),
            empty in prop_oneof![Just(None), Just(Some(json!(""))), Just(Some(Value::Null))],
        ) {
            let mut rule = rule;
            rule.required = true;
            let key = rule.key.clone();
            let validator = RuleValidator::new(vec![rule]);

            let mut data = Data::new();
            if let Some(value) = empty {
                data.insert(key.clone(), value);
            }

            let result = block_on(validator.validate(&data)).unwrap();
            prop_assert_eq!(result.keys(), vec![key.as_str()]);
        }
    }
}
