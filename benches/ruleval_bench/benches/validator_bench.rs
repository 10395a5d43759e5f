//! Validator overhead benchmarks
//!
//! Measures a full `validate` call for typical form-sized rule sets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ruleval::{Data, Rule, RuleType, RuleValidator, Test};
use serde_json::json;

fn signup_rules() -> Vec<Rule> {
    vec![
        Rule::new("name", "name required").required(),
        Rule::new("name", "invalid name").of_type(RuleType::ChineseName),
        Rule::new("phone", "phone required").required(),
        Rule::new("phone", "invalid phone").of_type(RuleType::ChineseMobilePhoneNumber),
        Rule::new("email", "invalid email").of_type(RuleType::Email),
        Rule::new("age", "invalid age").of_type(RuleType::Integer),
        Rule::new("id", "invalid id").of_type(RuleType::ChineseIdCard),
        Rule::new("code", "invalid code").test(Test::pattern(r"^[A-Z]{2}\d{4}$").unwrap()),
    ]
}

fn valid_signup() -> Data {
    serde_json::from_value(json!({
        "name": "张三",
        "phone": "13812345678",
        "email": "zhang@example.com",
        "age": "30",
        "id": "11010519491231002X",
        "code": "AB1234",
    }))
    .unwrap()
}

fn invalid_signup() -> Data {
    serde_json::from_value(json!({
        "name": "",
        "phone": "123",
        "email": "nope",
        "age": "30.5",
        "id": "110105194912310021",
        "code": "ab",
    }))
    .unwrap()
}

/// Benchmark a full validation pass
fn bench_validate(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let validator = RuleValidator::new(signup_rules());
    let mut group = c.benchmark_group("validate");

    for (label, data) in [("valid", valid_signup()), ("invalid", invalid_signup())] {
        group.bench_with_input(BenchmarkId::new("signup", label), &data, |b, data| {
            b.iter(|| runtime.block_on(validator.validate(black_box(data))).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the cost of async custom tests versus sync ones
fn bench_custom_tests(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("custom_tests");
    let data: Data = serde_json::from_value(json!({"a": "x", "b": "y", "c": "z"})).unwrap();

    let sync = RuleValidator::new(
        ["a", "b", "c"].map(|k| Rule::new(k, k).test(Test::from_fn(|v, _| v.is_string()))),
    );
    let asynchronous = RuleValidator::new(["a", "b", "c"].map(|k| {
        Rule::new(k, k).test(Test::from_async(|v, _| async move { v.is_string() }))
    }));

    group.bench_function("sync", |b| {
        b.iter(|| runtime.block_on(sync.validate(black_box(&data))).unwrap())
    });
    group.bench_function("async", |b| {
        b.iter(|| runtime.block_on(asynchronous.validate(black_box(&data))).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_validate, bench_custom_tests);
criterion_main!(benches);
