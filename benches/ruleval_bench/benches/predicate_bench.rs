//! Predicate benchmarks
//!
//! Measures the built-in format predicates on matching and non-matching input.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ruleval_predicates::{
    is_chinese_id_card, is_chinese_mobile_phone, is_email, is_numeric, is_url, stringify,
};
use serde_json::json;

fn bench_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicates");

    let numeric = json!("12345.678");
    group.bench_function("numeric", |b| b.iter(|| is_numeric(black_box(&numeric))));

    let phone = json!("13812345678");
    group.bench_function("mobile_phone", |b| {
        b.iter(|| is_chinese_mobile_phone(black_box(&phone)))
    });

    let id = json!("11010519491231002X");
    group.bench_function("id_card", |b| b.iter(|| is_chinese_id_card(black_box(&id))));

    let email = json!("user.name+tag@domain.co.uk");
    group.bench_function("email", |b| b.iter(|| is_email(black_box(&email))));

    let url = json!("https://example.com/path?query=1");
    group.bench_function("url", |b| b.iter(|| is_url(black_box(&url))));

    group.finish();
}

fn bench_stringify(c: &mut Criterion) {
    let mut group = c.benchmark_group("stringify");

    let string = json!("borrowed text");
    group.bench_function("string", |b| b.iter(|| stringify(black_box(&string)).len()));

    let number = json!(1234567.5);
    group.bench_function("number", |b| b.iter(|| stringify(black_box(&number)).len()));

    group.finish();
}

criterion_group!(benches, bench_predicates, bench_stringify);
criterion_main!(benches);
