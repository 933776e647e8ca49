//! Benchmarks for the rule engine
//!
//! - Single-rule checks through the registry
//! - Whole-record validation, passing and failing
//! - The permissive date parser

use std::hint::black_box;

use chrono::{DateTime, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use validation::predicates::parse_any;
use validation::{Validator, validatable};

struct Order {
    reference: String,
    customer_email: String,
    quantity: u32,
    placed: DateTime<Utc>,
}

validatable!(Order {
    reference => "required,len=10,stringContains=ORD",
    customer_email => "required,email",
    quantity => "min=1,max=500",
    placed => "dateAfter=2000-01-01,dateBefore=now",
});

fn order(reference: &str) -> Order {
    Order {
        reference: reference.to_string(),
        customer_email: "buyer@example.com".to_string(),
        quantity: 3,
        placed: Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap(),
    }
}

fn bench_single_rule(c: &mut Criterion) {
    let validator = Validator::new();
    let registry = validator.get();
    let mut group = c.benchmark_group("single_rule");

    group.bench_function("string_contains", |b| {
        b.iter(|| registry.check("stringContains", black_box("ORD-000123"), "ORD"))
    });

    group.bench_function("date_after_now", |b| {
        let now = Utc::now();
        b.iter(|| registry.check("dateAfter", black_box(now), "now"))
    });

    group.bench_function("date_before_fixed", |b| {
        let now = Utc::now();
        b.iter(|| registry.check("dateBefore", black_box(now), "2030-01-01"))
    });

    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let validator = Validator::new();
    let valid = order("ORD-000123");
    let invalid = order("X");
    let mut group = c.benchmark_group("record");

    group.bench_function("valid", |b| {
        b.iter(|| validator.validate(black_box(&valid)))
    });

    group.bench_function("invalid", |b| {
        b.iter(|| validator.validate(black_box(&invalid)))
    });

    group.finish();
}

fn bench_parse_any(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_any");

    for input in ["2030-01-01", "2030-01-01T10:00:00Z", "January 2, 2030", "garbage"] {
        group.bench_function(input, |b| b.iter(|| parse_any(black_box(input))));
    }

    group.finish();
}

criterion_group!(benches, bench_single_rule, bench_record, bench_parse_any);
criterion_main!(benches);
