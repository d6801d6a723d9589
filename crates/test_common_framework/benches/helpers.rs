use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use test_common_framework::chunk::chunk_list;
use test_common_framework::flatten::flatten_value;
use test_common_framework::nested::get_nested_value;

fn sample_body() -> Value {
    json!({
        "user": {"id": "u1", "profile": {"name": "Ada", "tags": ["a", "b"]}},
        "request": {"action": "go", "params": {"page": 1, "size": 50, "filters": {"active": true}}},
        "meta": {"trace": {"id": "abc", "sampled": false}}
    })
}

fn bench_helpers(c: &mut Criterion) {
    let body = sample_body();
    let items: Vec<u32> = (0..10_000).collect();

    c.bench_function("flatten_value", |b| {
        b.iter(|| flatten_value(black_box(&body)))
    });
    c.bench_function("get_nested_value", |b| {
        b.iter(|| get_nested_value(black_box(&body), "request.params.filters.active", Value::Null))
    });
    c.bench_function("chunk_list_10k_by_64", |b| {
        b.iter(|| chunk_list(black_box(&items), 64))
    });
}

criterion_group!(benches, bench_helpers);
criterion_main!(benches);
