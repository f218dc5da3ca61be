//! Parsing and type resolution benchmarks.

use apigen_bench::documents::{synthetic_document, synthetic_json};
use apigen_codegen::Generator;
use apigen_schema::parse_document;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for schemas in [10, 100] {
        let json = synthetic_json(schemas, 14);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(schemas), &json, |b, json| {
            b.iter(|| parse_document(black_box(json)))
        });
    }

    group.finish();
}

fn benchmark_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let generator = Generator::new();

    for schemas in [10, 100, 500] {
        let document = synthetic_document(schemas, 14);
        group.throughput(Throughput::Elements(schemas as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(schemas),
            &document,
            |b, document| b.iter(|| generator.resolve(black_box(document))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_resolve);
criterion_main!(benches);
