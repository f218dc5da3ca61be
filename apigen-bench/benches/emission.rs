//! Rendering benchmarks.

use apigen_bench::documents::synthetic_document;
use apigen_codegen::{Generator, OutputFormat};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn benchmark_render(c: &mut Criterion) {
    let generator = Generator::new();
    let document = synthetic_document(100, 14);
    let file = generator
        .resolve(&document)
        .expect("Synthetic document failed to resolve");

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(file.message_types.len() as u64));

    group.bench_function("idl", |b| {
        b.iter(|| generator.render(black_box(&file), "v1", OutputFormat::Idl))
    });

    group.bench_function("source", |b| {
        b.iter(|| generator.render(black_box(&file), "v1", OutputFormat::Source))
    });

    group.finish();
}

fn benchmark_generate(c: &mut Criterion) {
    let generator = Generator::new();
    let document = synthetic_document(50, 14);

    c.bench_function("generate_idl_end_to_end", |b| {
        b.iter(|| generator.generate(black_box(&document), OutputFormat::Idl))
    });
}

criterion_group!(benches, benchmark_render, benchmark_generate);
criterion_main!(benches);
