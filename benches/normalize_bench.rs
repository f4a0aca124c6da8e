//! Term normalizer benchmarks.
//!
//! Normalization runs on every title and description for every phrase
//! predicate on every query, so it dominates smart-mode search cost.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `normalize/clean` | Already-normalized input (the idempotent fast path) |
//! | `normalize/messy` | Punctuation-heavy registrar text |
//! | `normalize/length` | Throughput as input length grows |
//! | `containment` | Padded whole-token phrase containment |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalize_bench
//! open target/criterion/report/index.html
//! ```

use bulletin_core::normalize::{normalize_phrase, phrase_contains};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const CLEAN: &str = "machine learning for intelligent systems";
const MESSY: &str = "Machine-Learning (CS 4780): regression, kernels & deep-learning basics!";

fn normalize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("clean", |b| {
        b.iter(|| normalize_phrase(black_box(CLEAN)))
    });

    group.bench_function("messy", |b| {
        b.iter(|| normalize_phrase(black_box(MESSY)))
    });

    group.finish();
}

fn length_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize/length");

    for words in [8usize, 64, 512] {
        let text = (0..words)
            .map(|i| format!("Word-{i}, punctuated!"))
            .collect::<Vec<_>>()
            .join(" ");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &text, |b, text| {
            b.iter(|| normalize_phrase(black_box(text)))
        });
    }

    group.finish();
}

fn containment_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("containment");

    let haystack = normalize_phrase(&format!(
        "{} advanced topics in deep learning systems and applications",
        MESSY
    ));

    group.bench_function("hit", |b| {
        b.iter(|| phrase_contains(black_box(&haystack), black_box("deep learning")))
    });
    group.bench_function("miss", |b| {
        b.iter(|| phrase_contains(black_box(&haystack), black_box("quantum chromodynamics")))
    });

    group.finish();
}

criterion_group!(normalize_benches, normalize_bench, length_bench, containment_bench);
criterion_main!(normalize_benches);
