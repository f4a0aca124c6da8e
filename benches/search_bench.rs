//! Search pipeline benchmarks.
//!
//! Measures predicate compilation on its own, evaluation over synthetic
//! catalogs, and the full query (compile + evaluate + sort + truncate) the
//! TUI runs on every interaction.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `compile` | Pure compilation cost by term count |
//! | `evaluate` | Smart-phrase evaluation over 10k rows, 1/4/8 terms |
//! | `evaluate/pattern` | Regex-mode evaluation over 10k rows |
//! | `query/scaling` | Full pipeline as the catalog grows 1k → 100k |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench search_bench
//! open target/criterion/report/index.html
//! ```

use bulletin_catalog::Catalog;
use bulletin_core::predicate::{compile, Evaluator};
use bulletin_core::types::{CourseRow, Matching, SearchConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const SUBJECTS: &[&str] = &["CS", "INFO", "MATH", "PHIL", "HIST", "ECON", "MUSIC", "LAW"];
const TOPICS: &[&str] = &[
    "Machine Learning",
    "Deep Learning Systems",
    "Distributed Computing",
    "Probability Theory",
    "Moral Philosophy",
    "Early Modern History",
    "Market Design",
    "Sound Synthesis",
];

/// Deterministic synthetic catalog — no RNG so runs are comparable.
fn synthetic_rows(n: usize) -> Vec<CourseRow> {
    (0..n)
        .map(|i| CourseRow {
            subject: SUBJECTS[i % SUBJECTS.len()].to_string(),
            number: format!("{}", 1000 + (i * 37) % 9000),
            title: format!("{} {}", TOPICS[i % TOPICS.len()], i / TOPICS.len()),
            college: (if i % 3 == 0 { "Engineering" } else { "Arts and Sciences" }).to_string(),
            level: (if i % 5 == 0 { "GR" } else { "UG" }).to_string(),
            modality: None,
            description: format!(
                "Survey of {} with applications; weekly projects and a final exam.",
                TOPICS[(i + 3) % TOPICS.len()].to_lowercase()
            ),
        })
        .collect()
}

fn config_with_terms(terms: &str) -> SearchConfig {
    let mut config = SearchConfig::default();
    config.terms.add_terms(terms);
    config
}

// ---------------------------------------------------------------------------
// Compilation only
// ---------------------------------------------------------------------------

fn compile_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for terms in [1usize, 4, 8] {
        let raw = (0..terms)
            .map(|i| format!("term number {i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let config = config_with_terms(&raw);
        group.bench_with_input(BenchmarkId::from_parameter(terms), &config, |b, config| {
            b.iter(|| compile(black_box(config)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Evaluation over a fixed-size catalog
// ---------------------------------------------------------------------------

fn evaluate_bench(c: &mut Criterion) {
    let rows = synthetic_rows(10_000);

    let mut group = c.benchmark_group("evaluate");
    group.throughput(Throughput::Elements(rows.len() as u64));

    for terms in [1usize, 4, 8] {
        let raw = (0..terms)
            .map(|i| TOPICS[i % TOPICS.len()].to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let predicate = compile(&config_with_terms(&raw));
        group.bench_with_input(
            BenchmarkId::new("smart_10k", terms),
            &predicate,
            |b, predicate| {
                b.iter(|| {
                    let evaluator = Evaluator::new(predicate).unwrap();
                    rows.iter().filter(|r| evaluator.matches(r)).count()
                })
            },
        );
    }

    // Regex mode: one pre-compiled pattern across the same rows
    let mut config = config_with_terms("deep.*learn");
    config.matching = Matching::Pattern;
    let predicate = compile(&config);
    group.bench_function("pattern_10k", |b| {
        b.iter(|| {
            let evaluator = Evaluator::new(&predicate).unwrap();
            rows.iter().filter(|r| evaluator.matches(r)).count()
        })
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Full query pipeline, catalog size axis
// ---------------------------------------------------------------------------

fn query_scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("query/scaling");

    for size in [1_000usize, 10_000, 100_000] {
        let catalog = Catalog::from_rows(synthetic_rows(size));
        let config = config_with_terms("machine learning");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(catalog, config),
            |b, (catalog, config)| {
                b.iter(|| black_box(catalog.query(config).unwrap()).len())
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, compile_bench, evaluate_bench, query_scaling_bench);
criterion_main!(search_benches);
