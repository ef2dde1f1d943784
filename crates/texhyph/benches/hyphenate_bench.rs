//! Benchmarks for store loading and word hyphenation.
//!
//! Run with: cargo bench -p texhyph

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use texhyph::{CachePolicy, HyphenationEngine, PatternStore, StoreOptions, bulgarian};

const WORDS: &[&str] = &[
    "думата",
    "яйцето",
    "пеперудка",
    "самосвал",
    "издигам",
    "бързовар",
    "обувка",
    "учител",
    "България",
    "ябълка",
];

// ============================================================================
// Store construction
// ============================================================================

fn bench_store_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/load");
    let patterns = bulgarian::patterns();

    group.bench_function("eager", |b| {
        b.iter(|| black_box(PatternStore::from_patterns(&patterns, StoreOptions::eager())))
    });
    group.bench_function("lazy", |b| {
        b.iter(|| black_box(PatternStore::from_patterns(&patterns, StoreOptions::lazy())))
    });

    for compress in [false, true] {
        let bytes = match bulgarian::store().and_then(|store| store.serialize(compress)) {
            Ok(bytes) => bytes,
            Err(err) => panic!("serialize bundled store: {err}"),
        };
        group.bench_with_input(
            BenchmarkId::new("from_bytes", if compress { "zlib" } else { "plain" }),
            &bytes,
            |b, bytes| b.iter(|| black_box(PatternStore::from_bytes(bytes, compress))),
        );
    }

    group.finish();
}

// ============================================================================
// Hyphenation
// ============================================================================

fn engine(policy: CachePolicy) -> HyphenationEngine {
    match bulgarian::store() {
        Ok(store) => HyphenationEngine::new(store).with_cache(policy),
        Err(err) => panic!("bundled store: {err}"),
    }
}

fn bench_syllables(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/syllables");

    let uncached = engine(CachePolicy::Disabled);
    group.bench_function("uncached", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(uncached.syllables(black_box(word)));
            }
        })
    });

    let cached = engine(CachePolicy::Unbounded);
    group.bench_function("cached", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(cached.syllables(black_box(word)));
            }
        })
    });

    group.finish();
}

fn bench_scores_by_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/scores");
    let engine = engine(CachePolicy::Disabled);

    for len in [8usize, 32, 128] {
        let word: String = "пеперудка".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &word, |b, word| {
            b.iter(|| black_box(engine.scores(word)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_store_load,
    bench_syllables,
    bench_scores_by_length
);
criterion_main!(benches);
