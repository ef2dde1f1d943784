//! A single engine shared across threads.
//!
//! Every thread starts at once against a fresh lazy store, so the first
//! lookups race to materialize the same entries and fill the same cache.

use std::sync::{Arc, Barrier};
use std::thread;

use texhyph::{HyphenationEngine, Hyphenator, LoadMode, PatternStore, StoreOptions, bulgarian};

const THREADS: usize = 8;

const WORDS: &[&str] = &[
    "думата",
    "яйцето",
    "пеперудка",
    "самосвал",
    "издигам",
    "бързовар",
    "обувка",
    "учител",
    "котка",
    "ябълка",
    "агнета",
];

fn expected() -> Vec<Vec<String>> {
    let engine = HyphenationEngine::new(
        PatternStore::from_patterns(bulgarian::patterns(), StoreOptions::eager()).unwrap(),
    );
    WORDS.iter().map(|w| engine.syllables(w)).collect()
}

#[test]
fn shared_lazy_engine_matches_single_threaded_results() {
    let expected = expected();
    let engine = Arc::new(HyphenationEngine::new(bulgarian::store().unwrap()));
    assert_eq!(engine.store().mode(), LoadMode::Lazy);
    assert_eq!(engine.store().parsed_count(), 0);

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Rotate so threads hit different words first.
                (0..WORDS.len())
                    .map(|i| {
                        let idx = (i + t) % WORDS.len();
                        (idx, engine.syllables(WORDS[idx]))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (idx, syllables) in handle.join().expect("worker panicked") {
            assert_eq!(syllables, expected[idx], "word {}", WORDS[idx]);
        }
    }

    let stats = engine.cache_stats();
    assert_eq!(stats.entries, WORDS.len());
    assert_eq!(stats.hits + stats.misses, (THREADS * WORDS.len()) as u64);
    assert!(stats.misses >= WORDS.len() as u64);
    assert!(engine.store().parsed_count() > 0);
}

#[test]
fn shared_hyphenator_formats_identically() {
    let hyph = Arc::new(Hyphenator::bulgarian().unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let hyph = Arc::clone(&hyph);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                WORDS.iter().map(|w| hyph.hyphenate(w)).collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<String>> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0][0], "ду-ма-та");
}

#[test]
fn concurrent_materialize_all_reports_no_evictions() {
    let store = Arc::new(bulgarian::store().unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.materialize_all()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker panicked"), 0);
    }
    assert_eq!(store.parsed_count(), store.len());
}
