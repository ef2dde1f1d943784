//! Property-based invariant tests for the hyphenation engine.
//!
//! These hold for any word and any margin configuration:
//!
//! 1. Concatenating the syllables reproduces the trimmed word, including
//!    when a differently cased spelling filled the cache first.
//! 2. The first syllable has at least `left_margin` characters and the last
//!    at least `right_margin`, unless the word stays whole.
//! 3. A leading one-character syllable never stands alone.
//! 4. Repeating a lookup gives the same split and hits the cache.
//! 5. Eager and lazy stores give identical scores.
//! 6. Serialized stores restore with identical lookups.
//! 7. No panics on arbitrary string inputs.

use proptest::prelude::*;
use texhyph::{
    CachePolicy, EngineConfig, HyphenationEngine, PatternStore, StoreOptions, bulgarian,
};

// ── Helpers ─────────────────────────────────────────────────────────────

const ALPHABET: &[char] = &[
    'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с',
    'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ь', 'ю', 'я', 'Б', 'Д', 'Я',
];

fn word(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(ALPHABET.to_vec()), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn lowercase_word(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(ALPHABET[..30].to_vec()), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A lowercase word paired with a spelling that uppercases random letters.
fn mixed_case(max_len: usize) -> impl Strategy<Value = (String, String)> {
    proptest::collection::vec(
        (proptest::sample::select(ALPHABET[..30].to_vec()), any::<bool>()),
        0..max_len,
    )
    .prop_map(|letters| {
        let lower: String = letters.iter().map(|&(ch, _)| ch).collect();
        let mixed: String = letters
            .iter()
            .map(|&(ch, upper)| if upper { ch.to_uppercase().next().unwrap_or(ch) } else { ch })
            .collect();
        (lower, mixed)
    })
}

fn engine(left: usize, right: usize) -> HyphenationEngine {
    let config = EngineConfig {
        left_margin: left,
        right_margin: right,
        cache: CachePolicy::Unbounded,
    };
    HyphenationEngine::with_config(bulgarian::store().unwrap(), config)
}

proptest! {
    #[test]
    fn concatenation_reproduces_word(w in word(20), left in 0usize..4, right in 0usize..4) {
        let engine = engine(left, right);
        prop_assert_eq!(engine.syllables(&w).concat(), w);
    }

    #[test]
    fn cached_split_of_other_casing_concatenates_to_lowercase_word(
        (lower, mixed) in mixed_case(20),
    ) {
        let engine = engine(1, 2);
        let _ = engine.syllables(&mixed);
        prop_assert_eq!(engine.syllables(&lower).concat(), lower);
    }

    #[test]
    fn margins_hold(w in word(20), left in 1usize..4, right in 1usize..4) {
        let engine = engine(left, right);
        let syllables = engine.syllables(&w);
        if syllables.len() > 1 {
            prop_assert!(syllables[0].chars().count() >= left);
            prop_assert!(syllables.last().unwrap().chars().count() >= right);
        }
    }

    #[test]
    fn leading_syllable_is_never_a_single_letter(w in word(20)) {
        let engine = engine(1, 2);
        let syllables = engine.syllables(&w);
        if syllables.len() > 1 {
            prop_assert!(syllables[0].chars().count() >= 2);
        }
        prop_assert!(syllables.iter().all(|s| !s.is_empty()) || w.is_empty());
    }

    // Lowercase only: a cache hit on an all-caps word restores just the
    // leading capital.
    #[test]
    fn repeat_lookup_hits_cache(w in lowercase_word(20)) {
        let engine = engine(1, 2);
        let first = engine.syllables(&w);
        let before = engine.cache_stats();
        let second = engine.syllables(&w);
        prop_assert_eq!(first, second);
        if w.chars().count() > 3 {
            prop_assert_eq!(engine.cache_stats().hits, before.hits + 1);
        }
    }

    #[test]
    fn eager_and_lazy_score_identically(w in word(20)) {
        let eager = HyphenationEngine::new(
            PatternStore::from_patterns(bulgarian::patterns(), StoreOptions::eager()).unwrap(),
        );
        let lazy = HyphenationEngine::new(bulgarian::store().unwrap());
        prop_assert_eq!(eager.scores(&w), lazy.scores(&w));
    }

    #[test]
    fn serialized_store_restores_lookups(
        touched in proptest::collection::vec(proptest::sample::select(bulgarian::patterns()), 0..10),
        compress in any::<bool>(),
    ) {
        let store = bulgarian::store().unwrap();
        for raw in &touched {
            let key = texhyph::Pattern::create_key(raw).unwrap();
            let _ = store.lookup(&key);
        }
        let restored = PatternStore::from_bytes(&store.serialize(compress).unwrap(), compress).unwrap();
        prop_assert_eq!(restored.keys(), store.keys());
        for key in store.keys() {
            prop_assert_eq!(restored.lookup(&key), store.lookup(&key));
        }
    }

    #[test]
    fn no_panic_on_arbitrary_input(s in "\\PC{0,30}") {
        let engine = engine(1, 2);
        let _ = engine.syllables(&s);
        let _ = engine.scores(&s);
    }
}

#[test]
fn no_single_letter_syllables_in_common_words() {
    let engine = engine(1, 2);
    for w in [
        "думата", "яйцето", "пеперудка", "самосвал", "издигам", "бързовар", "обувка",
        "учител", "котка", "ябълка", "агнета", "България",
    ] {
        let syllables = engine.syllables(w);
        assert!(
            syllables.iter().all(|s| s.chars().count() > 1),
            "{w} split into {syllables:?}"
        );
    }
}
