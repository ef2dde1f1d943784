#![forbid(unsafe_code)]

//! Memoized syllable splits.
//!
//! Entries are keyed by the lowercased word and store every syllable in
//! lowercase, so a split is never served with another caller's casing. On a
//! hit the first syllable is capitalized again when the
//! queried word starts with a different character than the cached syllable.
//! Only that one leading character is compared, so an all-caps query gets
//! back a split with just its first letter uppercased.
//!
//! The default policy never evicts: the cache grows by one entry per
//! distinct word for the life of its engine. Use
//! [`CachePolicy::Bounded`] to cap it with least-recently-used eviction.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::fold;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Keep every word forever.
    #[default]
    Unbounded,
    /// Keep at most this many words, evicting the least recently used.
    Bounded(NonZeroUsize),
    /// Never store anything.
    Disabled,
}

/// Counters reported by [`WordCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, `0.0` before any lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

enum Entries {
    Unbounded(FxHashMap<String, Vec<String>>),
    Bounded(LruCache<String, Vec<String>>),
    Disabled,
}

impl Entries {
    fn len(&self) -> usize {
        match self {
            Self::Unbounded(map) => map.len(),
            Self::Bounded(lru) => lru.len(),
            Self::Disabled => 0,
        }
    }
}

struct Inner {
    entries: Entries,
    hits: u64,
    misses: u64,
}

/// Case-insensitive word → syllables cache. Safe to share across threads.
pub struct WordCache {
    inner: Mutex<Inner>,
    policy: CachePolicy,
}

impl fmt::Debug for WordCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordCache")
            .field("policy", &self.policy)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Default for WordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl WordCache {
    /// An unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::Unbounded)
    }

    #[must_use]
    pub fn with_policy(policy: CachePolicy) -> Self {
        let entries = match policy {
            CachePolicy::Unbounded => Entries::Unbounded(FxHashMap::default()),
            CachePolicy::Bounded(capacity) => Entries::Bounded(LruCache::new(capacity)),
            CachePolicy::Disabled => Entries::Disabled,
        };
        Self {
            inner: Mutex::new(Inner {
                entries,
                hits: 0,
                misses: 0,
            }),
            policy,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Cached syllables of `word`, recapitalized to match its first character.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<Vec<String>> {
        let key = fold::lower(word);
        let cached = {
            let mut inner = self.lock();
            let cached = match &mut inner.entries {
                Entries::Unbounded(map) => map.get(&key).cloned(),
                Entries::Bounded(lru) => lru.get(&key).cloned(),
                Entries::Disabled => None,
            };
            if cached.is_some() {
                inner.hits += 1;
            } else {
                inner.misses += 1;
            }
            cached
        };

        let mut syllables = cached?;
        tracing::trace!(word, "word cache hit");
        if let Some(first) = syllables.first_mut()
            && word.chars().next() != first.chars().next()
        {
            *first = fold::capitalize(first);
        }
        Some(syllables)
    }

    /// Store the split of `word` unless one is already cached.
    ///
    /// Returns `true` when the entry was inserted. The first insertion for a
    /// lowercased key wins; later calls leave it untouched.
    pub fn add(&self, word: &str, syllables: &[String]) -> bool {
        if syllables.is_empty() {
            return false;
        }
        let key = fold::lower(word);

        let mut inner = self.lock();
        let present = match &inner.entries {
            Entries::Unbounded(map) => map.contains_key(&key),
            Entries::Bounded(lru) => lru.contains(&key),
            Entries::Disabled => return false,
        };
        if present {
            return false;
        }

        let stored: Vec<String> = syllables.iter().map(|s| fold::lower(s)).collect();

        match &mut inner.entries {
            Entries::Unbounded(map) => {
                map.insert(key, stored);
            }
            Entries::Bounded(lru) => {
                if let Some((evicted, _)) = lru.push(key, stored) {
                    tracing::trace!(evicted = %evicted, "word cache eviction");
                }
            }
            Entries::Disabled => {}
        }
        true
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let key = fold::lower(word);
        match &self.lock().entries {
            Entries::Unbounded(map) => map.contains_key(&key),
            Entries::Bounded(lru) => lru.contains(&key),
            Entries::Disabled => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
        }
    }
}
