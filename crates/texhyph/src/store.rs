#![forbid(unsafe_code)]

//! Pattern store keyed by pattern key.
//!
//! # Load modes
//!
//! - **Eager**: every raw pattern is parsed while the store is built; the
//!   first invalid pattern aborts construction.
//! - **Lazy**: only the key is derived at build time and the raw string is
//!   kept. A pattern is parsed the first time [`PatternStore::lookup`] hits
//!   its key. A pattern that fails to parse is evicted and reported as absent.
//!
//! # Persisted form
//!
//! [`PatternStore::serialize`] encodes the ordered entry list with bincode and
//! optionally zlib-compresses it. Entries are written in whatever state they
//! are in, so a lazy store may persist a mix of raw and parsed entries. The
//! compression flag is not recorded in the bytes; the caller passes the same
//! flag to [`PatternStore::from_bytes`].

use std::borrow::Cow;
use std::collections::hash_map::Entry as MapEntry;
use std::io::{Read, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bincode::Options;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HyphenError, Result};
use crate::pattern::Pattern;

/// Upper bound for encoded and decompressed store sizes.
const MAX_STORE_BYTES: u64 = 256 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Parse every pattern at build time.
    #[default]
    Eager,
    /// Keep raw strings and parse on first lookup.
    Lazy,
}

/// How a store is built from raw pattern strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    pub mode: LoadMode,
    /// Keep keys in ascending order. Only affects serialization order.
    pub sorted: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            mode: LoadMode::Eager,
            sorted: true,
        }
    }
}

impl StoreOptions {
    #[must_use]
    pub fn eager() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lazy() -> Self {
        Self {
            mode: LoadMode::Lazy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Slot {
    Raw(String),
    Parsed(Arc<Pattern>),
}

#[derive(Debug, Default)]
struct Slots {
    /// Keys in serialization order.
    order: Vec<String>,
    entries: FxHashMap<String, Slot>,
}

impl Slots {
    /// Insert unless the key is already present. First occurrence wins.
    fn insert_if_absent(&mut self, key: String, slot: Slot) -> bool {
        match self.entries.entry(key) {
            MapEntry::Occupied(_) => false,
            MapEntry::Vacant(vacant) => {
                self.order.push(vacant.key().clone());
                vacant.insert(slot);
                true
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}

/// Borrowed view written by `serialize`.
#[derive(Serialize)]
struct PersistedRef<'a> {
    entries: Vec<(&'a str, EntryRef<'a>)>,
}

#[derive(Serialize)]
enum EntryRef<'a> {
    Raw(&'a str),
    Parsed(&'a [u32]),
}

/// Owned form read back by `from_bytes`. Must stay layout-compatible with
/// `PersistedRef`.
#[derive(Deserialize)]
struct PersistedStore {
    entries: Vec<(String, PersistedEntry)>,
}

#[derive(Deserialize)]
enum PersistedEntry {
    Raw(String),
    Parsed(Vec<u32>),
}

fn codec() -> impl Options {
    bincode::options().with_limit(MAX_STORE_BYTES)
}

// ---------------------------------------------------------------------------
// PatternStore
// ---------------------------------------------------------------------------

/// All patterns of one language, keyed by pattern key.
///
/// Read-only after construction apart from lazy materialization, which
/// happens under the store's write lock and never changes what a lookup
/// returns for a key once it has been parsed. Safe to share across threads.
#[derive(Debug)]
pub struct PatternStore {
    slots: RwLock<Slots>,
    mode: LoadMode,
    max_key_chars: usize,
}

impl PatternStore {
    /// Build a store from raw pattern strings, in order.
    ///
    /// Fails with [`HyphenError::EmptyPatternSet`] when `patterns` is empty.
    /// In eager mode an invalid pattern fails with
    /// [`HyphenError::InvalidPattern`]; in lazy mode only
    /// [`HyphenError::EmptyKey`] is detected up front.
    pub fn from_patterns<I, S>(patterns: I, options: StoreOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = Slots::default();
        let mut seen = 0usize;
        let mut duplicates = 0usize;

        for raw in patterns {
            let raw = raw.as_ref().trim();
            seen += 1;

            let (key, slot) = match options.mode {
                LoadMode::Eager => {
                    let pattern = Pattern::parse(raw)?;
                    (pattern.key().to_string(), Slot::Parsed(Arc::new(pattern)))
                }
                LoadMode::Lazy => (Pattern::create_key(raw)?, Slot::Raw(raw.to_string())),
            };

            if !slots.insert_if_absent(key, slot) {
                duplicates += 1;
            }
        }

        if seen == 0 {
            return Err(HyphenError::EmptyPatternSet);
        }
        if options.sorted {
            slots.order.sort_unstable();
        }

        tracing::debug!(
            patterns = seen,
            keys = slots.order.len(),
            duplicates,
            mode = ?options.mode,
            sorted = options.sorted,
            "pattern store built"
        );

        Ok(Self::from_slots(slots, options.mode))
    }

    /// Restore a store from bytes produced by [`PatternStore::serialize`].
    ///
    /// `compressed` must match the flag used when serializing. Any
    /// decompression, decoding, or structural failure is reported as
    /// [`HyphenError::CorruptStore`].
    pub fn from_bytes(bytes: &[u8], compressed: bool) -> Result<Self> {
        let encoded: Cow<'_, [u8]> = if compressed {
            let mut out = Vec::new();
            ZlibDecoder::new(bytes)
                .take(MAX_STORE_BYTES)
                .read_to_end(&mut out)
                .map_err(|e| HyphenError::corrupt(format!("decompression failed: {e}")))?;
            Cow::Owned(out)
        } else {
            Cow::Borrowed(bytes)
        };

        let persisted: PersistedStore = codec()
            .deserialize(&encoded)
            .map_err(|e| HyphenError::corrupt(format!("decoding failed: {e}")))?;

        if persisted.entries.is_empty() {
            return Err(HyphenError::corrupt("store holds no patterns"));
        }

        let mut slots = Slots::default();
        let mut mode = LoadMode::Eager;
        for (key, entry) in persisted.entries {
            let slot = match entry {
                PersistedEntry::Raw(raw) => {
                    if Pattern::create_key(&raw).ok().as_deref() != Some(key.as_str()) {
                        return Err(HyphenError::corrupt(format!(
                            "raw pattern \u{201c}{raw}\u{201d} does not belong to key \u{201c}{key}\u{201d}"
                        )));
                    }
                    mode = LoadMode::Lazy;
                    Slot::Raw(raw)
                }
                PersistedEntry::Parsed(values) => {
                    let pattern = Pattern::from_parts(key.clone(), values).ok_or_else(|| {
                        HyphenError::corrupt(format!("malformed pattern for key \u{201c}{key}\u{201d}"))
                    })?;
                    Slot::Parsed(Arc::new(pattern))
                }
            };

            let duplicate = key.clone();
            if !slots.insert_if_absent(key, slot) {
                return Err(HyphenError::corrupt(format!(
                    "duplicate key \u{201c}{duplicate}\u{201d}"
                )));
            }
        }

        tracing::debug!(
            keys = slots.order.len(),
            compressed,
            mode = ?mode,
            "pattern store restored"
        );

        Ok(Self::from_slots(slots, mode))
    }

    fn from_slots(slots: Slots, mode: LoadMode) -> Self {
        let max_key_chars = slots
            .order
            .iter()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            slots: RwLock::new(slots),
            mode,
            max_key_chars,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Slots> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slots> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Find the pattern stored under `key`.
    ///
    /// A raw entry is parsed on first access and the parsed pattern replaces
    /// it. If parsing fails the entry is removed and `None` is returned, now
    /// and for every later call.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Arc<Pattern>> {
        {
            let slots = self.read();
            if let Slot::Parsed(pattern) = slots.entries.get(key)? {
                return Some(Arc::clone(pattern));
            }
        }
        self.materialize(key)
    }

    fn materialize(&self, key: &str) -> Option<Arc<Pattern>> {
        let mut slots = self.write();
        // Another caller may have won the race between the two locks.
        let raw = match slots.entries.get(key)? {
            Slot::Parsed(pattern) => return Some(Arc::clone(pattern)),
            Slot::Raw(raw) => raw.clone(),
        };

        match Pattern::parse(&raw) {
            Ok(pattern) => {
                let pattern = Arc::new(pattern);
                if let Some(slot) = slots.entries.get_mut(key) {
                    *slot = Slot::Parsed(Arc::clone(&pattern));
                }
                Some(pattern)
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "evicting unparsable pattern");
                slots.remove(key);
                None
            }
        }
    }

    /// Serialize the store, compressing with zlib when `compress` is set.
    pub fn serialize(&self, compress: bool) -> Result<Vec<u8>> {
        let slots = self.read();
        let persisted = PersistedRef {
            entries: slots
                .order
                .iter()
                .filter_map(|key| {
                    let entry = match slots.entries.get(key)? {
                        Slot::Raw(raw) => EntryRef::Raw(raw),
                        Slot::Parsed(pattern) => EntryRef::Parsed(pattern.values()),
                    };
                    Some((key.as_str(), entry))
                })
                .collect(),
        };

        let encoded = codec()
            .serialize(&persisted)
            .map_err(HyphenError::serialization)?;
        if !compress {
            return Ok(encoded);
        }

        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(encoded.len() / 2),
            Compression::default(),
        );
        encoder
            .write_all(&encoded)
            .map_err(HyphenError::serialization)?;
        encoder.finish().map_err(HyphenError::serialization)
    }

    /// Parse every remaining raw entry. Returns how many were evicted.
    pub fn materialize_all(&self) -> usize {
        let keys = self.keys();
        let evicted = keys.iter().filter(|key| self.lookup(key).is_none()).count();
        if evicted > 0 {
            tracing::debug!(evicted, "materialized lazy store");
        }
        evicted
    }

    /// Mode the store was built in. Restored stores report `Lazy` when they
    /// still hold raw entries.
    #[must_use]
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().entries.contains_key(key)
    }

    /// Keys in serialization order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.read().order.clone()
    }

    /// Character length of the longest key. No substring longer than this
    /// can match.
    #[must_use]
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    /// Number of entries already held in parsed form.
    #[must_use]
    pub fn parsed_count(&self) -> usize {
        self.read()
            .entries
            .values()
            .filter(|slot| matches!(slot, Slot::Parsed(_)))
            .count()
    }
}
