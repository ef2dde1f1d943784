#![forbid(unsafe_code)]

//! Deterministic hyphenation with Liang's TeX pattern algorithm.
//!
//! ```text
//! raw patterns → PatternStore (eager or lazy, persistable)
//! word → HyphenationEngine → scores → syllables ← WordCache
//!      → Hyphenator → "ду-ма-та"
//! ```
//!
//! # Usage
//!
//! ```rust
//! use texhyph::{HyphenationEngine, PatternStore, StoreOptions};
//!
//! let store = PatternStore::from_patterns(["a1", "e1", "2n1d"], StoreOptions::lazy())?;
//! let engine = HyphenationEngine::new(store);
//! assert_eq!(engine.syllables("banane"), vec!["ba", "na", "ne"]);
//! # Ok::<(), texhyph::HyphenError>(())
//! ```

pub mod bulgarian;
pub mod cache;
pub mod engine;
pub mod error;
mod fold;
pub mod hyphenator;
pub mod pattern;
pub mod source;
pub mod store;

pub use cache::{CachePolicy, CacheStats, WordCache};
pub use engine::{EngineConfig, HyphenationEngine, is_display_token};
pub use error::{HyphenError, Result};
pub use hyphenator::Hyphenator;
pub use pattern::Pattern;
pub use source::{SourceOptions, pattern_lines};
pub use store::{LoadMode, PatternStore, StoreOptions};
