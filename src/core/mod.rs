//! Predictive trie core
//!
//! The trie, its per-node prediction caches, the short-prefix accelerator and
//! every query over them. Nothing here performs I/O or normalizes text: callers
//! hand in words exactly as they should be stored.

mod accelerator;
mod diagnostics;
mod node;
mod query;
mod ranking;
mod trie;

pub use accelerator::{CacheEntry, PrefixCache};
pub use diagnostics::{CacheViolation, StructureEntry, TrieStats};
pub use node::{Node, NodeId};
pub use ranking::ScoredOption;
pub use trie::PredictiveTrie;
