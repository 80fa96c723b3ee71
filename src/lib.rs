//! Trie Next
//!
//! A predictive character trie: every node caches its most likely next
//! character and most frequent completion, so single-best predictions are
//! answered in time proportional to the prefix length. Deleting a word
//! repairs the caches along its path.
//!
//! # Quick Start
//!
//! ```rust
//! use trie_next::core::PredictiveTrie;
//!
//! let mut trie: PredictiveTrie = ["the", "the", "there", "them"].into_iter().collect();
//!
//! assert_eq!(trie.most_likely_next_char("th"), Some('e'));
//! assert_eq!(trie.most_likely_next_word("the"), Some("the"));
//!
//! trie.delete("the");
//! trie.delete("the");
//! assert_eq!(trie.most_likely_next_word("the"), Some("them"));
//! ```

// Tunables
pub mod config;

// Core trie and its caches
pub mod core;

// Corpus ingestion
pub mod corpus;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
