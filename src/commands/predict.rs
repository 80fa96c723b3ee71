//! Prefix prediction command
//!
//! Gathers every prediction the trie can make for one prefix.

use crate::core::{PredictiveTrie, ScoredOption};
use rand::Rng;

/// Everything known about a prefix
pub struct PredictionReport {
    pub prefix: String,
    pub is_word: bool,
    pub frequency: u64,
    pub traffic: u64,
    pub next_char: Option<char>,
    pub next_word: Option<String>,
    pub top_letters: Vec<ScoredOption>,
    pub alternative_letters: Vec<ScoredOption>,
    pub top_words: Vec<ScoredOption>,
    pub alternative_words: Vec<ScoredOption>,
    pub most_frequent: Vec<String>,
}

/// Collect predictions for `prefix`, listing up to `limit` options per category
///
/// # Errors
///
/// Returns an error if the prefix is empty after trimming.
pub fn predict_prefix<R: Rng + ?Sized>(
    trie: &PredictiveTrie,
    prefix: &str,
    limit: usize,
    rng: &mut R,
) -> Result<PredictionReport, String> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Err("Prefix must not be empty".to_string());
    }

    Ok(PredictionReport {
        is_word: trie.contains(&prefix),
        frequency: trie.frequency(&prefix),
        traffic: trie.count_words_with_prefix(&prefix),
        next_char: trie.most_likely_next_char(&prefix),
        next_word: trie.most_likely_next_word(&prefix).map(str::to_string),
        top_letters: trie.ranked_next_letters(&prefix, limit),
        alternative_letters: trie.alternative_next_letters(&prefix, limit, rng),
        top_words: trie.ranked_next_words(&prefix, limit),
        alternative_words: trie.alternative_next_words(&prefix, limit, rng),
        most_frequent: trie.top_k_words(&prefix, limit),
        prefix,
    })
}
