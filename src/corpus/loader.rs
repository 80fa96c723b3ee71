//! Corpus loading utilities
//!
//! Normalizes text to lowercase ASCII words and feeds it into a trie.

use super::SAMPLE;
use crate::config::TrieConfig;
use crate::core::PredictiveTrie;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Split raw text into normalized words
///
/// Lowercases, treats hyphens as spaces, drops every character that is not
/// an ASCII letter or whitespace, then splits on whitespace.
///
/// # Examples
/// ```
/// use trie_next::corpus::normalize;
///
/// let words = normalize("Over-scrupulous, surely. Mr. Bennet!");
/// assert_eq!(words, vec!["over", "scrupulous", "surely", "mr", "bennet"]);
/// ```
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            if c == '-' || c.is_whitespace() {
                Some(' ')
            } else if c.is_ascii_lowercase() {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Load and normalize every word of a text file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or is not valid UTF-8.
///
/// # Examples
/// ```no_run
/// use trie_next::corpus::load_from_file;
///
/// let words = load_from_file("PrideAndPrejudice.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(normalize(&content))
}

/// Normalized words of the embedded sample corpus
#[must_use]
pub fn sample_words() -> Vec<String> {
    SAMPLE.iter().flat_map(|line| normalize(line)).collect()
}

/// Insert every word into a fresh trie
#[must_use]
pub fn build_trie<S: AsRef<str>>(words: &[S], config: TrieConfig) -> PredictiveTrie {
    let start = Instant::now();
    let mut trie = PredictiveTrie::with_config(config);
    trie.extend(words);

    info!(
        words = words.len(),
        nodes = trie.node_count(),
        elapsed_ms = start.elapsed().as_millis(),
        "built trie"
    );
    trie
}
