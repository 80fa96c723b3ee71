//! Benchmark command
//!
//! Times corpus ingestion, cached versus scanned predictions, and delete churn.

use crate::config::TrieConfig;
use crate::core::PredictiveTrie;
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub words: usize,
    pub nodes: usize,
    pub build_time: Duration,
    pub prefixes: usize,
    pub cached_query_time: Duration,
    pub scan_query_time: Duration,
    pub mismatches: usize,
    pub churn_operations: usize,
    pub churn_time: Duration,
}

impl BenchmarkResult {
    /// How many times faster cached lookups were than subtree scans
    #[must_use]
    pub fn speedup(&self) -> f64 {
        let cached = self.cached_query_time.as_secs_f64();
        if cached > 0.0 {
            self.scan_query_time.as_secs_f64() / cached
        } else {
            f64::INFINITY
        }
    }

    #[must_use]
    pub fn words_per_second(&self) -> f64 {
        self.words as f64 / self.build_time.as_secs_f64().max(f64::EPSILON)
    }
}

/// Every distinct proper prefix of `words`, sorted
fn distinct_prefixes<S: AsRef<str>>(words: &[S], limit: usize) -> Vec<String> {
    let mut prefixes: FxHashSet<String> = FxHashSet::default();
    for word in words {
        let word = word.as_ref();
        for (i, _) in word.char_indices().skip(1) {
            prefixes.insert(word[..i].to_string());
        }
        if !word.is_empty() {
            prefixes.insert(word.to_string());
        }
    }
    let mut prefixes: Vec<String> = prefixes.into_iter().collect();
    prefixes.sort_unstable();
    prefixes.truncate(limit);
    prefixes
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );
    pb.set_message(message);
    pb
}

/// Benchmark the trie on a corpus
///
/// Up to `max_prefixes` distinct prefixes are queried both through the caches
/// and by full subtree scans; the answers are compared as they go. The churn
/// phase deletes and reinserts the first `churn` words.
pub fn run_benchmark<S: AsRef<str>>(
    words: &[S],
    config: TrieConfig,
    max_prefixes: usize,
    churn: usize,
) -> BenchmarkResult {
    let start = Instant::now();
    let mut trie = PredictiveTrie::with_config(config);
    trie.extend(words);
    let build_time = start.elapsed();

    let prefixes = distinct_prefixes(words, max_prefixes);
    let pb = progress_bar(prefixes.len(), "cached vs scanned");

    let mut cached_query_time = Duration::ZERO;
    let mut scan_query_time = Duration::ZERO;
    let mut mismatches = 0;

    for prefix in &prefixes {
        let t = Instant::now();
        let cached = trie.most_likely_next_word(prefix).map(str::to_string);
        cached_query_time += t.elapsed();

        let t = Instant::now();
        let scanned = trie.scan_best_word(prefix).map(|(word, _)| word);
        scan_query_time += t.elapsed();

        if cached != scanned {
            mismatches += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let churn_words: Vec<&str> = words.iter().take(churn).map(AsRef::as_ref).collect();
    let pb = progress_bar(churn_words.len(), "delete + reinsert");
    let start = Instant::now();
    for word in &churn_words {
        trie.delete(word);
        trie.insert(word);
        pb.inc(1);
    }
    let churn_time = start.elapsed();
    pb.finish_and_clear();

    BenchmarkResult {
        words: words.len(),
        nodes: trie.node_count(),
        build_time,
        prefixes: prefixes.len(),
        cached_query_time,
        scan_query_time,
        mismatches,
        churn_operations: churn_words.len() * 2,
        churn_time,
    }
}
