//! Ranked and weighted enumeration
//!
//! Letter rankings look only at a node's children (`O(branching)`); word
//! rankings scan the whole subtree below the prefix (`O(subtree)`).

use super::node::NodeId;
use super::trie::PredictiveTrie;
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// A candidate letter or word with its share of the total
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOption {
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

impl ScoredOption {
    /// Ordering used by every ranking: percent descending, then label ascending
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .percent
            .total_cmp(&self.percent)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for ScoredOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.label, self.percent)
    }
}

/// Turn raw counts into ranked options
fn score(counts: Vec<(String, u64)>) -> Vec<ScoredOption> {
    let total: u64 = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut options: Vec<ScoredOption> = counts
        .into_iter()
        .map(|(label, count)| ScoredOption {
            label,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    options.sort_by(ScoredOption::rank_cmp);
    options
}

/// Word candidate ordered so the heap's maximum is the weakest entry
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    count: u64,
    word: String,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PredictiveTrie {
    /// Every child of `prefix` scored by its pass count, best first
    #[must_use]
    pub fn next_letter_options(&self, prefix: &str) -> Vec<ScoredOption> {
        let Some(id) = self.prefix_node(prefix) else {
            return Vec::new();
        };
        let counts = self
            .node(id)
            .children()
            .map(|(ch, child)| (ch.to_string(), self.node(child).pass_count()))
            .collect();
        score(counts)
    }

    /// Every word under `prefix` scored by its frequency, best first
    #[must_use]
    pub fn next_word_options(&self, prefix: &str) -> Vec<ScoredOption> {
        let Some(id) = self.prefix_node(prefix) else {
            return Vec::new();
        };
        score(self.words_under(id, prefix))
    }

    /// Top `k` next letters for `prefix`
    #[must_use]
    pub fn ranked_next_letters(&self, prefix: &str, k: usize) -> Vec<ScoredOption> {
        let mut options = self.next_letter_options(prefix);
        options.truncate(k);
        options
    }

    /// Top `k` completions for `prefix`
    #[must_use]
    pub fn ranked_next_words(&self, prefix: &str, k: usize) -> Vec<ScoredOption> {
        let mut options = self.next_word_options(prefix);
        options.truncate(k);
        options
    }

    /// Up to `k` next letters drawn at random from outside the top ranks
    ///
    /// The result order depends on `rng` and carries no ranking.
    pub fn alternative_next_letters<R: Rng + ?Sized>(
        &self,
        prefix: &str,
        k: usize,
        rng: &mut R,
    ) -> Vec<ScoredOption> {
        self.sample_alternatives(self.next_letter_options(prefix), k, rng)
    }

    /// Up to `k` completions drawn at random from outside the top ranks
    ///
    /// The result order depends on `rng` and carries no ranking.
    pub fn alternative_next_words<R: Rng + ?Sized>(
        &self,
        prefix: &str,
        k: usize,
        rng: &mut R,
    ) -> Vec<ScoredOption> {
        self.sample_alternatives(self.next_word_options(prefix), k, rng)
    }

    /// Skip the top-ranked options when enough remain, shuffle the rest, keep `k`
    fn sample_alternatives<R: Rng + ?Sized>(
        &self,
        mut options: Vec<ScoredOption>,
        k: usize,
        rng: &mut R,
    ) -> Vec<ScoredOption> {
        if k == 0 {
            return Vec::new();
        }
        let skip = self.config.alternative_skip_top;
        if options.len() > skip {
            options.drain(..skip);
        }
        options.shuffle(rng);
        options.truncate(k);
        options
    }

    /// The `k` most frequent words under `prefix`, frequency descending then alphabetical
    ///
    /// Keeps a bounded heap of the current best `k` and skips any subtree
    /// whose pass count is below the weakest kept frequency. A subtree's pass
    /// count bounds every end count inside it, so the skip never changes the result.
    #[must_use]
    pub fn top_k_words(&self, prefix: &str, k: usize) -> Vec<String> {
        if k == 0 {
            return Vec::new();
        }
        let Some(start) = self.prefix_node(prefix) else {
            return Vec::new();
        };

        let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::with_capacity(k + 1);
        self.walk(start, prefix, |path, _, node| {
            let hopeless = heap.len() == k
                && heap
                    .peek()
                    .is_some_and(|weakest| node.pass_count() < weakest.count);
            if hopeless {
                return false;
            }
            if node.is_word() {
                heap.push(HeapEntry {
                    count: node.end_count(),
                    word: path.to_string(),
                });
                if heap.len() > k {
                    heap.pop();
                }
            }
            true
        });

        heap.into_sorted_vec()
            .into_iter()
            .map(|entry| entry.word)
            .collect()
    }

    /// All (word, frequency) pairs in the subtree at `id`, alphabetical
    pub(crate) fn words_under(&self, id: NodeId, prefix: &str) -> Vec<(String, u64)> {
        let mut words = Vec::new();
        self.walk(id, prefix, |path, _, node| {
            if node.is_word() {
                words.push((path.to_string(), node.end_count()));
            }
            true
        });
        words
    }

    fn prefix_node(&self, prefix: &str) -> Option<NodeId> {
        if prefix.is_empty() {
            None
        } else {
            self.find(prefix)
        }
    }
}
