//! Cache verification command
//!
//! Applies seeded random deletes and reinserts, then audits every cache
//! against a recomputation from the raw counts.

use crate::core::{CacheViolation, PredictiveTrie};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Outcome of a verification run
pub struct VerifyResult {
    pub seed: u64,
    pub inserts: usize,
    pub deletes: usize,
    pub failed_deletes: usize,
    pub words_after: usize,
    pub violations: Vec<CacheViolation>,
}

impl VerifyResult {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty() && self.failed_deletes == 0
    }
}

/// Churn `trie` for `steps` operations, then audit it
///
/// Each step either deletes a word known to be present or reinserts a
/// previously deleted one (or a corpus word), chosen with `seed`.
pub fn run_verify(trie: &mut PredictiveTrie, steps: usize, seed: u64) -> VerifyResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut present: Vec<String> = trie
        .all_words()
        .into_iter()
        .flat_map(|(word, count)| std::iter::repeat_n(word, count as usize))
        .collect();
    let mut removed: Vec<String> = Vec::new();

    let mut inserts = 0;
    let mut deletes = 0;
    let mut failed_deletes = 0;

    for _ in 0..steps {
        let delete = !present.is_empty() && (removed.is_empty() || rng.random_bool(0.5));
        if delete {
            let word = present.swap_remove(rng.random_range(0..present.len()));
            if trie.delete(&word) {
                deletes += 1;
            } else {
                failed_deletes += 1;
            }
            removed.push(word);
        } else if !removed.is_empty() {
            let word = removed.swap_remove(rng.random_range(0..removed.len()));
            trie.insert(&word);
            inserts += 1;
            present.push(word);
        }
    }

    debug!(inserts, deletes, failed_deletes, "churn finished");

    VerifyResult {
        seed,
        inserts,
        deletes,
        failed_deletes,
        words_after: trie.stats().distinct_words,
        violations: trie.audit(),
    }
}
