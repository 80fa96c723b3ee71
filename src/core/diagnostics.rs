//! Read-only diagnostics: listings, statistics and cache auditing
//!
//! None of these depend on the caches except `audit`, which checks them.

use super::node::NodeId;
use super::trie::PredictiveTrie;
use rayon::prelude::*;
use std::fmt;

/// Whole-tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrieStats {
    /// Total insertions (root pass count), duplicates included
    pub total_insertions: u64,
    /// Live nodes, root included
    pub nodes: usize,
    pub distinct_words: usize,
    pub max_depth: usize,
}

/// One terminal node in a structure dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureEntry {
    pub word: String,
    pub pass_count: u64,
    pub end_count: u64,
    pub best_word: String,
    pub best_word_count: u64,
    pub best_next: Option<char>,
}

/// A cache or count that disagrees with a from-scratch recomputation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheViolation {
    BestWord {
        prefix: String,
        expected: Option<(String, u64)>,
        found: Option<(String, u64)>,
    },
    BestNext {
        prefix: String,
        expected: Option<char>,
        found: Option<char>,
    },
    Counts {
        prefix: String,
        pass_count: u64,
        end_count: u64,
        children_pass: u64,
    },
    DeadNode {
        prefix: String,
    },
    Accelerator {
        prefix: String,
    },
}

impl fmt::Display for CacheViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestWord {
                prefix,
                expected,
                found,
            } => write!(
                f,
                "'{prefix}': best word {found:?}, expected {expected:?}"
            ),
            Self::BestNext {
                prefix,
                expected,
                found,
            } => write!(
                f,
                "'{prefix}': best next char {found:?}, expected {expected:?}"
            ),
            Self::Counts {
                prefix,
                pass_count,
                end_count,
                children_pass,
            } => write!(
                f,
                "'{prefix}': pass {pass_count} below end {end_count} + children {children_pass}"
            ),
            Self::DeadNode { prefix } => write!(f, "'{prefix}': empty node was not pruned"),
            Self::Accelerator { prefix } => {
                write!(f, "'{prefix}': accelerator disagrees with node cache")
            }
        }
    }
}

fn sort_by_frequency(words: &mut [(String, u64)]) {
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

impl PredictiveTrie {
    /// Every word with its frequency, alphabetical
    #[must_use]
    pub fn all_words(&self) -> Vec<(String, u64)> {
        self.words_under(NodeId::ROOT, "")
    }

    /// Words starting with `prefix` with their frequency, alphabetical
    #[must_use]
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<(String, u64)> {
        if prefix.is_empty() {
            return Vec::new();
        }
        self.find(prefix)
            .map_or_else(Vec::new, |id| self.words_under(id, prefix))
    }

    /// Every word with its frequency, most frequent first, ties alphabetical
    #[must_use]
    pub fn word_frequencies(&self) -> Vec<(String, u64)> {
        let mut words = self.all_words();
        sort_by_frequency(&mut words);
        words
    }

    /// Words under `prefix` (every word when it is empty), alphabetical or by frequency
    #[must_use]
    pub fn word_listing(&self, prefix: &str, by_frequency: bool) -> Vec<(String, u64)> {
        let mut words = if prefix.is_empty() {
            self.all_words()
        } else {
            self.words_with_prefix(prefix)
        };
        if by_frequency {
            sort_by_frequency(&mut words);
        }
        words
    }

    /// Each complete word with its counts and cached answers, alphabetical
    #[must_use]
    pub fn structure(&self) -> Vec<StructureEntry> {
        let mut entries = Vec::new();
        self.walk(NodeId::ROOT, "", |path, _, node| {
            if node.is_word() {
                entries.push(StructureEntry {
                    word: path.to_string(),
                    pass_count: node.pass_count(),
                    end_count: node.end_count(),
                    best_word: node.best_word.clone(),
                    best_word_count: node.best_word_count(),
                    best_next: node.best_next_char(),
                });
            }
            true
        });
        entries
    }

    /// Node count, distinct words and depth in one depth-first pass
    #[must_use]
    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats {
            total_insertions: self.total_insertions(),
            ..TrieStats::default()
        };

        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            stats.nodes += 1;
            if node.is_word() {
                stats.distinct_words += 1;
            }
            stats.max_depth = stats.max_depth.max(depth);
            stack.extend(node.children().map(|(_, child)| (child, depth + 1)));
        }

        stats
    }

    /// Best (word, count) under `prefix` found by scanning the whole subtree
    ///
    /// Reference answer for `most_likely_next_word`; ignores every cache.
    #[must_use]
    pub fn scan_best_word(&self, prefix: &str) -> Option<(String, u64)> {
        let id = self.find(prefix)?;
        self.scan_best_word_at(id, prefix)
    }

    fn scan_best_word_at(&self, id: NodeId, prefix: &str) -> Option<(String, u64)> {
        // words_under is alphabetical, so the first maximum wins ties
        self.words_under(id, prefix)
            .into_iter()
            .fold(None, |best, (word, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((word, count)),
            })
    }

    /// Check every node's counts and caches, and the accelerator, against a
    /// recomputation from the counts alone
    ///
    /// Nodes are checked in parallel; an empty result means the trie is consistent.
    #[must_use]
    pub fn audit(&self) -> Vec<CacheViolation> {
        let mut order = Vec::new();
        self.walk(NodeId::ROOT, "", |path, id, _| {
            order.push((path.to_string(), id));
            true
        });

        let mut violations: Vec<CacheViolation> = order
            .par_iter()
            .flat_map_iter(|(prefix, id)| self.audit_node(prefix, *id))
            .collect();

        for (prefix, entry) in self.accelerator.iter() {
            let consistent = self.find(prefix).is_some_and(|id| {
                let node = self.node(id);
                node.best_word == entry.best_word
                    && node.best_word_count == entry.best_word_count
                    && node.best_next_char() == entry.best_next
            });
            if !consistent {
                violations.push(CacheViolation::Accelerator {
                    prefix: prefix.to_string(),
                });
            }
        }

        violations
    }

    fn audit_node(&self, prefix: &str, id: NodeId) -> Vec<CacheViolation> {
        let mut violations = Vec::new();
        let node = self.node(id);

        let children_pass: u64 = node
            .children()
            .map(|(_, child)| self.node(child).pass_count())
            .sum();
        if node.pass_count() < node.end_count() + children_pass {
            violations.push(CacheViolation::Counts {
                prefix: prefix.to_string(),
                pass_count: node.pass_count(),
                end_count: node.end_count(),
                children_pass,
            });
        }

        if id != NodeId::ROOT && !node.is_word() && node.children().next().is_none() {
            violations.push(CacheViolation::DeadNode {
                prefix: prefix.to_string(),
            });
        }

        let expected = self.scan_best_word_at(id, prefix);
        let found = node
            .best_word()
            .map(|word| (word.to_string(), node.best_word_count()));
        if expected != found {
            violations.push(CacheViolation::BestWord {
                prefix: prefix.to_string(),
                expected,
                found,
            });
        }

        let expected_next = node
            .children()
            .map(|(ch, child)| (ch, self.node(child).pass_count()))
            .filter(|&(_, pass)| pass > 0)
            .fold(None, |best: Option<(char, u64)>, (ch, pass)| match best {
                Some((_, best_pass)) if best_pass >= pass => best,
                _ => Some((ch, pass)),
            })
            .map(|(ch, _)| ch);
        if expected_next != node.best_next_char() {
            violations.push(CacheViolation::BestNext {
                prefix: prefix.to_string(),
                expected: expected_next,
                found: node.best_next_char(),
            });
        }

        if self.accelerator.covers(prefix) && self.accelerator.get(prefix).is_none() {
            violations.push(CacheViolation::Accelerator {
                prefix: prefix.to_string(),
            });
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrieConfig;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario() -> PredictiveTrie {
        [
            "the",
            "the",
            "the",
            "them",
            "then",
            "there",
            "there",
            "these",
            "therefore",
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn stats_scenario() {
        let stats = scenario().stats();
        assert_eq!(stats.total_insertions, 9);
        assert_eq!(stats.distinct_words, 6);
        assert_eq!(stats.max_depth, 9);
        // root, t-h-e, m, n, s-e, r-e, f-o-r-e
        assert_eq!(stats.nodes, 14);
    }

    #[test]
    fn stats_empty_trie() {
        let stats = PredictiveTrie::new().stats();
        assert_eq!(
            stats,
            TrieStats {
                total_insertions: 0,
                nodes: 1,
                distinct_words: 0,
                max_depth: 0,
            }
        );
    }

    #[test]
    fn listings() {
        let trie = scenario();
        let all = trie.all_words();
        let all: Vec<&str> = all.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(all, vec!["the", "them", "then", "there", "therefore", "these"]);

        assert_eq!(
            trie.words_with_prefix("ther"),
            vec![("there".to_string(), 2), ("therefore".to_string(), 1)]
        );
        assert!(trie.words_with_prefix("").is_empty());
        assert!(trie.words_with_prefix("x").is_empty());

        let by_frequency = trie.word_frequencies();
        assert_eq!(by_frequency[0], ("the".to_string(), 3));
        assert_eq!(by_frequency[1], ("there".to_string(), 2));
        assert_eq!(by_frequency[2], ("them".to_string(), 1));
    }

    #[test]
    fn word_listing_treats_empty_prefix_as_everything() {
        let trie = scenario();
        assert_eq!(trie.word_listing("", false), trie.all_words());
        assert_eq!(trie.word_listing("", true), trie.word_frequencies());

        let ther = trie.word_listing("ther", true);
        assert_eq!(
            ther,
            vec![("there".to_string(), 2), ("therefore".to_string(), 1)]
        );
        assert_eq!(trie.word_listing("them", false), vec![("them".to_string(), 1)]);
        assert!(trie.word_listing("x", true).is_empty());
    }

    #[test]
    fn structure_lists_terminals_with_caches() {
        let trie = scenario();
        let structure = trie.structure();
        assert_eq!(structure.len(), 6);
        let the = &structure[0];
        assert_eq!(the.word, "the");
        assert_eq!((the.pass_count, the.end_count), (9, 3));
        assert_eq!(the.best_word, "the");
        assert_eq!(the.best_next, Some('r'));
    }

    #[test]
    fn scan_agrees_with_scenario() {
        let trie = scenario();
        assert_eq!(trie.scan_best_word("the"), Some(("the".to_string(), 3)));
        assert_eq!(trie.scan_best_word("ther"), Some(("there".to_string(), 2)));
        assert_eq!(trie.scan_best_word("zz"), None);
    }

    #[test]
    fn audit_clean_after_scenario() {
        let mut trie = scenario();
        assert!(trie.audit().is_empty());
        while trie.delete("the") {}
        assert!(trie.audit().is_empty());
    }

    #[test]
    fn audit_detects_corruption() {
        let mut trie = scenario();
        let id = trie.find("ther").unwrap();
        trie.nodes[id.0].best_word = "therefore".to_string();
        let violations = trie.audit();
        assert!(violations.iter().any(|v| matches!(
            v,
            CacheViolation::BestWord { prefix, .. } if prefix == "ther"
        )));

        trie.rebuild_caches();
        assert!(trie.audit().is_empty());
    }

    #[test]
    fn random_churn_keeps_caches_exact() {
        let mut rng = StdRng::seed_from_u64(2024);
        let alphabet = ['a', 'b', 'c', 'd'];
        let mut trie = PredictiveTrie::with_config(TrieConfig::default().with_prefix_cache_len(3));
        let mut inserted: Vec<String> = Vec::new();

        for step in 0..600 {
            if inserted.is_empty() || rng.random_bool(0.6) {
                let len = rng.random_range(1..=5);
                let word: String = (0..len)
                    .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                    .collect();
                trie.insert(&word);
                inserted.push(word);
            } else {
                let index = rng.random_range(0..inserted.len());
                let word = inserted.swap_remove(index);
                assert!(trie.delete(&word), "step {step}: {word} should be present");
            }

            if step % 50 == 0 {
                assert!(trie.audit().is_empty(), "step {step}");
            }
        }

        assert!(trie.audit().is_empty());
        for prefix in ["a", "ab", "abc", "dd", "cab", "bad"] {
            assert_eq!(
                trie.most_likely_next_word(prefix).map(str::to_string),
                trie.scan_best_word(prefix).map(|(w, _)| w),
                "{prefix}"
            );
        }
    }

    #[test]
    fn violation_display() {
        let violation = CacheViolation::DeadNode {
            prefix: "ab".to_string(),
        };
        assert_eq!(violation.to_string(), "'ab': empty node was not pruned");
    }
}
