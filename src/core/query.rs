//! Membership and single-best prediction queries
//!
//! All of these run in `O(prefix length)`: they read counts and cached
//! answers and never scan a subtree. Empty input yields the "no answer"
//! value of each return type.

use super::trie::PredictiveTrie;

impl PredictiveTrie {
    /// Whether `word` has been inserted (and not fully deleted)
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find(word).is_some_and(|id| self.node(id).is_word())
    }

    /// Whether some inserted word starts with `prefix`
    #[must_use]
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.find(prefix).is_some()
    }

    /// Number of recorded occurrences of exactly `word`
    #[must_use]
    pub fn frequency(&self, word: &str) -> u64 {
        if word.is_empty() {
            return 0;
        }
        self.find(word).map_or(0, |id| self.node(id).end_count())
    }

    /// Insertions that passed through `prefix`
    ///
    /// This is traffic, duplicates included, not a count of distinct words.
    #[must_use]
    pub fn count_words_with_prefix(&self, prefix: &str) -> u64 {
        if prefix.is_empty() {
            return 0;
        }
        self.find(prefix).map_or(0, |id| self.node(id).pass_count())
    }

    /// Most travelled character after `prefix`
    ///
    /// Ties go to the alphabetically smallest character. Returns `None` for
    /// an empty or unknown prefix, or one with no continuation.
    #[must_use]
    pub fn most_likely_next_char(&self, prefix: &str) -> Option<char> {
        if prefix.is_empty() {
            return None;
        }
        if let Some(entry) = self.accelerator.get(prefix) {
            return entry.best_next;
        }
        self.find(prefix)
            .and_then(|id| self.node(id).best_next_char())
    }

    /// Most frequent complete word starting with `prefix`
    ///
    /// Ties go to the alphabetically smallest word. The prefix itself counts
    /// when it is a word.
    #[must_use]
    pub fn most_likely_next_word(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        if let Some(entry) = self.accelerator.get(prefix) {
            return entry.best_word();
        }
        self.find(prefix).and_then(|id| self.node(id).best_word())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TrieConfig;
    use crate::core::PredictiveTrie;

    fn scenario(config: TrieConfig) -> PredictiveTrie {
        let mut trie = PredictiveTrie::with_config(config);
        trie.extend([
            "the",
            "the",
            "the",
            "them",
            "then",
            "there",
            "there",
            "these",
            "therefore",
        ]);
        trie
    }

    #[test]
    fn membership() {
        let trie = scenario(TrieConfig::default());
        assert!(trie.contains("the"));
        assert!(trie.contains("therefore"));
        assert!(!trie.contains("ther"));
        assert!(!trie.contains("thermos"));
        assert!(!trie.contains(""));

        assert!(trie.contains_prefix("ther"));
        assert!(trie.contains_prefix("therefore"));
        assert!(!trie.contains_prefix("x"));
        assert!(!trie.contains_prefix(""));
    }

    #[test]
    fn frequency_and_traffic() {
        let trie = scenario(TrieConfig::default());
        assert_eq!(trie.frequency("the"), 3);
        assert_eq!(trie.frequency("there"), 2);
        assert_eq!(trie.frequency("ther"), 0);
        assert_eq!(trie.frequency("zebra"), 0);
        assert_eq!(trie.frequency(""), 0);

        assert_eq!(trie.count_words_with_prefix("the"), 9);
        assert_eq!(trie.count_words_with_prefix("ther"), 3);
        assert_eq!(trie.count_words_with_prefix("q"), 0);
        assert_eq!(trie.count_words_with_prefix(""), 0);
    }

    #[test]
    fn single_best_scenario() {
        let trie = scenario(TrieConfig::default());
        assert_eq!(trie.most_likely_next_word("the"), Some("the"));
        assert_eq!(trie.most_likely_next_char("the"), Some('r'));
        assert_eq!(trie.most_likely_next_word("ther"), Some("there"));
        assert_eq!(trie.most_likely_next_word("theref"), Some("therefore"));
        assert_eq!(trie.most_likely_next_char("therefore"), None);
    }

    #[test]
    fn single_best_served_from_accelerator() {
        let trie = scenario(TrieConfig::default());
        assert!(trie.accelerator().get("th").is_some());
        assert_eq!(trie.most_likely_next_char("t"), Some('h'));
        assert_eq!(trie.most_likely_next_char("th"), Some('e'));
        assert_eq!(trie.most_likely_next_word("th"), Some("the"));
    }

    #[test]
    fn empty_and_unknown_prefixes() {
        let trie = scenario(TrieConfig::default());
        assert_eq!(trie.most_likely_next_char(""), None);
        assert_eq!(trie.most_likely_next_word(""), None);
        assert_eq!(trie.most_likely_next_char("q"), None);
        assert_eq!(trie.most_likely_next_word("thz"), None);
    }

    #[test]
    fn delete_repairs_single_best() {
        let mut trie = scenario(TrieConfig::default());
        while trie.delete("the") {}
        assert_eq!(trie.frequency("the"), 0);
        assert!(!trie.contains("the"));
        assert_eq!(trie.most_likely_next_word("the"), Some("there"));
        // Accelerator was rebuilt too
        assert_eq!(trie.most_likely_next_word("th"), Some("there"));
        assert_eq!(trie.most_likely_next_word("t"), Some("there"));
    }

    #[test]
    fn accelerator_on_and_off_agree() {
        let cached = scenario(TrieConfig::default().with_prefix_cache_len(3));
        let uncached = scenario(TrieConfig::default().with_prefix_cache_len(0));
        for prefix in ["t", "th", "the", "ther", "there", "x"] {
            assert_eq!(
                cached.most_likely_next_char(prefix),
                uncached.most_likely_next_char(prefix),
                "next char for {prefix}"
            );
            assert_eq!(
                cached.most_likely_next_word(prefix),
                uncached.most_likely_next_word(prefix),
                "next word for {prefix}"
            );
        }
    }

    #[test]
    fn insert_then_delete_round_trip() {
        let mut trie = scenario(TrieConfig::default());
        let before = (trie.contains("thesis"), trie.frequency("thesis"));
        trie.insert("thesis");
        assert!(trie.delete("thesis"));
        assert_eq!((trie.contains("thesis"), trie.frequency("thesis")), before);

        trie.insert("there");
        assert!(trie.delete("there"));
        assert_eq!(trie.frequency("there"), 2);
        assert_eq!(trie.most_likely_next_word("ther"), Some("there"));
    }
}
