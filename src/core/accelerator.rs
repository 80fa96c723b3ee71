//! Short-prefix accelerator
//!
//! A hash table mirroring the node caches for prefixes up to a fixed length.
//! It is a derived view: extended on insert, rebuilt wholesale on delete, and
//! never consulted for prefixes longer than its limit.

use rustc_hash::FxHashMap;

/// Best answers cached for one short prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub best_word: String,
    pub best_word_count: u64,
    pub best_next: Option<char>,
}

impl CacheEntry {
    #[must_use]
    pub fn best_word(&self) -> Option<&str> {
        (!self.best_word.is_empty()).then_some(self.best_word.as_str())
    }
}

/// Table of [`CacheEntry`] keyed by prefix
#[derive(Debug, Clone, Default)]
pub struct PrefixCache {
    max_len: usize,
    entries: FxHashMap<String, CacheEntry>,
}

impl PrefixCache {
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            entries: FxHashMap::default(),
        }
    }

    /// Longest prefix, in characters, this cache covers
    #[inline]
    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `prefix` is short enough to be served from this cache
    #[must_use]
    pub fn covers(&self, prefix: &str) -> bool {
        !prefix.is_empty() && prefix.chars().nth(self.max_len).is_none()
    }

    /// Look up a prefix; `None` for misses and for prefixes beyond the limit
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&CacheEntry> {
        if self.covers(prefix) {
            self.entries.get(prefix)
        } else {
            None
        }
    }

    /// Fold a freshly inserted word into the entry for `prefix`
    ///
    /// `best_next` is the prefix node's best-next char after the insert.
    pub(crate) fn record_insert(
        &mut self,
        prefix: &str,
        word: &str,
        count: u64,
        best_next: Option<char>,
    ) {
        if !self.covers(prefix) {
            return;
        }
        let entry = self.entries.entry(prefix.to_string()).or_default();
        if count > entry.best_word_count
            || (count == entry.best_word_count && word < entry.best_word.as_str())
        {
            entry.best_word.clear();
            entry.best_word.push_str(word);
            entry.best_word_count = count;
        }
        entry.best_next = best_next;
    }

    /// Replace every entry
    pub(crate) fn replace(&mut self, entries: impl IntoIterator<Item = (String, CacheEntry)>) {
        self.entries.clear();
        self.entries.extend(entries);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate all cached prefixes and their entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(prefix, entry)| (prefix.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_respects_limit() {
        let cache = PrefixCache::new(2);
        assert!(!cache.covers(""));
        assert!(cache.covers("a"));
        assert!(cache.covers("ab"));
        assert!(!cache.covers("abc"));
        // Multi-byte characters count once
        assert!(cache.covers("éé"));
    }

    #[test]
    fn disabled_cache_covers_nothing() {
        let mut cache = PrefixCache::new(0);
        assert!(!cache.covers("a"));
        cache.record_insert("a", "a", 1, None);
        assert!(cache.is_empty());
    }

    #[test]
    fn record_insert_keeps_best_word() {
        let mut cache = PrefixCache::new(2);
        cache.record_insert("th", "the", 1, Some('e'));
        cache.record_insert("th", "that", 1, Some('a'));
        let entry = cache.get("th").unwrap();
        assert_eq!(entry.best_word(), Some("that"));
        assert_eq!(entry.best_next, Some('a'));

        cache.record_insert("th", "the", 2, Some('e'));
        let entry = cache.get("th").unwrap();
        assert_eq!(entry.best_word(), Some("the"));
        assert_eq!(entry.best_word_count, 2);
    }

    #[test]
    fn long_prefix_is_never_served() {
        let mut cache = PrefixCache::new(1);
        cache.record_insert("th", "the", 1, Some('e'));
        assert!(cache.get("th").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn replace_discards_old_entries() {
        let mut cache = PrefixCache::new(2);
        cache.record_insert("a", "a", 1, None);
        cache.replace([(
            "b".to_string(),
            CacheEntry {
                best_word: "be".to_string(),
                best_word_count: 1,
                best_next: Some('e'),
            },
        )]);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b").and_then(CacheEntry::best_word), Some("be"));
        assert_eq!(cache.len(), 1);
    }
}
