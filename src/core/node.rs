//! Trie node storage
//!
//! Nodes live in an arena owned by the trie and refer to each other by [`NodeId`].

use std::collections::BTreeMap;
use std::fmt;

/// Stable index of a node inside the trie's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node, which is never freed
    pub const ROOT: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One character position in the trie
///
/// Children are kept in a `BTreeMap` so iteration is alphabetical.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) children: BTreeMap<char, NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) key: char,
    pub(crate) pass_count: u64,
    pub(crate) end_count: u64,
    pub(crate) best_word: String,
    pub(crate) best_word_count: u64,
    pub(crate) best_next: Option<(char, u64)>,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>, key: char) -> Self {
        Self {
            parent,
            key,
            ..Self::default()
        }
    }

    /// Clear the node so its arena slot can be reused
    pub(crate) fn reset(&mut self) {
        self.children.clear();
        self.parent = None;
        self.key = '\0';
        self.pass_count = 0;
        self.end_count = 0;
        self.best_word.clear();
        self.best_word_count = 0;
        self.best_next = None;
    }

    /// Number of insertions whose path stepped through this node
    #[inline]
    #[must_use]
    pub const fn pass_count(&self) -> u64 {
        self.pass_count
    }

    /// Number of insertions that ended exactly here
    #[inline]
    #[must_use]
    pub const fn end_count(&self) -> u64 {
        self.end_count
    }

    #[inline]
    #[must_use]
    pub const fn is_word(&self) -> bool {
        self.end_count > 0
    }

    /// Cached best completion for this subtree, if any word lives in it
    #[inline]
    #[must_use]
    pub fn best_word(&self) -> Option<&str> {
        (!self.best_word.is_empty()).then_some(self.best_word.as_str())
    }

    #[inline]
    #[must_use]
    pub const fn best_word_count(&self) -> u64 {
        self.best_word_count
    }

    /// Cached most travelled child character
    #[inline]
    #[must_use]
    pub fn best_next_char(&self) -> Option<char> {
        self.best_next.map(|(ch, _)| ch)
    }

    /// Iterate children in alphabetical order
    pub fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.children.iter().map(|(&ch, &id)| (ch, id))
    }

    /// Offer a word and its count to the best-word cache
    ///
    /// Higher counts win; equal counts keep the alphabetically smaller word.
    pub(crate) fn offer_word(&mut self, word: &str, count: u64) {
        if count == 0 {
            return;
        }
        if count > self.best_word_count
            || (count == self.best_word_count
                && (self.best_word.is_empty() || word < self.best_word.as_str()))
        {
            self.best_word_count = count;
            self.best_word.clear();
            self.best_word.push_str(word);
        }
    }

    /// Offer a child and its pass count to the best-next cache
    pub(crate) fn offer_next(&mut self, ch: char, pass: u64) {
        if pass == 0 {
            return;
        }
        let replace = match self.best_next {
            None => true,
            Some((best, best_pass)) => pass > best_pass || (pass == best_pass && ch < best),
        };
        if replace {
            self.best_next = Some((ch, pass));
        }
    }

    pub(crate) fn clear_caches(&mut self) {
        self.best_word.clear();
        self.best_word_count = 0;
        self.best_next = None;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(pass = {}, end = {})", self.pass_count, self.end_count)
    }
}
