//! Predictive trie: node arena, navigation and mutation
//!
//! Every node caches the best completion in its subtree and its most
//! travelled child, so single-best queries cost `O(prefix length)`.
//!
//! ## Mutation
//! - `insert` updates counts and caches along the word's path in one pass.
//!   It only ever raises one terminal count, so comparing the inserted word
//!   against each cached best is enough.
//! - `delete` can demote a cached best, so after pruning it recomputes the
//!   caches of every surviving path node from its children, deepest first,
//!   then rebuilds the short-prefix accelerator.
//!
//! ## Thread safety
//! Mutators take `&mut self`; the borrow checker is the single-writer lock.
//! The type is `Send + Sync`, so shared references may be queried from many
//! threads at once.

use super::accelerator::{CacheEntry, PrefixCache};
use super::node::{Node, NodeId};
use crate::config::TrieConfig;
use tracing::{debug, trace};

/// Character trie with cached next-character and next-word predictions
#[derive(Debug, Clone)]
pub struct PredictiveTrie {
    pub(crate) nodes: Vec<Node>,
    free_list: Vec<NodeId>,
    pub(crate) accelerator: PrefixCache,
    pub(crate) config: TrieConfig,
}

impl Default for PredictiveTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictiveTrie {
    /// Create an empty trie with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Create an empty trie
    #[must_use]
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            nodes: vec![Node::new(None, '\0')],
            free_list: Vec::new(),
            accelerator: PrefixCache::new(config.prefix_cache_len),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// The short-prefix accelerator
    #[inline]
    #[must_use]
    pub const fn accelerator(&self) -> &PrefixCache {
        &self.accelerator
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Borrow a live node
    ///
    /// # Panics
    /// Panics if `id` was not handed out by this trie.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total insertions currently recorded, duplicates included
    #[inline]
    #[must_use]
    pub fn total_insertions(&self) -> u64 {
        self.root().pass_count
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    /// Remove every word, keeping allocated storage
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NodeId::ROOT.0].reset();
        self.free_list.clear();
        self.accelerator.clear();
    }

    /// Follow `s` from the root without creating nodes
    #[must_use]
    pub fn find(&self, s: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for ch in s.chars() {
            current = *self.nodes[current.0].children.get(&ch)?;
        }
        Some(current)
    }

    /// Nodes visited by `s`, root first; `None` if the path breaks
    fn path_to(&self, s: &str) -> Option<Vec<NodeId>> {
        let mut path = Vec::with_capacity(s.len() + 1);
        let mut current = NodeId::ROOT;
        path.push(current);
        for ch in s.chars() {
            current = *self.nodes[current.0].children.get(&ch)?;
            path.push(current);
        }
        Some(path)
    }

    /// Record one occurrence of `word`
    ///
    /// Empty words are ignored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut path = Vec::with_capacity(word.len() + 1);
        let mut current = NodeId::ROOT;
        self.nodes[current.0].pass_count += 1;
        path.push(current);

        for ch in word.chars() {
            let next = match self.nodes[current.0].children.get(&ch) {
                Some(&id) => id,
                None => {
                    let id = self.allocate(current, ch);
                    self.nodes[current.0].children.insert(ch, id);
                    id
                }
            };

            let child = &mut self.nodes[next.0];
            child.pass_count += 1;
            let pass = child.pass_count;
            self.nodes[current.0].offer_next(ch, pass);

            path.push(next);
            current = next;
        }

        let terminal = &mut self.nodes[current.0];
        terminal.end_count += 1;
        let count = terminal.end_count;

        for &id in &path {
            self.nodes[id.0].offer_word(word, count);
        }

        for (depth, (offset, ch)) in word
            .char_indices()
            .enumerate()
            .take(self.accelerator.max_len())
        {
            let best_next = self.nodes[path[depth + 1].0].best_next_char();
            self.accelerator
                .record_insert(&word[..offset + ch.len_utf8()], word, count, best_next);
        }

        trace!(word, count, "inserted word");
    }

    /// Remove one occurrence of `word`
    ///
    /// Returns `false`, leaving the trie untouched, when `word` is empty or
    /// not currently a complete word.
    pub fn delete(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let Some(path) = self.path_to(word) else {
            return false;
        };
        let terminal = path[path.len() - 1];
        if self.nodes[terminal.0].end_count == 0 {
            return false;
        }

        self.nodes[terminal.0].end_count -= 1;
        let remaining = self.nodes[terminal.0].end_count;
        for &id in &path {
            let node = &mut self.nodes[id.0];
            debug_assert!(node.pass_count > 0, "pass count underflow on delete");
            node.pass_count -= 1;
        }

        let pruned = self.prune_upward(terminal);
        let survivors = path.len() - pruned;
        self.repair_path(word, &path[..survivors]);
        self.rebuild_accelerator();

        debug!(word, remaining, pruned, "deleted word");
        true
    }

    /// Free childless non-words from `start` upward; returns how many were freed
    fn prune_upward(&mut self, start: NodeId) -> usize {
        let mut pruned = 0;
        let mut current = start;

        while current != NodeId::ROOT {
            let node = &self.nodes[current.0];
            if node.end_count > 0 || !node.children.is_empty() {
                break;
            }
            debug_assert_eq!(node.pass_count, 0, "pruning a node that still has traffic");

            let key = node.key;
            let Some(parent) = node.parent else {
                break;
            };
            self.nodes[parent.0].children.remove(&key);
            self.release(current);
            pruned += 1;
            current = parent;
        }

        pruned
    }

    /// Recompute caches for `path` (root first) from each node's children
    ///
    /// Nodes off the path are untouched by the delete, so their caches are
    /// trusted; walking deepest first makes every child on the path fresh
    /// before its parent reads it.
    fn repair_path(&mut self, word: &str, path: &[NodeId]) {
        let boundaries: Vec<usize> = std::iter::once(0)
            .chain(word.char_indices().map(|(i, ch)| i + ch.len_utf8()))
            .collect();

        for (depth, &id) in path.iter().enumerate().rev() {
            self.recompute_node(id, &word[..boundaries[depth]]);
        }
    }

    /// Rebuild one node's caches from its own count and its children's caches
    fn recompute_node(&mut self, id: NodeId, prefix: &str) {
        let node = &self.nodes[id.0];
        let mut scratch = Node::default();
        scratch.offer_word(prefix, node.end_count);
        for (&ch, &child_id) in &node.children {
            let child = &self.nodes[child_id.0];
            scratch.offer_next(ch, child.pass_count);
            scratch.offer_word(&child.best_word, child.best_word_count);
        }

        let node = &mut self.nodes[id.0];
        node.best_word = scratch.best_word;
        node.best_word_count = scratch.best_word_count;
        node.best_next = scratch.best_next;
    }

    /// Recompute every node cache and the accelerator from the counts alone
    pub fn rebuild_caches(&mut self) {
        let mut order: Vec<(String, NodeId)> = Vec::new();
        self.walk(NodeId::ROOT, "", |path, id, _| {
            order.push((path.to_string(), id));
            true
        });

        for (_, id) in &order {
            self.nodes[id.0].clear_caches();
        }
        // Preorder reversed visits every child before its parent
        for (prefix, id) in order.iter().rev() {
            self.recompute_node(*id, prefix);
        }
        self.rebuild_accelerator();
        debug!(nodes = order.len(), "rebuilt all caches");
    }

    /// Repopulate the accelerator from the node caches
    pub(crate) fn rebuild_accelerator(&mut self) {
        let max_len = self.accelerator.max_len();
        if max_len == 0 {
            return;
        }

        let mut entries = Vec::new();
        let mut stack: Vec<(NodeId, String)> = self.nodes[NodeId::ROOT.0]
            .children()
            .map(|(ch, id)| (id, ch.to_string()))
            .collect();

        while let Some((id, prefix)) = stack.pop() {
            let node = &self.nodes[id.0];
            entries.push((
                prefix.clone(),
                CacheEntry {
                    best_word: node.best_word.clone(),
                    best_word_count: node.best_word_count,
                    best_next: node.best_next_char(),
                },
            ));
            if prefix.chars().count() < max_len {
                for (ch, child) in node.children() {
                    let mut next = prefix.clone();
                    next.push(ch);
                    stack.push((child, next));
                }
            }
        }

        self.accelerator.replace(entries);
    }

    /// Preorder, alphabetical traversal of the subtree at `start`
    ///
    /// `visit` receives each node's full string (starting with `prefix`), id
    /// and contents; returning `false` skips that node's children. Uses an
    /// explicit stack, so depth is limited by memory rather than the call stack.
    pub(crate) fn walk<'a>(
        &'a self,
        start: NodeId,
        prefix: &str,
        mut visit: impl FnMut(&str, NodeId, &'a Node) -> bool,
    ) {
        let mut path = String::from(prefix);
        let mut stack = vec![(start, path.len())];

        while let Some((id, len)) = stack.pop() {
            let node = &self.nodes[id.0];
            if id != start {
                path.truncate(len - node.key.len_utf8());
                path.push(node.key);
            }
            if !visit(&path, id, node) {
                continue;
            }
            for (&ch, &child) in node.children.iter().rev() {
                stack.push((child, len + ch.len_utf8()));
            }
        }
    }

    fn allocate(&mut self, parent: NodeId, key: char) -> NodeId {
        let node = Node::new(Some(parent), key);
        if let Some(id) = self.free_list.pop() {
            self.nodes[id.0] = node;
            id
        } else {
            self.nodes.push(node);
            NodeId(self.nodes.len() - 1)
        }
    }

    fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, NodeId::ROOT, "the root is never freed");
        self.nodes[id.0].reset();
        self.free_list.push(id);
    }

    /// Number of live nodes, root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }
}

impl<S: AsRef<str>> Extend<S> for PredictiveTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, words: I) {
        for word in words {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PredictiveTrie {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut trie = Self::new();
        trie.extend(words);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn insert_counts_every_step() {
        let trie = scenario();
        assert_eq!(trie.total_insertions(), 9);

        let the = trie.node(trie.find("the").unwrap());
        assert_eq!(the.pass_count(), 9);
        assert_eq!(the.end_count(), 3);

        let counts: Vec<(char, u64)> = the
            .children()
            .map(|(ch, id)| (ch, trie.node(id).pass_count()))
            .collect();
        assert_eq!(counts, vec![('m', 1), ('n', 1), ('r', 3), ('s', 1)]);
    }

    #[test]
    fn insert_updates_node_caches() {
        let trie = scenario();
        let the = trie.node(trie.find("the").unwrap());
        assert_eq!(the.best_word(), Some("the"));
        assert_eq!(the.best_word_count(), 3);
        assert_eq!(the.best_next_char(), Some('r'));

        let ther = trie.node(trie.find("ther").unwrap());
        assert_eq!(ther.best_word(), Some("there"));
        assert_eq!(ther.best_next_char(), Some('e'));
    }

    #[test]
    fn empty_insert_is_noop() {
        let mut trie = PredictiveTrie::new();
        trie.insert("");
        assert!(trie.is_empty());
        assert_eq!(trie.total_insertions(), 0);
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn find_never_creates_nodes() {
        let trie = scenario();
        let before = trie.node_count();
        assert!(trie.find("thx").is_none());
        assert!(trie.find("therefores").is_none());
        assert_eq!(trie.node_count(), before);
        assert_eq!(trie.find(""), Some(NodeId::ROOT));
    }

    #[test]
    fn delete_missing_word_changes_nothing() {
        let mut trie = scenario();
        // Drain "then" so a zero-count path is also exercised
        assert!(trie.delete("then"));
        let before = snapshot(&trie);

        assert!(!trie.delete("thermal"));
        assert!(!trie.delete("ther")); // Prefix but not a word
        assert!(!trie.delete("then"));
        assert!(!trie.delete("zzz"));
        assert!(!trie.delete(""));

        assert_eq!(snapshot(&trie), before);
        assert_eq!(trie.total_insertions(), 8);
    }

    /// Everything observable about counts and caches
    fn snapshot(
        trie: &PredictiveTrie,
    ) -> (
        Vec<String>,
        Vec<crate::core::StructureEntry>,
        crate::core::TrieStats,
        usize,
        Vec<(String, CacheEntry)>,
    ) {
        let mut nodes = Vec::new();
        trie.walk(NodeId::ROOT, "", |path, _, node| {
            nodes.push(format!(
                "{path:?} {node} {:?} {} {:?}",
                node.best_word(),
                node.best_word_count(),
                node.best_next
            ));
            true
        });
        let mut accelerator: Vec<(String, CacheEntry)> = trie
            .accelerator()
            .iter()
            .map(|(prefix, entry)| (prefix.to_string(), entry.clone()))
            .collect();
        accelerator.sort_by(|a, b| a.0.cmp(&b.0));
        (
            nodes,
            trie.structure(),
            trie.stats(),
            trie.node_count(),
            accelerator,
        )
    }

    #[test]
    fn delete_mirrors_insert_counts() {
        let mut trie = scenario();
        assert!(trie.delete("there"));
        assert_eq!(trie.total_insertions(), 8);

        let the = trie.node(trie.find("the").unwrap());
        assert_eq!(the.pass_count(), 8);
        let there = trie.node(trie.find("there").unwrap());
        assert_eq!(there.end_count(), 1);
        assert_eq!(there.pass_count(), 2); // there + therefore
    }

    #[test]
    fn delete_prunes_dead_branch() {
        let mut trie = scenario();
        let before = trie.node_count();
        assert!(trie.delete("therefore"));
        // "fore" hangs below "there" and disappears
        assert_eq!(trie.node_count(), before - 4);
        assert!(trie.find("theref").is_none());
        assert!(trie.find("there").is_some());
    }

    #[test]
    fn delete_never_prunes_root() {
        let mut trie = PredictiveTrie::new();
        trie.insert("a");
        assert!(trie.delete("a"));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.root().best_word(), None);
        assert_eq!(trie.root().best_next_char(), None);
    }

    #[test]
    fn delete_repairs_best_word() {
        let mut trie = scenario();
        for _ in 0..3 {
            assert!(trie.delete("the"));
        }
        assert!(!trie.delete("the"));

        let the = trie.node(trie.find("the").unwrap());
        assert_eq!(the.end_count(), 0);
        assert_eq!(the.best_word(), Some("there"));
        assert_eq!(the.best_word_count(), 2);
        assert_eq!(trie.root().best_word(), Some("there"));
    }

    #[test]
    fn delete_repairs_best_next() {
        let mut trie = scenario();
        assert!(trie.delete("there"));
        assert!(trie.delete("there"));
        // r: therefore only (1); m, n, s tie at 1 -> 'm'
        let the = trie.node(trie.find("the").unwrap());
        assert_eq!(the.best_next_char(), Some('m'));
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut trie = PredictiveTrie::new();
        trie.insert("abc");
        let peak = trie.nodes.len();
        assert!(trie.delete("abc"));
        trie.insert("xyz");
        assert_eq!(trie.nodes.len(), peak);
        assert!(trie.find("xyz").is_some());
        assert!(trie.find("abc").is_none());
    }

    #[test]
    fn rebuild_caches_matches_incremental_state() {
        let mut trie = scenario();
        let snapshot: Vec<_> = ["t", "th", "the", "ther", "there"]
            .iter()
            .map(|p| {
                let node = trie.node(trie.find(p).unwrap());
                (node.best_word().map(str::to_string), node.best_next_char())
            })
            .collect();

        trie.rebuild_caches();

        for (p, expected) in ["t", "th", "the", "ther", "there"].iter().zip(snapshot) {
            let node = trie.node(trie.find(p).unwrap());
            assert_eq!(
                (node.best_word().map(str::to_string), node.best_next_char()),
                expected,
                "prefix {p}"
            );
        }
    }

    #[test]
    fn walk_is_alphabetical_preorder() {
        let trie: PredictiveTrie = ["b", "ab", "a", "ac"].into_iter().collect();
        let mut seen = Vec::new();
        trie.walk(NodeId::ROOT, "", |path, _, _| {
            seen.push(path.to_string());
            true
        });
        assert_eq!(seen, vec!["", "a", "ab", "ac", "b"]);
    }

    #[test]
    fn walk_can_skip_subtrees() {
        let trie: PredictiveTrie = ["ab", "ac", "b"].into_iter().collect();
        let mut seen = Vec::new();
        trie.walk(NodeId::ROOT, "", |path, _, _| {
            seen.push(path.to_string());
            path != "a"
        });
        assert_eq!(seen, vec!["", "a", "b"]);
    }

    #[test]
    fn unicode_words_are_char_edges() {
        let mut trie = PredictiveTrie::new();
        trie.insert("café");
        trie.insert("cafés");
        let node = trie.node(trie.find("caf").unwrap());
        assert_eq!(node.best_next_char(), Some('é'));
        assert!(trie.delete("café"));
        assert_eq!(trie.root().best_word(), Some("cafés"));
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut trie = scenario();
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(trie.accelerator().is_empty());
        trie.insert("a");
        assert_eq!(trie.total_insertions(), 1);
    }
}
