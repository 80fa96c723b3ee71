//! Tunables for the predictive trie and its front ends

/// Default longest prefix mirrored by the short-prefix accelerator
pub const DEFAULT_PREFIX_CACHE_LEN: usize = 2;

/// Default number of top-ranked candidates hidden from alternative suggestions
pub const DEFAULT_ALTERNATIVE_SKIP_TOP: usize = 5;

/// Default number of predictions listed by front ends
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// Configuration for a [`PredictiveTrie`](crate::core::PredictiveTrie)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieConfig {
    /// Longest prefix (in characters) kept in the accelerator; 0 disables it
    pub prefix_cache_len: usize,
    /// Top-ranked candidates excluded from alternative suggestions
    pub alternative_skip_top: usize,
    /// Number of predictions front ends list per panel
    pub display_limit: usize,
}

impl TrieConfig {
    /// Create a configuration
    ///
    /// # Parameters
    /// - `prefix_cache_len`: accelerator prefix length (default: 2)
    /// - `alternative_skip_top`: top candidates hidden from alternatives (default: 5)
    /// - `display_limit`: predictions listed per panel (default: 5)
    #[must_use]
    pub const fn new(
        prefix_cache_len: usize,
        alternative_skip_top: usize,
        display_limit: usize,
    ) -> Self {
        Self {
            prefix_cache_len,
            alternative_skip_top,
            display_limit,
        }
    }

    /// Same configuration with a different accelerator length
    #[must_use]
    pub const fn with_prefix_cache_len(mut self, prefix_cache_len: usize) -> Self {
        self.prefix_cache_len = prefix_cache_len;
        self
    }

    /// Same configuration with a different display limit
    #[must_use]
    pub const fn with_display_limit(mut self, display_limit: usize) -> Self {
        self.display_limit = display_limit;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_PREFIX_CACHE_LEN,
            DEFAULT_ALTERNATIVE_SKIP_TOP,
            DEFAULT_DISPLAY_LIMIT,
        )
    }
}
