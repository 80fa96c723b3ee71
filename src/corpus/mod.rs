//! Corpus ingestion
//!
//! Turns raw text into the normalized word stream the trie expects, and
//! provides an embedded sample text for zero-setup use.

mod embedded;
pub mod loader;

pub use embedded::{SAMPLE, SAMPLE_LINES};
pub use loader::{build_trie, load_from_file, normalize, sample_words};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_line_count_matches_const() {
        assert_eq!(SAMPLE.len(), SAMPLE_LINES);
    }

    #[test]
    fn sample_lines_are_trimmed_and_non_empty() {
        for &line in SAMPLE {
            assert!(!line.is_empty());
            assert_eq!(line, line.trim(), "Line '{line}' has stray whitespace");
        }
    }

    #[test]
    fn sample_normalizes_to_lowercase_letters() {
        let words = sample_words();
        assert!(words.len() > 500, "sample corpus unexpectedly small");
        for word in &words {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' contains non-lowercase chars"
            );
        }
    }
}
