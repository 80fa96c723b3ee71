//! Formatting utilities for terminal output

use crate::core::ScoredOption;

/// Placeholder shown when there is no next-character prediction
pub const NO_PREDICTION: char = '_';

/// A predicted character, or the placeholder
#[must_use]
pub fn char_or_placeholder(ch: Option<char>) -> char {
    ch.unwrap_or(NO_PREDICTION)
}

/// Join options as "a (50.0%), b (25.0%)", or a dash when there are none
#[must_use]
pub fn join_options(options: &[ScoredOption]) -> String {
    if options.is_empty() {
        return "—".to_string();
    }
    options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a percentage as a bar
#[must_use]
pub fn percent_bar(percent: f64, width: usize) -> String {
    create_progress_bar(percent, 100.0, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, percent: f64) -> ScoredOption {
        ScoredOption {
            label: label.to_string(),
            count: 1,
            percent,
        }
    }

    #[test]
    fn placeholder_for_missing_char() {
        assert_eq!(char_or_placeholder(None), '_');
        assert_eq!(char_or_placeholder(Some('r')), 'r');
    }

    #[test]
    fn join_formats_percentages() {
        let options = [option("r", 50.0), option("m", 100.0 / 6.0)];
        assert_eq!(join_options(&options), "r (50.0%), m (16.7%)");
        assert_eq!(join_options(&[]), "—");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = percent_bar(50.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }
}
