/*!
 * Word, character and sentence counts for a block of text.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Clusters of terminal punctuation, e.g. "?!" counts once
static TERMINAL_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid terminal punctuation regex"));

/// Basic statistics about a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Whitespace-delimited tokens
    pub word_count: usize,

    /// Characters including whitespace
    pub char_count: usize,

    /// Terminal punctuation clusters
    pub sentence_count: usize,
}

impl TextStats {
    /// Compute statistics for `text`. Never fails; empty text yields all zeros.
    pub fn of(text: &str) -> Self {
        Self {
            word_count: count_words(text),
            char_count: text.chars().count(),
            sentence_count: TERMINAL_PUNCTUATION.find_iter(text).count(),
        }
    }

    /// Ratio of `self.word_count` to `original.word_count`, 0.0 for an empty original
    pub fn compression_ratio(&self, original: &TextStats) -> f64 {
        if original.word_count == 0 {
            0.0
        } else {
            self.word_count as f64 / original.word_count as f64
        }
    }
}

/// Count whitespace-delimited words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
