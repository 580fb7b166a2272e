/*!
 * Extractive summarization: pick the best-scoring sentences and put them
 * back in reading order.
 */

use std::cmp::Ordering;

use super::document::{ScoredSentence, SummaryLength};
use super::scorer::SentenceScorer;
use crate::app_config::LengthTable;
use crate::errors::SummaryError;

/// Result of an extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractiveSummary {
    /// Selected sentences joined with ". "
    pub text: String,
    /// Selected sentences in document order
    pub sentences: Vec<ScoredSentence>,
    /// Qualifying sentences the selection was made from
    pub available: usize,
}

/// Selects the top-scored sentences of a document
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    scorer: SentenceScorer,
    lengths: LengthTable,
}

impl ExtractiveSummarizer {
    pub fn new(scorer: SentenceScorer, lengths: LengthTable) -> Self {
        Self { scorer, lengths }
    }

    pub fn scorer(&self) -> &SentenceScorer {
        &self.scorer
    }

    /// Summarize `text` with as many sentences as `length` asks for.
    ///
    /// Deterministic: the same input always yields the same output.
    pub fn summarize(&self, text: &str, length: SummaryLength) -> Result<ExtractiveSummary, SummaryError> {
        let scored = self.scorer.score(text)?;
        let available = scored.len();
        let target = self.lengths.profile(length).sentences;
        let sentences = select_top(scored, target);

        Ok(ExtractiveSummary {
            text: join_sentences(&sentences),
            sentences,
            available,
        })
    }
}

/// Order by score descending, earlier position first on ties
pub fn rank(mut scored: Vec<ScoredSentence>) -> Vec<ScoredSentence> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.position().cmp(&b.position()))
    });
    scored
}

/// Keep the `count` best sentences, returned in document order. At least one
/// sentence is kept when any are available.
pub fn select_top(scored: Vec<ScoredSentence>, count: usize) -> Vec<ScoredSentence> {
    let keep = count.max(1).min(scored.len());
    let mut selected: Vec<ScoredSentence> = rank(scored).into_iter().take(keep).collect();
    selected.sort_by_key(|s| s.position());
    selected
}

/// Join sentences with ". " and end with exactly one period
pub fn join_sentences(sentences: &[ScoredSentence]) -> String {
    let joined = sentences
        .iter()
        .map(|s| s.sentence.text.as_str())
        .collect::<Vec<_>>()
        .join(". ");
    let trimmed = joined.trim().trim_end_matches('.');

    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}.", trimmed)
    }
}

/// First `max_chars` characters of `text`, with "..." appended when cut
pub fn fallback_excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut excerpt: String = text.chars().take(max_chars).collect();
    excerpt.push_str("...");
    excerpt
}
