/*!
 * Heuristic sentence importance scoring.
 *
 * Every signal contributes independently and the contributions are summed.
 * The weights live in `ScoringWeights` so the different scoring flavours are
 * data, not separate code paths.
 */

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::document::{split_sentences, ScoredSentence, Sentence};
use crate::errors::SummaryError;

static NUMERIC_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+%|\d+\.\d+|\$\d+|figure \d+|table \d+").expect("valid numeric data regex")
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9']+").expect("valid word regex"));

/// Inclusive range of sentence lengths in characters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LengthBand {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl LengthBand {
    pub const fn new(min_chars: usize, max_chars: usize) -> Self {
        Self { min_chars, max_chars }
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min_chars..=self.max_chars).contains(&len)
    }
}

/// Weights and thresholds for each scoring signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    /// Preferred sentence length
    pub primary_band: LengthBand,
    pub primary_band_weight: f64,

    /// Acceptable sentence length; only applies outside the primary band
    pub secondary_band: LengthBand,
    pub secondary_band_weight: f64,

    /// Case-insensitive terms, each contained term counts once
    pub keywords: Vec<String>,
    pub keyword_weight: f64,

    /// Number of sentences at each end of the document that get the position bonus
    pub position_window: usize,
    pub position_weight: f64,

    pub question_weight: f64,

    /// Percentages, decimals, amounts, figure and table references
    pub numeric_weight: f64,

    /// Per word longer than 4 characters that occurs more than twice in the document
    pub frequent_word_weight: f64,

    pub short_threshold_chars: usize,
    pub short_penalty: f64,

    pub long_threshold_chars: usize,
    pub long_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringWeights {
    /// Length, keyword, position and question signals only. Word frequency is
    /// off so a sentence scores the same in any document; `detailed` enables it.
    pub fn standard() -> Self {
        Self {
            primary_band: LengthBand::new(50, 200),
            primary_band_weight: 2.0,
            secondary_band: LengthBand::new(30, 300),
            secondary_band_weight: 2.0,
            keywords: default_keywords(),
            keyword_weight: 1.0,
            position_window: 3,
            position_weight: 1.0,
            question_weight: 1.0,
            numeric_weight: 0.0,
            frequent_word_weight: 0.0,
            short_threshold_chars: 20,
            short_penalty: -2.0,
            long_threshold_chars: 400,
            long_penalty: -1.0,
        }
    }

    /// Adds numeric-data and word-frequency signals and a wider keyword list
    pub fn detailed() -> Self {
        let mut keywords = default_keywords();
        keywords.extend(
            [
                "in conclusion", "in summary", "to summarize", "overall", "finally",
                "essential", "results show", "findings indicate", "study found",
                "evidence shows", "therefore", "consequently",
            ]
            .iter()
            .map(|k| k.to_string()),
        );

        Self {
            primary_band: LengthBand::new(50, 250),
            primary_band_weight: 3.0,
            keywords,
            numeric_weight: 2.0,
            frequent_word_weight: 0.5,
            ..Self::standard()
        }
    }
}

fn default_keywords() -> Vec<String> {
    [
        "important", "significant", "key", "main", "primary",
        "conclusion", "result", "finding", "analysis", "summary",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

/// Document-level facts a sentence score depends on
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    total_sentences: usize,
    word_counts: HashMap<String, usize>,
}

impl ScoringContext {
    /// Context for scoring sentences of `text`, which has `total_sentences` qualifying sentences
    pub fn for_document(text: &str, total_sentences: usize) -> Self {
        let mut word_counts = HashMap::new();
        for word in WORD.find_iter(&text.to_lowercase()) {
            *word_counts.entry(word.as_str().to_string()).or_insert(0) += 1;
        }

        Self {
            total_sentences,
            word_counts,
        }
    }

    /// Context without word frequencies, for scoring sentences in isolation
    pub fn standalone(total_sentences: usize) -> Self {
        Self {
            total_sentences,
            word_counts: HashMap::new(),
        }
    }

    fn is_frequent(&self, word: &str) -> bool {
        self.word_counts.get(word).is_some_and(|count| *count > 2)
    }
}

/// Scores the qualifying sentences of a document
#[derive(Debug, Clone)]
pub struct SentenceScorer {
    weights: ScoringWeights,
    min_sentence_chars: usize,
    min_sentences: usize,
}

impl SentenceScorer {
    pub fn new(weights: ScoringWeights, min_sentence_chars: usize, min_sentences: usize) -> Self {
        Self {
            weights,
            min_sentence_chars,
            min_sentences,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score every qualifying sentence of `text`, in document order.
    ///
    /// Fails with `InsufficientContent` when fewer than the configured minimum
    /// of sentences qualify.
    pub fn score(&self, text: &str) -> Result<Vec<ScoredSentence>, SummaryError> {
        let sentences = split_sentences(text, self.min_sentence_chars);
        if sentences.len() < self.min_sentences {
            return Err(SummaryError::InsufficientContent {
                found: sentences.len(),
                required: self.min_sentences,
            });
        }

        let context = ScoringContext::for_document(text, sentences.len());
        let scored: Vec<ScoredSentence> = sentences
            .into_iter()
            .map(|sentence| {
                let score = self.score_sentence(&sentence, &context);
                ScoredSentence { sentence, score }
            })
            .collect();

        debug!("Scored {} sentences", scored.len());
        Ok(scored)
    }

    /// Score one sentence. Accepts any sentence, including fragments that
    /// would not qualify in a full document.
    pub fn score_sentence(&self, sentence: &Sentence, context: &ScoringContext) -> f64 {
        let w = &self.weights;
        let len = sentence.char_len();
        let lower = sentence.text.to_lowercase();
        let mut score = 0.0;

        if w.primary_band.contains(len) {
            score += w.primary_band_weight;
        } else if w.secondary_band.contains(len) {
            score += w.secondary_band_weight;
        }

        let keyword_hits = w
            .keywords
            .iter()
            .filter(|keyword| lower.contains(&keyword.to_lowercase()))
            .count();
        score += keyword_hits as f64 * w.keyword_weight;

        let tail_start = context.total_sentences.saturating_sub(w.position_window);
        if sentence.position < w.position_window || sentence.position >= tail_start {
            score += w.position_weight;
        }

        if sentence.is_question() {
            score += w.question_weight;
        }

        if w.numeric_weight != 0.0 && NUMERIC_DATA.is_match(&lower) {
            score += w.numeric_weight;
        }

        if w.frequent_word_weight != 0.0 {
            let frequent = WORD
                .find_iter(&lower)
                .filter(|word| word.as_str().len() > 4 && context.is_frequent(word.as_str()))
                .count();
            score += frequent as f64 * w.frequent_word_weight;
        }

        if len < w.short_threshold_chars {
            score += w.short_penalty;
        } else if len > w.long_threshold_chars {
            score += w.long_penalty;
        }

        score
    }
}
