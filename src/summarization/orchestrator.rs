/*!
 * Per-document summarization policy.
 *
 * Short documents are summarized by extraction. Long documents, and short
 * ones without enough qualifying sentences, are chunked and sent through the
 * neural summarizer one chunk at a time. The chunk summaries are joined and,
 * when they overshoot the target by too much, condensed in a final pass.
 */

use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

use super::chunker::Chunker;
use super::document::{Document, SummaryLength};
use super::extractive::{fallback_excerpt, ExtractiveSummarizer};
use super::neural::NeuralSummarizer;
use super::scorer::SentenceScorer;
use crate::app_config::{LengthProfile, SummaryConfig};
use crate::errors::SummaryError;
use crate::text_stats::{count_words, TextStats};

/// Parameters of a single summarization call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Requested summary length
    pub length: SummaryLength,
    /// Documents with at least this many words go straight to chunking
    pub long_document_threshold_words: usize,
}

impl SummaryRequest {
    pub fn new(length: SummaryLength) -> Self {
        Self {
            length,
            long_document_threshold_words: 1000,
        }
    }

    pub fn with_threshold(mut self, words: usize) -> Self {
        self.long_document_threshold_words = words;
        self
    }
}

/// How the final text was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SummaryMethod {
    /// Top-scored sentences in reading order
    Extractive { sentences: usize, available: usize },
    /// Chunk summaries from the neural summarizer, possibly condensed
    ChunkedNeural {
        chunks_total: usize,
        chunks_failed: usize,
        condensed: bool,
    },
    /// Plain truncation of the source text
    Excerpt,
}

impl fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryMethod::Extractive { sentences, available } => {
                write!(f, "extractive ({} of {} sentences)", sentences, available)
            }
            SummaryMethod::ChunkedNeural {
                chunks_total,
                chunks_failed,
                condensed,
            } => {
                write!(
                    f,
                    "neural ({} of {} chunks summarized{})",
                    chunks_total - chunks_failed,
                    chunks_total,
                    if *condensed { ", condensed" } else { "" }
                )
            }
            SummaryMethod::Excerpt => write!(f, "excerpt"),
        }
    }
}

/// A degraded path taken while producing a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Diagnostic {
    /// Extraction was not possible
    InsufficientContent { found: usize, required: usize },
    /// A chunk was left out of the summary
    ChunkFailed { index: usize, reason: String },
    /// The condensing pass failed; the joined chunk summaries were kept
    FinalPassFailed { reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InsufficientContent { found, required } => write!(
                f,
                "only {} qualifying sentences (need {}), extraction skipped",
                found, required
            ),
            Diagnostic::ChunkFailed { index, reason } => {
                write!(f, "chunk {} omitted: {}", index + 1, reason)
            }
            Diagnostic::FinalPassFailed { reason } => {
                write!(f, "condensing pass failed, chunk summaries kept as-is: {}", reason)
            }
        }
    }
}

/// Final summary with statistics
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub text: String,
    pub method: SummaryMethod,
    pub diagnostics: Vec<Diagnostic>,
    pub original: TextStats,
    pub summary: TextStats,
    /// Summary words divided by original words
    pub compression_ratio: f64,
    pub duration: Duration,
}

impl SummaryResult {
    fn new(text: String, method: SummaryMethod, diagnostics: Vec<Diagnostic>, original: TextStats, started: Instant) -> Self {
        let summary = TextStats::of(&text);
        Self {
            compression_ratio: summary.compression_ratio(&original),
            text,
            method,
            diagnostics,
            original,
            summary,
            duration: started.elapsed(),
        }
    }

    /// Whether any degraded path was taken
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Chooses between extraction and chunked neural summarization
pub struct SummaryOrchestrator<S> {
    config: SummaryConfig,
    extractive: ExtractiveSummarizer,
    chunker: Chunker,
    summarizer: S,
}

impl<S: NeuralSummarizer> SummaryOrchestrator<S> {
    pub fn new(config: SummaryConfig, summarizer: S) -> Self {
        let scorer = SentenceScorer::new(config.scoring.clone(), config.min_sentence_chars, config.min_sentences);
        let extractive = ExtractiveSummarizer::new(scorer, config.lengths.clone());
        let chunker = Chunker::new(config.chunking.max_chars, config.chunking.strategy);

        Self {
            config,
            extractive,
            chunker,
            summarizer,
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    /// A request for `length` using the configured long-document threshold
    pub fn request(&self, length: SummaryLength) -> SummaryRequest {
        SummaryRequest::new(length).with_threshold(self.config.long_document_threshold_words)
    }

    /// Summarize one document
    pub async fn produce_summary(&self, document: &Document, request: SummaryRequest) -> Result<SummaryResult, SummaryError> {
        let started = Instant::now();
        if document.is_blank() {
            return Err(SummaryError::EmptyDocument);
        }

        let original = document.stats();
        let mut diagnostics = Vec::new();

        if original.word_count < request.long_document_threshold_words {
            match self.extractive.summarize(document.text(), request.length) {
                Ok(extracted) => {
                    info!(
                        "Extractive summary: {} of {} sentences ({} words in source)",
                        extracted.sentences.len(),
                        extracted.available,
                        original.word_count
                    );
                    let method = SummaryMethod::Extractive {
                        sentences: extracted.sentences.len(),
                        available: extracted.available,
                    };
                    return Ok(SummaryResult::new(extracted.text, method, diagnostics, original, started));
                }
                Err(SummaryError::InsufficientContent { found, required }) => {
                    info!(
                        "Only {} qualifying sentences (need {}), routing to neural summarizer",
                        found, required
                    );
                    diagnostics.push(Diagnostic::InsufficientContent { found, required });
                }
                Err(e) => return Err(e),
            }
        } else {
            info!(
                "Document has {} words (threshold {}), using chunked neural summarization",
                original.word_count, request.long_document_threshold_words
            );
        }

        let profile = self.config.lengths.profile(request.length);
        let (text, method) = self.summarize_chunks(document.text(), profile, &mut diagnostics).await?;
        Ok(SummaryResult::new(text, method, diagnostics, original, started))
    }

    /// Extraction without the neural path: falls back to a plain excerpt when
    /// the document has too few qualifying sentences.
    pub fn extractive_or_excerpt(&self, document: &Document, length: SummaryLength) -> Result<SummaryResult, SummaryError> {
        let started = Instant::now();
        if document.is_blank() {
            return Err(SummaryError::EmptyDocument);
        }
        let original = document.stats();

        match self.extractive.summarize(document.text(), length) {
            Ok(extracted) => {
                let method = SummaryMethod::Extractive {
                    sentences: extracted.sentences.len(),
                    available: extracted.available,
                };
                Ok(SummaryResult::new(extracted.text, method, Vec::new(), original, started))
            }
            Err(SummaryError::InsufficientContent { found, required }) => {
                let excerpt = fallback_excerpt(document.text(), self.config.fallback_excerpt_chars);
                let diagnostics = vec![Diagnostic::InsufficientContent { found, required }];
                Ok(SummaryResult::new(excerpt, SummaryMethod::Excerpt, diagnostics, original, started))
            }
            Err(e) => Err(e),
        }
    }

    async fn summarize_chunks(
        &self,
        text: &str,
        profile: LengthProfile,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(String, SummaryMethod), SummaryError> {
        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            return Err(SummaryError::EmptyDocument);
        }

        let (max_words, min_words) = per_chunk_targets(profile, chunks.len());
        info!(
            "Summarizing {} chunks with {} ({}-{} words each)",
            chunks.len(),
            self.summarizer.name(),
            min_words,
            max_words
        );

        let mut summaries = Vec::with_capacity(chunks.len());
        let mut failed = 0;
        let mut last_error = String::new();

        // Strictly one chunk at a time, in document order
        for chunk in &chunks {
            debug!("Chunk {}/{} ({} chars)", chunk.index + 1, chunks.len(), chunk.char_len());
            let reason = match self.summarizer.summarize(&chunk.text, max_words, min_words).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    summaries.push(summary.trim().to_string());
                    continue;
                }
                Ok(_) => "empty summary".to_string(),
                Err(e) => e.to_string(),
            };

            warn!("Chunk {}/{} skipped: {}", chunk.index + 1, chunks.len(), reason);
            failed += 1;
            last_error = reason.clone();
            diagnostics.push(Diagnostic::ChunkFailed {
                index: chunk.index,
                reason,
            });
        }

        if summaries.is_empty() {
            return Err(SummaryError::AllChunksFailed {
                chunks: chunks.len(),
                last_error,
            });
        }

        let combined = summaries.join("\n\n");
        let mut condensed = false;
        let mut text = combined;

        if needs_condensing(count_words(&text), profile.max_words, self.config.condense_overage_ratio) {
            info!(
                "Combined chunk summaries have {} words (target {}), condensing",
                count_words(&text),
                profile.max_words
            );
            match self.summarizer.summarize(&text, profile.max_words, profile.min_words).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    text = summary.trim().to_string();
                    condensed = true;
                }
                Ok(_) => {
                    warn!("Condensing pass returned nothing, keeping chunk summaries");
                    diagnostics.push(Diagnostic::FinalPassFailed {
                        reason: "empty summary".to_string(),
                    });
                }
                Err(e) => {
                    warn!("Condensing pass failed, keeping chunk summaries: {}", e);
                    diagnostics.push(Diagnostic::FinalPassFailed { reason: e.to_string() });
                }
            }
        }

        let method = SummaryMethod::ChunkedNeural {
            chunks_total: chunks.len(),
            chunks_failed: failed,
            condensed,
        };
        Ok((text, method))
    }
}

/// Split the overall word targets evenly across `chunks`
pub fn per_chunk_targets(profile: LengthProfile, chunks: usize) -> (usize, usize) {
    let chunks = chunks.max(1);
    let max_words = (profile.max_words / chunks).max(1);
    let min_words = (profile.min_words / chunks).min(max_words);
    (max_words, min_words)
}

/// True when `words` is strictly above `ratio` times `target_max`
pub fn needs_condensing(words: usize, target_max: usize, ratio: f64) -> bool {
    words as f64 > target_max as f64 * ratio
}
