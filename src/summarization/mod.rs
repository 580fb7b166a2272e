/*!
 * Summarization pipeline.
 *
 * Stages, leaves first:
 * - `document`: documents, sentences and sentence segmentation
 * - `chunker`: bounded-size pieces for the neural summarizer
 * - `scorer`: heuristic sentence importance
 * - `extractive`: top-scored sentences in reading order
 * - `neural`: the sequence-to-sequence summarizer capability
 * - `orchestrator`: chooses a path per document and collects statistics
 */

pub mod chunker;
pub mod document;
pub mod extractive;
pub mod neural;
pub mod orchestrator;
pub mod scorer;

pub use chunker::{Chunk, ChunkStrategy, Chunker};
pub use document::{Document, ScoredSentence, Sentence, SummaryLength};
pub use extractive::{ExtractiveSummarizer, ExtractiveSummary};
pub use neural::{LazySummarizer, NeuralSummarizer, OllamaSummarizer};
pub use orchestrator::{Diagnostic, SummaryMethod, SummaryOrchestrator, SummaryRequest, SummaryResult};
pub use scorer::{ScoringWeights, SentenceScorer};
