/*!
 * Tests for the summary orchestrator: path selection, chunk failures and
 * the condensing pass
 */

use pdfsum::app_config::SummaryConfig;
use pdfsum::errors::SummaryError;
use pdfsum::providers::mock::MockProvider;
use pdfsum::summarization::orchestrator::{Diagnostic, SummaryMethod, SummaryOrchestrator, SummaryRequest};
use pdfsum::summarization::{Document, SummaryLength};
use crate::common;

fn short_request() -> SummaryRequest {
    SummaryRequest::new(SummaryLength::Short)
}

/// Short documents with enough sentences never reach the neural summarizer
#[tokio::test]
async fn test_produceSummary_withShortDocument_shouldUseExtraction() {
    let orchestrator = SummaryOrchestrator::new(SummaryConfig::default(), MockProvider::working());
    let document = Document::new(common::plain_text(10));

    let result = orchestrator.produce_summary(&document, short_request()).await.unwrap();

    assert_eq!(result.method, SummaryMethod::Extractive { sentences: 3, available: 10 });
    assert!(result.diagnostics.is_empty());
    assert_eq!(orchestrator.summarizer().call_count(), 0);
    assert_eq!(result.original.word_count, 100);
    assert_eq!(result.summary.word_count, 30);
    assert!((result.compression_ratio - 0.3).abs() < 1e-9);
}

/// File headers of a combined document never leak into an extractive summary
#[tokio::test]
async fn test_produceSummary_withCombinedDocuments_shouldLeaveHeadersOut() {
    let orchestrator = SummaryOrchestrator::new(SummaryConfig::default(), MockProvider::working());
    let beta_text = (10..14).map(common::plain_sentence).collect::<Vec<_>>().join(" ");
    let document = Document::combine(&[
        Document::new(common::plain_text(4)).with_name("alpha.pdf"),
        Document::new(beta_text).with_name("beta.pdf"),
    ]);

    let result = orchestrator
        .produce_summary(&document, SummaryRequest::new(SummaryLength::Medium))
        .await
        .unwrap();

    assert_eq!(result.method, SummaryMethod::Extractive { sentences: 6, available: 8 });
    assert!(!result.text.contains("---"));
    assert!(!result.text.contains("pdf"));
    assert!(result.text.starts_with("Paragraph 0 describes"));
}

/// Two qualifying sentences: extraction is skipped and the fallback is reported
#[tokio::test]
async fn test_produceSummary_withTwoSentences_shouldRouteToNeuralWithDiagnostic() {
    let orchestrator = SummaryOrchestrator::new(SummaryConfig::default(), MockProvider::working());
    let document = Document::new(common::plain_text(2));

    let result = orchestrator.produce_summary(&document, short_request()).await.unwrap();

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::InsufficientContent { found: 2, required: 3 }]
    );
    assert!(matches!(result.method, SummaryMethod::ChunkedNeural { chunks_total: 1, .. }));
    assert_eq!(orchestrator.summarizer().call_count(), 1);
}

/// A 5000 word document goes through chunking, never direct extraction
#[tokio::test]
async fn test_produceSummary_withLongDocument_shouldChunkThenSummarize() {
    let orchestrator = SummaryOrchestrator::new(SummaryConfig::default(), MockProvider::working());
    let document = Document::new(common::long_text(5000));

    let request = short_request().with_threshold(1000);
    let result = orchestrator.produce_summary(&document, request).await.unwrap();

    match result.method {
        SummaryMethod::ChunkedNeural { chunks_total, chunks_failed, .. } => {
            assert!(chunks_total > 1);
            assert_eq!(chunks_failed, 0);
        }
        other => panic!("expected chunked summary, got {:?}", other),
    }
    assert!(orchestrator.summarizer().call_count() >= 2);
}

/// Per-chunk word targets are the overall targets divided by the chunk count
#[tokio::test]
async fn test_produceSummary_withThreeChunks_shouldSplitWordTargets() {
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), MockProvider::working());
    let document = Document::new(common::plain_text(9));

    orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await
        .unwrap();

    let requests = orchestrator.summarizer().requests();
    assert_eq!(requests.len(), 3);
    for request in requests {
        assert_eq!(request.max_words, 50);
        assert_eq!(request.min_words, 16);
    }
}

/// One failing chunk out of three is left out; the rest keep their order
#[tokio::test]
async fn test_produceSummary_withOneFailingChunk_shouldKeepTheOthersInOrder() {
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), MockProvider::failing_on(2));
    let document = Document::new(common::plain_text(9));

    let result = orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await
        .unwrap();

    let expected = format!("{}\n\n{}", common::plain_text(3), (6..9).map(common::plain_sentence).collect::<Vec<_>>().join(" "));
    assert_eq!(result.text, expected);
    assert_eq!(
        result.method,
        SummaryMethod::ChunkedNeural {
            chunks_total: 3,
            chunks_failed: 1,
            condensed: false
        }
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert!(matches!(result.diagnostics[0], Diagnostic::ChunkFailed { index: 1, .. }));
}

/// Every chunk failing is a hard error
#[tokio::test]
async fn test_produceSummary_withAllChunksFailing_shouldFail() {
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), MockProvider::failing());
    let document = Document::new(common::plain_text(9));

    let result = orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await;

    match result {
        Err(SummaryError::AllChunksFailed { chunks, last_error }) => {
            assert_eq!(chunks, 3);
            assert!(last_error.contains("Simulated failure"));
        }
        other => panic!("expected AllChunksFailed, got {:?}", other.map(|r| r.text)),
    }
}

/// Empty chunk summaries count as failures
#[tokio::test]
async fn test_produceSummary_withEmptyResponses_shouldFailAllChunks() {
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), MockProvider::empty());
    let document = Document::new(common::plain_text(9));

    let result = orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await;
    assert!(matches!(result, Err(SummaryError::AllChunksFailed { chunks: 3, .. })));
}

/// Combined words exactly at 1.5 x target: no condensing pass
#[tokio::test]
async fn test_produceSummary_atExactOverageBoundary_shouldNotCondense() {
    // 3 chunks x 75 words = 225 = 1.5 x 150
    let summarizer = MockProvider::working().with_custom_response(|_| common::words(75));
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), summarizer);
    let document = Document::new(common::plain_text(9));

    let result = orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await
        .unwrap();

    assert_eq!(result.summary.word_count, 225);
    assert_eq!(orchestrator.summarizer().call_count(), 3);
    assert!(matches!(result.method, SummaryMethod::ChunkedNeural { condensed: false, .. }));
}

/// One word over the boundary triggers the condensing pass with the full targets
#[tokio::test]
async fn test_produceSummary_aboveOverageBoundary_shouldCondense() {
    // 3 chunks x 76 words = 228 > 225
    let summarizer = MockProvider::working().with_custom_response(|_| common::words(76));
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), summarizer);
    let document = Document::new(common::plain_text(9));

    let result = orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await
        .unwrap();

    let requests = orchestrator.summarizer().requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[3].max_words, 150);
    assert_eq!(requests[3].min_words, 50);
    assert_eq!(result.summary.word_count, 76);
    assert!(matches!(result.method, SummaryMethod::ChunkedNeural { condensed: true, .. }));
}

/// A failing condensing pass keeps the joined chunk summaries and says so
#[tokio::test]
async fn test_produceSummary_withFailingCondensePass_shouldFallBackToConcatenation() {
    let summarizer = MockProvider::failing_on(4).with_custom_response(|_| common::words(76));
    let orchestrator = SummaryOrchestrator::new(common::small_chunk_config(), summarizer);
    let document = Document::new(common::plain_text(9));

    let result = orchestrator
        .produce_summary(&document, short_request().with_threshold(50))
        .await
        .unwrap();

    assert_eq!(result.summary.word_count, 228);
    assert_eq!(result.text.matches("\n\n").count(), 2);
    assert!(matches!(result.diagnostics.as_slice(), [Diagnostic::FinalPassFailed { .. }]));
    assert!(matches!(result.method, SummaryMethod::ChunkedNeural { condensed: false, .. }));
}

/// Blank documents are rejected up front
#[tokio::test]
async fn test_produceSummary_withBlankDocument_shouldReportEmptyDocument() {
    let orchestrator = SummaryOrchestrator::new(SummaryConfig::default(), MockProvider::working());
    let result = orchestrator.produce_summary(&Document::new("  \n\t "), short_request()).await;
    assert!(matches!(result, Err(SummaryError::EmptyDocument)));
}

/// Without the neural path, too-short documents get a plain excerpt
#[test]
fn test_extractiveOrExcerpt_withTwoSentences_shouldReturnExcerpt() {
    let mut config = SummaryConfig::default();
    config.fallback_excerpt_chars = 20;
    let orchestrator = SummaryOrchestrator::new(config, MockProvider::working());

    let result = orchestrator
        .extractive_or_excerpt(&Document::new(common::plain_text(2)), SummaryLength::Short)
        .unwrap();

    assert_eq!(result.method, SummaryMethod::Excerpt);
    assert_eq!(result.text, "Paragraph 0 describe...");
    assert!(result.is_degraded());
}

/// The configured threshold is used for requests built by the orchestrator
#[test]
fn test_request_shouldUseConfiguredThreshold() {
    let mut config = SummaryConfig::default();
    config.long_document_threshold_words = 42;
    let orchestrator = SummaryOrchestrator::new(config, MockProvider::working());

    let request = orchestrator.request(SummaryLength::Long);
    assert_eq!(request.long_document_threshold_words, 42);
    assert_eq!(request.length, SummaryLength::Long);
}
