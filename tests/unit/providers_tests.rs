/*!
 * Tests for provider implementations
 */

use std::sync::Arc;
use pdfsum::app_config::SummarizerConfig;
use pdfsum::errors::ProviderError;
use pdfsum::providers::mock::{MockProvider, MockRequest};
use pdfsum::providers::ollama::Ollama;
use pdfsum::providers::Provider;
use pdfsum::summarization::neural::{LazySummarizer, NeuralSummarizer, OllamaSummarizer};

/// The mock works through the generic provider interface too
#[tokio::test]
async fn test_mockProvider_asProvider_shouldCompleteAndExtract() {
    let provider = MockProvider::working();
    let response = provider
        .complete(MockRequest {
            text: "alpha beta gamma".to_string(),
            max_words: 2,
            min_words: 1,
        })
        .await
        .unwrap();

    assert_eq!(MockProvider::extract_text(&response), "alpha beta");
    assert!(provider.test_connection().await.is_ok());
    assert!(MockProvider::failing().test_connection().await.is_err());
}

/// Failures surface as API errors with a server status
#[tokio::test]
async fn test_mockProvider_failing_shouldReturnServerError() {
    let result = MockProvider::failing().summarize("text", 10, 5).await;
    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 503, .. })));
}

/// Summarizers can be shared behind Arc and used as trait objects
#[tokio::test]
async fn test_neuralSummarizer_behindArc_shouldDelegate() {
    let shared: Arc<dyn NeuralSummarizer> = Arc::new(MockProvider::working());
    assert_eq!(shared.name(), "mock");
    assert_eq!(shared.summarize("one two three", 2, 1).await.unwrap(), "one two");

    let mock = Arc::new(MockProvider::working());
    let wrapped = Arc::clone(&mock);
    wrapped.summarize("x y", 5, 1).await.unwrap();
    assert_eq!(mock.call_count(), 1);
}

/// Client settings come from the summarizer config
#[test]
fn test_ollama_fromConfig_shouldTrimTrailingSlash() {
    let config = SummarizerConfig {
        endpoint: "http://localhost:11434/".to_string(),
        ..SummarizerConfig::default()
    };
    assert_eq!(Ollama::from_config(&config).base_url(), "http://localhost:11434");
}

/// Summarizer names identify the model
#[test]
fn test_summarizerNames_shouldIncludeModel() {
    let config = SummarizerConfig {
        model: "mistral".to_string(),
        ..SummarizerConfig::default()
    };
    assert_eq!(OllamaSummarizer::new(config.clone()).name(), "ollama:mistral");
    assert_eq!(LazySummarizer::new(config).name(), "ollama:mistral");
}
