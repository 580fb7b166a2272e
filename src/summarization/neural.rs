/*!
 * The neural (abstractive) summarizer capability.
 *
 * The orchestrator only sees `NeuralSummarizer`: text in, text out. The
 * Ollama-backed implementation is created lazily on first use and kept for
 * the lifetime of the process.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::app_config::SummarizerConfig;
use crate::errors::ProviderError;
use crate::providers::ollama::{model_is_available, GenerationRequest, Ollama};
use crate::providers::Provider;

/// A sequence-to-sequence summarizer invoked once per piece of text
#[async_trait]
pub trait NeuralSummarizer: Send + Sync {
    /// Summarize `text` in roughly `min_words..=max_words` words
    async fn summarize(&self, text: &str, max_words: usize, min_words: usize) -> Result<String, ProviderError>;

    /// Human readable identifier, used in logs and reports
    fn name(&self) -> String;
}

#[async_trait]
impl<T: NeuralSummarizer + ?Sized> NeuralSummarizer for Arc<T> {
    async fn summarize(&self, text: &str, max_words: usize, min_words: usize) -> Result<String, ProviderError> {
        (**self).summarize(text, max_words, min_words).await
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Summarizer backed by an Ollama model
#[derive(Debug, Clone)]
pub struct OllamaSummarizer {
    client: Ollama,
    config: SummarizerConfig,
}

impl OllamaSummarizer {
    /// Build a summarizer without contacting the server
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            client: Ollama::from_config(&config),
            config,
        }
    }

    /// Build a summarizer and check that the server answers and serves the model
    pub async fn connect(config: SummarizerConfig) -> Result<Self, ProviderError> {
        let summarizer = Self::new(config);
        let version = summarizer.client.version().await?;
        let models = summarizer.client.list_models().await?;

        if !model_is_available(&models, &summarizer.config.model) {
            return Err(ProviderError::ModelUnavailable(format!(
                "'{}' is not installed on {} (try `ollama pull {}`)",
                summarizer.config.model,
                summarizer.client.base_url(),
                summarizer.config.model
            )));
        }

        info!(
            "Connected to Ollama {} at {} using model {}",
            version,
            summarizer.client.base_url(),
            summarizer.config.model
        );
        Ok(summarizer)
    }

    fn build_request(&self, text: &str, max_words: usize, min_words: usize) -> GenerationRequest {
        let prompt = self.config.render_prompt(text, max_words, min_words);
        // Word targets are soft; leave room for roughly two tokens per word
        let num_predict = u32::try_from(max_words.saturating_mul(2)).unwrap_or(u32::MAX);

        GenerationRequest::new(self.config.model.clone(), prompt)
            .temperature(self.config.temperature)
            .top_p(self.config.top_p)
            .num_predict(num_predict)
    }
}

#[async_trait]
impl NeuralSummarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str, max_words: usize, min_words: usize) -> Result<String, ProviderError> {
        let request = self.build_request(text, max_words, min_words);
        debug!("Requesting {}-{} word summary of {} chars", min_words, max_words, text.len());

        let response = self.client.complete(request).await?;
        let summary = Ollama::extract_text(&response);
        if summary.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(summary)
    }

    fn name(&self) -> String {
        format!("ollama:{}", self.config.model)
    }
}

/// Connects to Ollama on the first request and reuses the connection afterwards.
///
/// A failed connection attempt is not cached; the next request tries again.
#[derive(Debug)]
pub struct LazySummarizer {
    config: SummarizerConfig,
    inner: OnceCell<OllamaSummarizer>,
}

impl LazySummarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            config,
            inner: OnceCell::new(),
        }
    }

    /// Whether the underlying model handle has been created
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized()
    }

    async fn get(&self) -> Result<&OllamaSummarizer, ProviderError> {
        self.inner
            .get_or_try_init(|| async {
                warn!("Loading summarization model '{}' on first use", self.config.model);
                OllamaSummarizer::connect(self.config.clone()).await
            })
            .await
    }
}

#[async_trait]
impl NeuralSummarizer for LazySummarizer {
    async fn summarize(&self, text: &str, max_words: usize, min_words: usize) -> Result<String, ProviderError> {
        self.get().await?.summarize(text, max_words, min_words).await
    }

    fn name(&self) -> String {
        format!("ollama:{}", self.config.model)
    }
}
