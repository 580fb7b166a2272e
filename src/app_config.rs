use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::summarization::chunker::ChunkStrategy;
use crate::summarization::document::SummaryLength;
use crate::summarization::scorer::ScoringWeights;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Summarization pipeline settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Neural summarizer (Ollama) settings
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Target sizes for one summary length
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LengthProfile {
    /// Sentences kept by extraction
    pub sentences: usize,
    /// Upper word target for the neural summarizer
    pub max_words: usize,
    /// Lower word target for the neural summarizer
    pub min_words: usize,
}

impl LengthProfile {
    pub const fn new(sentences: usize, max_words: usize, min_words: usize) -> Self {
        Self { sentences, max_words, min_words }
    }
}

/// Fixed mapping from summary length to targets
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LengthTable {
    #[serde(default = "default_short_profile")]
    pub short: LengthProfile,
    #[serde(default = "default_medium_profile")]
    pub medium: LengthProfile,
    #[serde(default = "default_long_profile")]
    pub long: LengthProfile,
}

impl LengthTable {
    pub fn profile(&self, length: SummaryLength) -> LengthProfile {
        match length {
            SummaryLength::Short => self.short,
            SummaryLength::Medium => self.medium,
            SummaryLength::Long => self.long,
        }
    }
}

impl Default for LengthTable {
    fn default() -> Self {
        Self {
            short: default_short_profile(),
            medium: default_medium_profile(),
            long: default_long_profile(),
        }
    }
}

/// How documents are cut before neural summarization
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Words or sentences
    #[serde(default)]
    pub strategy: ChunkStrategy,

    /// Maximum characters per chunk (roughly four characters per model token)
    #[serde(default = "default_chunk_max_chars")]
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: ChunkStrategy::default(),
            max_chars: default_chunk_max_chars(),
        }
    }
}

/// Summarization pipeline settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Length used when none is given on the command line
    #[serde(default)]
    pub default_length: SummaryLength,

    /// Documents with at least this many words skip direct extraction
    #[serde(default = "default_long_document_threshold_words")]
    pub long_document_threshold_words: usize,

    /// Fewer qualifying sentences than this means extraction is not possible
    #[serde(default = "default_min_sentences")]
    pub min_sentences: usize,

    /// Sentences must be strictly longer than this many characters to qualify
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,

    /// A final condensing pass runs when combined chunk summaries exceed
    /// this multiple of the target maximum
    #[serde(default = "default_condense_overage_ratio")]
    pub condense_overage_ratio: f64,

    /// Size of the plain truncation fallback
    #[serde(default = "default_fallback_excerpt_chars")]
    pub fallback_excerpt_chars: usize,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub scoring: ScoringWeights,

    #[serde(default)]
    pub lengths: LengthTable,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_length: SummaryLength::default(),
            long_document_threshold_words: default_long_document_threshold_words(),
            min_sentences: default_min_sentences(),
            min_sentence_chars: default_min_sentence_chars(),
            condense_overage_ratio: default_condense_overage_ratio(),
            fallback_excerpt_chars: default_fallback_excerpt_chars(),
            chunking: ChunkingConfig::default(),
            scoring: ScoringWeights::default(),
            lengths: LengthTable::default(),
        }
    }
}

/// Ollama service configuration for the neural summarizer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummarizerConfig {
    /// Model name (e.g., "llama2", "mistral")
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Service endpoint URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds), doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation
    /// Lower values make output more deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling parameter
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Prompt template
    /// Placeholders: {max_words}, {min_words}, {text}
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: default_ollama_model(),
            endpoint: default_ollama_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            prompt_template: default_prompt_template(),
        }
    }
}

/// Report output settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Directory for reports; defaults to the input's directory
    #[serde(default)]
    pub directory: Option<String>,

    /// Summarize each file separately instead of combining them
    #[serde(default)]
    pub per_file: bool,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_short_profile() -> LengthProfile {
    LengthProfile::new(3, 150, 50)
}

fn default_medium_profile() -> LengthProfile {
    LengthProfile::new(6, 300, 100)
}

fn default_long_profile() -> LengthProfile {
    LengthProfile::new(10, 500, 200)
}

fn default_chunk_max_chars() -> usize {
    3200 // 800 tokens at ~4 chars per token
}

fn default_long_document_threshold_words() -> usize {
    1000
}

fn default_min_sentences() -> usize {
    3
}

fn default_min_sentence_chars() -> usize {
    20
}

fn default_condense_overage_ratio() -> f64 {
    1.5
}

fn default_fallback_excerpt_chars() -> usize {
    500
}

fn default_ollama_model() -> String {
    "llama2".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

/// Upper bound for `retry_count`; the backoff doubles per retry
pub const MAX_RETRY_COUNT: u32 = 10;

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_top_p() -> f32 {
    0.9
}

fn default_prompt_template() -> String {
    "You are an expert document analyst. Summarize the document below.\n\
     Preserve numbers, dates, names, key decisions and conclusions.\n\
     Write between {min_words} and {max_words} words in clear, professional language.\n\n\
     DOCUMENT:\n{text}\n\nSUMMARY:"
        .to_string()
}

impl Config {
    /// Load configuration from `path`, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let summary = &self.summary;

        if summary.chunking.max_chars == 0 {
            return Err(anyhow!("Chunk size must be greater than zero"));
        }
        if summary.long_document_threshold_words == 0 {
            return Err(anyhow!("Long document threshold must be greater than zero"));
        }
        if summary.min_sentences == 0 {
            return Err(anyhow!("Minimum sentence count must be greater than zero"));
        }
        if summary.condense_overage_ratio < 1.0 {
            return Err(anyhow!(
                "Condense overage ratio must be at least 1.0, got {}",
                summary.condense_overage_ratio
            ));
        }

        for length in SummaryLength::ALL {
            let profile = summary.lengths.profile(length);
            if profile.sentences == 0 {
                return Err(anyhow!("Sentence target for '{}' summaries must be positive", length));
            }
            if profile.max_words == 0 || profile.min_words > profile.max_words {
                return Err(anyhow!(
                    "Word targets for '{}' summaries are inconsistent (min {}, max {})",
                    length, profile.min_words, profile.max_words
                ));
            }
        }

        self.summarizer.validate()
    }
}

impl SummarizerConfig {
    /// Validate the summarizer connection settings
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(anyhow!("Summarizer model name is required"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(anyhow!("Summarizer endpoint is required"));
        }
        Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid summarizer endpoint: {}", self.endpoint))?;
        if self.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!(
                "Retry count must be at most {}, got {}",
                MAX_RETRY_COUNT, self.retry_count
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", self.temperature));
        }
        if !self.prompt_template.contains("{text}") {
            return Err(anyhow!("Prompt template must contain the {{text}} placeholder"));
        }
        Ok(())
    }

    /// Fill the prompt template for one request
    pub fn render_prompt(&self, text: &str, max_words: usize, min_words: usize) -> String {
        self.prompt_template
            .replace("{max_words}", &max_words.to_string())
            .replace("{min_words}", &min_words.to_string())
            .replace("{text}", text)
    }
}
