/*!
 * Error types for the pdfsum application.
 *
 * This module contains custom error types for the different stages of the
 * summarization workflow, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider answered but produced no text
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// The configured model is not served by the provider
    #[error("Model not available: {0}")]
    ModelUnavailable(String),
}

/// Errors raised while turning an input file into text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The bytes could not be parsed as a PDF
    #[error("Could not read '{name}': {reason}")]
    Unreadable {
        /// Source file name
        name: String,
        /// Parser message
        reason: String,
    },

    /// The document parsed but contains no extractable text
    #[error("No text could be extracted from '{name}'")]
    NoText {
        /// Source file name
        name: String,
    },

    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while producing a summary
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Too few qualifying sentences for extraction
    #[error("Insufficient content: found {found} qualifying sentences, need at least {required}")]
    InsufficientContent {
        /// Qualifying sentences found
        found: usize,
        /// Minimum required
        required: usize,
    },

    /// The document has no words at all
    #[error("Document is empty")]
    EmptyDocument,

    /// Every chunk handed to the neural summarizer failed
    #[error("All {chunks} chunks failed to summarize (last error: {last_error})")]
    AllChunksFailed {
        /// Number of chunks attempted
        chunks: usize,
        /// Message of the last failure
        last_error: String,
    },

    /// Error from the neural summarizer outside the per-chunk loop
    #[error("Neural summarizer error: {0}")]
    NeuralSummarizer(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from text extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from summarization
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
