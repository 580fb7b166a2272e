/*!
 * Text extraction from uploaded files.
 *
 * PDF text comes from `pdf-extract`, the page count from `lopdf`. Plain text
 * files are read as-is and count as one page. A file that cannot be read or
 * holds no text produces an `ExtractionWarning` and is skipped; the other
 * files are still processed.
 */

use log::{debug, warn};
use serde::Serialize;
use std::panic;
use std::path::Path;

use crate::errors::ExtractionError;
use crate::file_utils::{FileManager, FileType};
use crate::summarization::document::Document;

/// Turns the bytes of one file into a document
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `bytes`, naming the document `name`
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Document, ExtractionError>;
}

/// PDF extraction backed by `pdf-extract` and `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Number of pages in the PDF, if its structure can be read
    pub fn page_count(bytes: &[u8]) -> Option<usize> {
        match lopdf::Document::load_mem(bytes) {
            Ok(document) => Some(document.get_pages().len()),
            Err(e) => {
                debug!("lopdf could not read page tree: {}", e);
                None
            }
        }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Document, ExtractionError> {
        // pdf-extract panics on some malformed files instead of returning an error
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)).map_err(|_| {
            ExtractionError::Unreadable {
                name: name.to_string(),
                reason: "PDF parser aborted on malformed input".to_string(),
            }
        })?;

        let text = extracted.map_err(|e| ExtractionError::Unreadable {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText { name: name.to_string() });
        }

        let pages = Self::page_count(bytes).unwrap_or_else(|| {
            warn!("Could not determine page count of {}", name);
            0
        });

        Ok(Document::new(text.trim()).with_name(name).with_page_count(pages))
    }
}

/// UTF-8 text files, one page each
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<Document, ExtractionError> {
        let text = String::from_utf8_lossy(bytes);
        if text.trim().is_empty() {
            return Err(ExtractionError::NoText { name: name.to_string() });
        }
        Ok(Document::new(text.trim()).with_name(name).with_page_count(1))
    }
}

/// A file that contributed nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionWarning {
    pub name: String,
    pub reason: String,
}

impl ExtractionWarning {
    fn from_error(name: &str, error: &ExtractionError) -> Self {
        let reason = match error {
            ExtractionError::Unreadable { reason, .. } => reason.clone(),
            ExtractionError::NoText { .. } => "no extractable text".to_string(),
            ExtractionError::Io(e) => e.to_string(),
        };
        Self {
            name: name.to_string(),
            reason,
        }
    }
}

/// Documents extracted from a set of files, plus the files that were skipped
#[derive(Debug, Default)]
pub struct ExtractionBatch {
    pub documents: Vec<Document>,
    pub warnings: Vec<ExtractionWarning>,
}

impl ExtractionBatch {
    /// Record the outcome of extracting one file
    pub fn push(&mut self, name: &str, outcome: Result<Document, ExtractionError>) {
        match outcome {
            Ok(document) => self.documents.push(document),
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                self.warnings.push(ExtractionWarning::from_error(name, &e));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn total_pages(&self) -> usize {
        self.documents.iter().map(Document::page_count).sum()
    }
}

/// Extract a file from disk, choosing the extractor from its type
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document, ExtractionError> {
    let path = path.as_ref();
    let name = display_name(path);

    let file_type = FileManager::detect_file_type(path).map_err(|e| ExtractionError::Unreadable {
        name: name.clone(),
        reason: e.to_string(),
    })?;
    let bytes = std::fs::read(path)?;

    match file_type {
        FileType::Pdf => PdfTextExtractor.extract(&name, &bytes),
        FileType::Text => PlainTextExtractor.extract(&name, &bytes),
        FileType::Unknown => Err(ExtractionError::Unreadable {
            name,
            reason: "unsupported file type (expected .pdf or .txt)".to_string(),
        }),
    }
}

/// Extract every file, collecting warnings for the ones that fail
pub fn extract_files<P: AsRef<Path>>(paths: &[P]) -> ExtractionBatch {
    let mut batch = ExtractionBatch::default();
    for path in paths {
        let name = display_name(path.as_ref());
        batch.push(&name, extract_file(path));
    }
    batch
}

/// File name without directories, used to label documents
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
