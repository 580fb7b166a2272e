/*!
 * Integration tests for text extraction from files on disk
 */

use anyhow::Result;
use std::fs;
use pdfsum::errors::ExtractionError;
use pdfsum::pdf_extractor::{extract_file, extract_files, PdfTextExtractor, TextExtractor};
use crate::common;

/// A generated two-page PDF yields its text and page count
#[test]
fn test_pdfExtractor_withGeneratedPdf_shouldReturnTextAndPages() -> Result<()> {
    let bytes = common::build_pdf(&["Hello from page one", "Goodbye from page two"]);

    assert_eq!(PdfTextExtractor::page_count(&bytes), Some(2));

    let document = PdfTextExtractor.extract("generated.pdf", &bytes)?;
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.name(), Some("generated.pdf"));
    assert!(document.text().contains("Hello"));
    assert!(document.text().contains("Goodbye"));
    Ok(())
}

/// A PDF without any text content is reported as such
#[test]
fn test_pdfExtractor_withBlankPage_shouldReportNoText() {
    let bytes = common::build_pdf(&[""]);
    let result = PdfTextExtractor.extract("blank.pdf", &bytes);
    assert!(matches!(result, Err(ExtractionError::NoText { .. })));
}

/// Files are dispatched by type; broken ones become warnings
#[test]
fn test_extractFiles_withMixedInputs_shouldKeepGoodAndWarnAboutBad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let good_pdf = temp_dir.path().join("good.pdf");
    fs::write(&good_pdf, common::build_pdf(&["Quarterly numbers look healthy"]))?;
    let broken_pdf = common::create_test_file(temp_dir.path(), "broken.pdf", "%PDF-1.4 truncated")?;
    let notes = common::create_test_file(temp_dir.path(), "notes.txt", &common::plain_text(3))?;
    let image = common::create_test_file(temp_dir.path(), "photo.png", "binary")?;

    let batch = extract_files(&[good_pdf, broken_pdf, notes, image]);

    let names: Vec<_> = batch.documents.iter().map(|d| d.name().unwrap_or("").to_string()).collect();
    assert_eq!(names, vec!["good.pdf", "notes.txt"]);
    let skipped: Vec<_> = batch.warnings.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(skipped, vec!["broken.pdf", "photo.png"]);
    assert_eq!(batch.total_pages(), 2);
    Ok(())
}

/// Missing files are I/O or type errors, never panics
#[test]
fn test_extractFile_withMissingFile_shouldFail() {
    assert!(extract_file("definitely/not/here.pdf").is_err());
}
