/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use pdfsum::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// find_files walks subdirectories, matches extensions case-insensitively and sorts
#[test]
fn test_find_files_withNestedFolders_shouldFindMatchingSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    fs::create_dir_all(&nested)?;

    common::create_test_file(temp_dir.path(), "b.pdf", "x")?;
    common::create_test_file(temp_dir.path(), "a.TXT", "x")?;
    common::create_test_file(&nested, "c.pdf", "x")?;
    common::create_test_file(temp_dir.path(), "ignored.docx", "x")?;

    let found = FileManager::find_files(temp_dir.path(), &["pdf", ".txt"])?;
    let names: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.TXT", "b.pdf", "nested/c.pdf"]);
    Ok(())
}

/// write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("reports").join("out.txt");

    FileManager::write_to_file(&path, "hello")?;
    assert_eq!(FileManager::read_to_string(&path)?, "hello");
    assert_eq!(FileManager::read_bytes(&path)?, b"hello");
    Ok(())
}

/// File types come from the extension, then from the PDF magic bytes
#[test]
fn test_detect_file_type_shouldRecognizePdfAndText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_file(temp_dir.path(), "doc.pdf", "anything")?;
    let txt = common::create_test_file(temp_dir.path(), "notes.txt", "anything")?;
    let disguised = common::create_test_file(temp_dir.path(), "download.bin", "%PDF-1.7 rest")?;
    let other = common::create_test_file(temp_dir.path(), "image.png", "not a pdf")?;

    assert_eq!(FileManager::detect_file_type(&pdf)?, FileType::Pdf);
    assert_eq!(FileManager::detect_file_type(&txt)?, FileType::Text);
    assert_eq!(FileManager::detect_file_type(&disguised)?, FileType::Pdf);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.pdf")).is_err());
    Ok(())
}

/// Every extension a folder scan picks up is one detect_file_type can read
#[test]
fn test_supported_extensions_shouldMatchDetectedTypes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let extensions = FileManager::supported_extensions();
    assert_eq!(extensions, vec!["pdf", "txt", "text", "md"]);

    for ext in &extensions {
        let file = common::create_test_file(temp_dir.path(), &format!("input.{}", ext), "plain words")?;
        assert_ne!(FileManager::detect_file_type(&file)?, FileType::Unknown, "extension {}", ext);
    }

    let found = FileManager::find_files(temp_dir.path(), &extensions)?;
    assert_eq!(found.len(), extensions.len());
    Ok(())
}
