use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// Leading bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extensions read as PDF
pub const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Extensions read as plain text
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with any of the given extensions in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    let ext = ext.to_string_lossy();
                    if extensions
                        .iter()
                        .any(|wanted| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
                    {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Every extension `detect_file_type` recognizes, PDF first
    pub fn supported_extensions() -> Vec<&'static str> {
        PDF_EXTENSIONS.iter().chain(TEXT_EXTENSIONS).copied().collect()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file's raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect whether a file is a PDF or plain text
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        // Check file extension
        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if PDF_EXTENSIONS.contains(&ext.as_str()) {
                return Ok(FileType::Pdf);
            }
            if TEXT_EXTENSIONS.contains(&ext.as_str()) {
                return Ok(FileType::Text);
            }
        }

        // Fall back to the magic bytes
        let mut header = [0u8; 5];
        let mut file = fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let read = file.read(&mut header)?;
        if read == PDF_MAGIC.len() && header == PDF_MAGIC {
            return Ok(FileType::Pdf);
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing the supported input types
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileType {
    /// PDF document
    Pdf,
    /// UTF-8 text
    Text,
    /// Unknown file type
    Unknown,
}
