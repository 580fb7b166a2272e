/*!
 * Document model shared by the summarization stages.
 *
 * A `Document` is the extracted text of one upload (or of several uploads
 * combined). Stages never mutate it; they derive `Sentence` values from it.
 */

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text_stats::{count_words, TextStats};

// A run of non-terminal characters followed by its (optional) punctuation cluster.
// A period between two digits is a decimal point, not a terminator.
static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\d\.\d|[^.!?])+[.!?]*").expect("valid sentence regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

// A line written by `source_header`
static SOURCE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^--- Content from .+ ---[ \t]*$").expect("valid source header regex"));

/// Line introducing one source file inside a combined document
pub fn source_header(name: &str) -> String {
    format!("--- Content from {} ---", name)
}

/// Requested size of the produced summary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// All variants, shortest first
    pub const ALL: [SummaryLength; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Lowercase identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(anyhow!("Invalid summary length: {}", s)),
        }
    }
}

/// Extracted text of one or more source files
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    name: Option<String>,
    text: String,
    page_count: usize,
}

impl Document {
    /// Create an anonymous document from text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
            page_count: 0,
        }
    }

    /// Set the source file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the number of pages the text came from
    pub fn with_page_count(mut self, page_count: usize) -> Self {
        self.page_count = page_count;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.text)
    }

    /// Whether the document has no words at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Join several documents into one, each introduced by a
    /// `--- Content from <name> ---` header. Page counts are summed.
    pub fn combine(documents: &[Document]) -> Document {
        let mut text = String::new();
        let mut page_count = 0;
        let mut names = Vec::with_capacity(documents.len());

        for document in documents {
            let name = document.name().unwrap_or("document");
            text.push('\n');
            text.push_str(&source_header(name));
            text.push('\n');
            text.push_str(document.text());
            text.push('\n');
            page_count += document.page_count();
            names.push(name.to_string());
        }

        let combined = Document::new(text).with_page_count(page_count);
        if names.len() == 1 {
            combined.with_name(names.remove(0))
        } else {
            combined.with_name(names.join(", "))
        }
    }
}

/// A qualifying sentence with its ordinal position in the document
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Ordinal among the qualifying sentences, starting at 0
    pub position: usize,

    /// Whitespace-normalized text without the terminal punctuation
    pub text: String,

    /// Last terminal punctuation character, if any
    pub terminator: Option<char>,
}

impl Sentence {
    /// Length of the sentence text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_question(&self) -> bool {
        self.terminator == Some('?')
    }
}

/// A sentence paired with its importance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f64,
}

impl ScoredSentence {
    pub fn position(&self) -> usize {
        self.sentence.position
    }
}

/// Split `text` on terminal punctuation and keep the sentences strictly
/// longer than `min_chars` characters. Positions are assigned after filtering.
///
/// Source header lines of a combined document end the sentence before them
/// and are never part of a sentence.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<Sentence> {
    let text = SOURCE_HEADER.replace_all(text, ".");
    let mut sentences = Vec::new();

    for found in SENTENCE_PATTERN.find_iter(&text) {
        let raw = found.as_str().trim();
        let body = raw.trim_end_matches(['.', '!', '?']);
        let terminator = raw[body.len()..].chars().last();
        let normalized = WHITESPACE.replace_all(body.trim(), " ").into_owned();

        if normalized.chars().count() <= min_chars {
            continue;
        }

        sentences.push(Sentence {
            position: sentences.len(),
            text: normalized,
            terminator,
        });
    }

    sentences
}
