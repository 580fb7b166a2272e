/*!
 * Greedy splitting of long text into bounded chunks.
 *
 * Chunks are units of work for a length-limited summarizer. Units (words or
 * whole sentences) are never split; a unit longer than the limit gets a
 * chunk of its own.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text_stats::count_words;

// Terminal punctuation followed by at least one space
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?] +").expect("valid sentence break regex"));

/// Unit of accumulation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Whitespace-delimited words
    Words,
    /// Sentences split after `.`, `!` or `?` followed by spaces
    #[default]
    Sentences,
}

/// A contiguous piece of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based index in document order
    pub index: usize,
    /// Units joined by single spaces
    pub text: String,
}

impl Chunk {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }
}

/// Splits text into chunks of at most `max_chars` characters
#[derive(Debug, Clone)]
pub struct Chunker {
    max_chars: usize,
    strategy: ChunkStrategy,
}

impl Chunker {
    /// `max_chars` must be positive; zero places every unit in its own chunk.
    pub fn new(max_chars: usize, strategy: ChunkStrategy) -> Self {
        Self { max_chars, strategy }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn strategy(&self) -> ChunkStrategy {
        self.strategy
    }

    /// Split `text` into chunks. Empty text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let units = match self.strategy {
            ChunkStrategy::Words => text.split_whitespace().collect::<Vec<_>>(),
            ChunkStrategy::Sentences => split_sentence_units(text),
        };

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for unit in units {
            let unit_len = unit.chars().count();
            let joined_len = if current.is_empty() {
                unit_len
            } else {
                current_len + 1 + unit_len
            };

            if joined_len > self.max_chars && !current.is_empty() {
                chunks.push(Chunk {
                    index: chunks.len(),
                    text: std::mem::take(&mut current),
                });
                current_len = 0;
            }

            if current.is_empty() {
                if unit_len > self.max_chars {
                    debug!("Unit of {} chars exceeds chunk limit of {}, keeping it whole", unit_len, self.max_chars);
                }
                current.push_str(unit);
                current_len = unit_len;
            } else {
                current.push(' ');
                current.push_str(unit);
                current_len += 1 + unit_len;
            }
        }

        if !current.is_empty() {
            chunks.push(Chunk {
                index: chunks.len(),
                text: current,
            });
        }

        chunks
    }
}

/// Split after terminal punctuation that is followed by spaces. Units keep
/// their punctuation; surrounding whitespace is trimmed and blank units dropped.
pub fn split_sentence_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for found in SENTENCE_BREAK.find_iter(text) {
        // The punctuation is a single ASCII byte
        let end = found.start() + 1;
        push_unit(&mut units, &text[start..end]);
        start = found.end();
    }
    push_unit(&mut units, &text[start..]);

    units
}

fn push_unit<'a>(units: &mut Vec<&'a str>, raw: &'a str) {
    let unit = raw.trim();
    if !unit.is_empty() {
        units.push(unit);
    }
}
