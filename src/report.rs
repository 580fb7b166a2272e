/*!
 * Plain-text report rendering.
 *
 * A combined run writes `summary_<YYYYMMDD_HHMMSS>.txt`; a per-file run
 * writes `pdf_summaries_<YYYYMMDD_HHMMSS>.txt` with one section per file.
 */

use chrono::{DateTime, Local};
use std::fmt;
use std::fmt::Write as _;

use crate::pdf_extractor::ExtractionWarning;
use crate::summarization::orchestrator::SummaryResult;

const RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

/// How much of the original survived, by compression percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionClass {
    Comprehensive,
    Balanced,
    Condensed,
    HighlyCompressed,
}

impl CompressionClass {
    /// Classify a compression percentage (summary words / original words × 100)
    pub fn from_percent(percent: f64) -> Self {
        if percent > 70.0 {
            CompressionClass::Comprehensive
        } else if percent > 50.0 {
            CompressionClass::Balanced
        } else if percent > 30.0 {
            CompressionClass::Condensed
        } else {
            CompressionClass::HighlyCompressed
        }
    }

    pub fn from_ratio(ratio: f64) -> Self {
        Self::from_percent(ratio * 100.0)
    }
}

impl fmt::Display for CompressionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompressionClass::Comprehensive => "comprehensive (high detail)",
            CompressionClass::Balanced => "balanced (good coverage)",
            CompressionClass::Condensed => "condensed (key points)",
            CompressionClass::HighlyCompressed => "highly compressed",
        };
        f.write_str(label)
    }
}

/// One summarized file in a per-file report
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub name: String,
    pub pages: usize,
    pub result: SummaryResult,
}

/// `summary_<YYYYMMDD_HHMMSS>.txt`
pub fn summary_file_name(at: &DateTime<Local>) -> String {
    format!("summary_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// `pdf_summaries_<YYYYMMDD_HHMMSS>.txt`
pub fn multi_summary_file_name(at: &DateTime<Local>) -> String {
    format!("pdf_summaries_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Render the report of one summary built from `files`
pub fn render_summary_report(
    at: &DateTime<Local>,
    files: &[String],
    total_pages: usize,
    result: &SummaryResult,
    warnings: &[ExtractionWarning],
) -> String {
    let mut out = String::new();
    let percent = result.compression_ratio * 100.0;

    let _ = writeln!(out, "PDF Summary Generated on {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Original Files: {}", files.join(", "));
    let _ = writeln!(out, "Total Pages: {}", total_pages);
    let _ = writeln!(out, "Original Words: {}", group_thousands(result.original.word_count));
    let _ = writeln!(out, "Summary Words: {}", group_thousands(result.summary.word_count));
    let _ = writeln!(
        out,
        "Compression Ratio: {:.1}% ({})",
        percent,
        CompressionClass::from_percent(percent)
    );
    let _ = writeln!(out, "Processing Time: {:.2}s", result.duration.as_secs_f64());
    let _ = writeln!(out, "Method: {}", result.method);
    write_notes(&mut out, result, warnings);
    let _ = writeln!(out);
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out);
    out.push_str(&result.text);
    out.push('\n');
    out
}

/// Render the report of several independently summarized files
pub fn render_multi_report(at: &DateTime<Local>, summaries: &[FileSummary], warnings: &[ExtractionWarning]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "PDF Summaries Generated on {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out);

    for summary in summaries {
        let result = &summary.result;
        let percent = result.compression_ratio * 100.0;

        let _ = writeln!(out, "{} ({} pages)", summary.name, summary.pages);
        let _ = writeln!(out, "{}", "-".repeat(SECTION_RULE_WIDTH));
        let _ = writeln!(out, "{}", result.text);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Statistics: {} -> {} words ({:.1}%, {}), {}",
            group_thousands(result.original.word_count),
            group_thousands(result.summary.word_count),
            percent,
            CompressionClass::from_percent(percent),
            result.method
        );
        write_notes(&mut out, result, &[]);
        let _ = writeln!(out);
    }

    if !warnings.is_empty() {
        let _ = writeln!(out, "Skipped files:");
        for warning in warnings {
            let _ = writeln!(out, "  - {}: {}", warning.name, warning.reason);
        }
    }
    out
}

fn write_notes(out: &mut String, result: &SummaryResult, warnings: &[ExtractionWarning]) {
    if result.diagnostics.is_empty() && warnings.is_empty() {
        return;
    }
    let _ = writeln!(out, "Notes:");
    for warning in warnings {
        let _ = writeln!(out, "  - skipped {}: {}", warning.name, warning.reason);
    }
    for diagnostic in &result.diagnostics {
        let _ = writeln!(out, "  - {}", diagnostic);
    }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
