/*!
 * End-to-end tests: files on disk in, report on disk out
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use pdfsum::app_config::Config;
use pdfsum::app_controller::{format_duration, Controller, RunOptions};
use pdfsum::providers::mock::MockProvider;
use pdfsum::summarization::SummaryLength;
use crate::common;

fn controller() -> Result<Controller<MockProvider>> {
    Controller::with_summarizer(Config::default(), MockProvider::working())
}

/// Two text files are combined into one summary report
#[tokio::test]
async fn test_run_withTwoFiles_shouldWriteCombinedReport() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let a = common::create_test_file(temp_dir.path(), "a.txt", &common::plain_text(6))?;
    let b = common::create_test_file(temp_dir.path(), "b.txt", &(10..16).map(common::plain_sentence).collect::<Vec<_>>().join(" "))?;
    let out = temp_dir.path().join("out");

    let mut options = RunOptions::new(vec![a, b], SummaryLength::Short);
    options.output_dir = Some(out.clone());
    let outcome = controller()?.run(&options).await?;

    let file_name = outcome.report_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("summary_") && file_name.ends_with(".txt"));
    assert_eq!(outcome.report_path.parent(), Some(out.as_path()));
    assert_eq!(outcome.summaries, 1);
    assert!(outcome.warnings.is_empty());

    let report = fs::read_to_string(&outcome.report_path)?;
    assert!(report.contains("Original Files: a.txt, b.txt"));
    assert!(report.contains("Total Pages: 2"));
    assert!(report.contains("Method: extractive (3 of"));
    Ok(())
}

/// Dotted file names in the combined headers stay out of the summary text
#[tokio::test]
async fn test_run_withCombinedDottedNames_shouldKeepHeadersOutOfSummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let a = common::create_test_file(temp_dir.path(), "alpha.notes.txt", &common::plain_text(4))?;
    let b = common::create_test_file(temp_dir.path(), "beta.txt", &(20..24).map(common::plain_sentence).collect::<Vec<_>>().join(" "))?;

    let mut options = RunOptions::new(vec![a, b], SummaryLength::Medium);
    options.output_dir = Some(temp_dir.path().to_path_buf());
    let outcome = controller()?.run(&options).await?;

    let report = fs::read_to_string(&outcome.report_path)?;
    let (_, summary) = report.split_once("SUMMARY:").unwrap();
    assert!(!summary.contains("---"));
    assert!(!summary.contains("txt"));
    assert!(summary.contains("Paragraph 0 describes"));
    Ok(())
}

/// A folder in per-file mode gets one section per file and a warning for broken input
#[tokio::test]
async fn test_run_withFolderPerFile_shouldWriteMultiReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("docs");
    fs::create_dir_all(&input)?;
    common::create_test_file(&input, "one.txt", &common::plain_text(5))?;
    common::create_test_file(&input, "two.txt", &common::plain_text(8))?;
    common::create_test_file(&input, "bad.pdf", "not really a pdf")?;

    let mut options = RunOptions::new(vec![input.clone()], SummaryLength::Short);
    options.per_file = true;
    let outcome = controller()?.run(&options).await?;

    // Report lands next to the inputs when no output directory is given
    assert_eq!(outcome.report_path.parent(), Some(input.as_path()));
    let file_name = outcome.report_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("pdf_summaries_"));
    assert_eq!(outcome.summaries, 2);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].name, "bad.pdf");

    let report = fs::read_to_string(&outcome.report_path)?;
    assert!(report.contains("one.txt (1 pages)"));
    assert!(report.contains("two.txt (1 pages)"));
    assert!(report.contains("Skipped files:"));
    Ok(())
}

/// A long document goes through the mock neural summarizer chunk by chunk
#[tokio::test]
async fn test_run_withLongDocument_shouldUseNeuralPath() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let long = common::create_test_file(temp_dir.path(), "long.txt", &common::long_text(3000))?;

    let controller = controller()?;
    let mut options = RunOptions::new(vec![long], SummaryLength::Medium);
    options.output_dir = Some(temp_dir.path().to_path_buf());
    let outcome = controller.run(&options).await?;

    assert!(controller.orchestrator().summarizer().call_count() > 1);
    let report = fs::read_to_string(&outcome.report_path)?;
    assert!(report.contains("Method: neural ("));
    Ok(())
}

/// Short documents never touch the lazily created Ollama model
#[tokio::test]
async fn test_run_withShortDocumentAndRealSummarizer_shouldNotLoadModel() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "short.txt", &common::plain_text(12))?;

    let mut config = Config::default();
    config.summarizer.endpoint = "http://127.0.0.1:9".to_string();
    let controller = Controller::with_config(config)?;

    let mut options = RunOptions::new(vec![file], SummaryLength::Short);
    options.output_dir = Some(temp_dir.path().to_path_buf());
    controller.run(&options).await?;

    assert!(!controller.orchestrator().summarizer().is_initialized());
    Ok(())
}

/// With the neural path disabled, a tiny document gets an excerpt
#[tokio::test]
async fn test_run_withoutNeural_shouldFallBackToExcerpt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "tiny.txt", "Just one reasonably long sentence here.")?;

    let controller = controller()?;
    let mut options = RunOptions::new(vec![file], SummaryLength::Short);
    options.output_dir = Some(temp_dir.path().to_path_buf());
    options.neural = false;
    let outcome = controller.run(&options).await?;

    assert_eq!(controller.orchestrator().summarizer().call_count(), 0);
    let report = fs::read_to_string(&outcome.report_path)?;
    assert!(report.contains("Method: excerpt"));
    assert!(report.contains("only 1 qualifying sentences (need 3)"));
    assert!(report.ends_with("Just one reasonably long sentence here.\n"));
    Ok(())
}

/// Nothing extractable is an error, not an empty report
#[test]
fn test_run_withOnlyBrokenInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let broken = common::create_test_file(temp_dir.path(), "broken.pdf", "garbage")?;

    let mut options = RunOptions::new(vec![broken], SummaryLength::Short);
    options.output_dir = Some(temp_dir.path().to_path_buf());
    let controller = controller()?;
    let error = tokio_test::block_on(controller.run(&options)).unwrap_err();

    assert!(error.to_string().contains("No text could be extracted"));
    Ok(())
}

/// Inputs that do not exist are rejected before any work
#[test]
fn test_collectInputs_withMissingPath_shouldFail() -> Result<()> {
    let controller = controller()?;
    assert!(controller.collect_inputs(&[PathBuf::from("no/such/file.pdf")]).is_err());
    Ok(())
}

/// Folder scans pick up markdown and .text files like named inputs do
#[test]
fn test_collectInputs_withFolder_shouldIncludeEveryReadableType() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.pdf", "x")?;
    common::create_test_file(temp_dir.path(), "b.md", "x")?;
    common::create_test_file(temp_dir.path(), "c.text", "x")?;
    common::create_test_file(temp_dir.path(), "d.txt", "x")?;
    common::create_test_file(temp_dir.path(), "e.png", "x")?;

    let files = controller()?.collect_inputs(&[temp_dir.path().to_path_buf()])?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.md", "c.text", "d.txt"]);
    Ok(())
}

/// An invalid configuration cannot build a controller
#[test]
fn test_withSummarizer_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.summary.chunking.max_chars = 0;
    assert!(Controller::with_summarizer(config, MockProvider::working()).is_err());
}

/// Durations are printed compactly
#[test]
fn test_formatDuration_shouldPickUnits() {
    use std::time::Duration;
    assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
    assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}
