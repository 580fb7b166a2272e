use anyhow::{anyhow, Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::pdf_extractor::{self, display_name, ExtractionBatch, ExtractionWarning};
use crate::report::{self, FileSummary};
use crate::summarization::document::{Document, SummaryLength};
use crate::summarization::neural::{LazySummarizer, NeuralSummarizer};
use crate::summarization::orchestrator::{SummaryOrchestrator, SummaryResult};

// @module: Application controller for PDF summarization

/// Options of a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Files and folders to summarize
    pub inputs: Vec<PathBuf>,
    /// Where the report goes; falls back to the configured directory, then the input's directory
    pub output_dir: Option<PathBuf>,
    pub length: SummaryLength,
    /// One summary per file instead of one for all files combined
    pub per_file: bool,
    /// Replace an existing report of the same name
    pub force_overwrite: bool,
    /// Allow the neural summarizer; when false, short inputs get a plain excerpt
    pub neural: bool,
}

impl RunOptions {
    pub fn new(inputs: Vec<PathBuf>, length: SummaryLength) -> Self {
        Self {
            inputs,
            output_dir: None,
            length,
            per_file: false,
            force_overwrite: false,
            neural: true,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report_path: PathBuf,
    /// Number of summaries written to the report
    pub summaries: usize,
    /// Files that contributed nothing
    pub warnings: Vec<ExtractionWarning>,
    pub duration: Duration,
}

/// Main application controller for PDF summarization
pub struct Controller<S = LazySummarizer> {
    // @field: App configuration
    config: Config,
    orchestrator: SummaryOrchestrator<S>,
}

impl Controller<LazySummarizer> {
    // @method: Create a new controller backed by the configured Ollama model
    pub fn with_config(config: Config) -> Result<Self> {
        let summarizer = LazySummarizer::new(config.summarizer.clone());
        Self::with_summarizer(config, summarizer)
    }
}

impl<S: NeuralSummarizer> Controller<S> {
    /// Create a controller around any neural summarizer
    pub fn with_summarizer(config: Config, summarizer: S) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let orchestrator = SummaryOrchestrator::new(config.summary.clone(), summarizer);
        Ok(Self { config, orchestrator })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &SummaryOrchestrator<S> {
        &self.orchestrator
    }

    /// Expand folders into the PDF and text files they contain
    pub fn collect_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in inputs {
            if FileManager::dir_exists(input) {
                let mut found = FileManager::find_files(input, &FileManager::supported_extensions())?;
                if found.is_empty() {
                    warn!("No PDF or text files found in {}", input.display());
                }
                files.append(&mut found);
            } else if FileManager::file_exists(input) {
                files.push(input.clone());
            } else {
                return Err(anyhow!("Input does not exist: {:?}", input));
            }
        }

        if files.is_empty() {
            return Err(anyhow!("No input files to summarize"));
        }
        Ok(files)
    }

    /// Extract the text of every file, with a progress bar
    pub fn extract(&self, files: &[PathBuf]) -> ExtractionBatch {
        let progress = Self::progress_bar(files.len() as u64, "files");
        let mut batch = ExtractionBatch::default();

        for file in files {
            let name = display_name(file);
            progress.set_message(format!("Extracting: {}", name));
            batch.push(&name, pdf_extractor::extract_file(file));
            progress.inc(1);
        }

        progress.finish_with_message("Extraction complete");
        batch
    }

    /// Summarize one document
    pub async fn summarize(&self, document: &Document, length: SummaryLength, neural: bool) -> Result<SummaryResult> {
        let result = if neural {
            self.orchestrator
                .produce_summary(document, self.orchestrator.request(length))
                .await?
        } else {
            self.orchestrator.extractive_or_excerpt(document, length)?
        };

        for diagnostic in &result.diagnostics {
            warn!("{}: {}", document.name().unwrap_or("document"), diagnostic);
        }
        Ok(result)
    }

    /// Run the whole workflow: extract, summarize, write the report
    pub async fn run(&self, options: &RunOptions) -> Result<RunOutcome> {
        let start_time = Instant::now();
        let files = self.collect_inputs(&options.inputs)?;
        info!("Summarizing {} file(s), length: {}", files.len(), options.length);

        let batch = self.extract(&files);
        if batch.is_empty() {
            let reasons: Vec<String> = batch
                .warnings
                .iter()
                .map(|w| format!("{}: {}", w.name, w.reason))
                .collect();
            return Err(anyhow!("No text could be extracted ({})", reasons.join("; ")));
        }

        let now = Local::now();
        let output_dir = self.output_dir(options);
        let per_file = options.per_file || self.config.output.per_file;

        let (file_name, content, summaries, warnings) = if per_file {
            let (content, summaries, warnings) = self.summarize_each(&batch, options).await?;
            (report::multi_summary_file_name(&now), content, summaries, warnings)
        } else {
            let content = self.summarize_combined(&batch, options).await?;
            (report::summary_file_name(&now), content, 1, batch.warnings.clone())
        };

        let report_path = output_dir.join(file_name);
        Self::write_report(&report_path, &content, options.force_overwrite)?;

        let duration = start_time.elapsed();
        info!(
            "Wrote {} summary(ies) to {} in {}",
            summaries,
            report_path.display(),
            format_duration(duration)
        );

        Ok(RunOutcome {
            report_path,
            summaries,
            warnings,
            duration,
        })
    }

    async fn summarize_combined(&self, batch: &ExtractionBatch, options: &RunOptions) -> Result<String> {
        let document = match batch.documents.as_slice() {
            [single] => single.clone(),
            documents => Document::combine(documents),
        };
        let files: Vec<String> = batch
            .documents
            .iter()
            .map(|d| d.name().unwrap_or("document").to_string())
            .collect();

        let result = self
            .summarize(&document, options.length, options.neural)
            .await
            .with_context(|| format!("Failed to summarize {}", files.join(", ")))?;

        Ok(report::render_summary_report(
            &Local::now(),
            &files,
            document.page_count(),
            &result,
            &batch.warnings,
        ))
    }

    async fn summarize_each(
        &self,
        batch: &ExtractionBatch,
        options: &RunOptions,
    ) -> Result<(String, usize, Vec<ExtractionWarning>)> {
        let progress = Self::progress_bar(batch.documents.len() as u64, "documents");
        let mut summaries = Vec::with_capacity(batch.documents.len());
        let mut warnings = batch.warnings.clone();

        for document in &batch.documents {
            let name = document.name().unwrap_or("document").to_string();
            progress.set_message(format!("Summarizing: {}", name));

            match self.summarize(document, options.length, options.neural).await {
                Ok(result) => summaries.push(FileSummary {
                    name,
                    pages: document.page_count(),
                    result,
                }),
                Err(e) => {
                    error!("Error summarizing {}: {}", name, e);
                    warnings.push(ExtractionWarning {
                        name,
                        reason: format!("summarization failed: {}", e),
                    });
                }
            }
            progress.inc(1);
        }
        progress.finish_with_message("Summaries complete");

        if summaries.is_empty() {
            return Err(anyhow!("Every document failed to summarize"));
        }

        let content = report::render_multi_report(&Local::now(), &summaries, &warnings);
        Ok((content, summaries.len(), warnings))
    }

    /// Explicit option, then configured directory, then the first input's directory
    fn output_dir(&self, options: &RunOptions) -> PathBuf {
        if let Some(dir) = &options.output_dir {
            return dir.clone();
        }
        if let Some(dir) = &self.config.output.directory {
            return PathBuf::from(dir);
        }

        match options.inputs.first() {
            Some(input) if input.is_dir() => input.clone(),
            Some(input) => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            None => PathBuf::from("."),
        }
    }

    fn write_report(path: &Path, content: &str, force_overwrite: bool) -> Result<()> {
        if path.exists() && !force_overwrite {
            return Err(anyhow!(
                "Report already exists: {} (use -f to force overwrite)",
                path.display()
            ));
        }
        FileManager::write_to_file(path, content)?;
        info!("Success: {}", path.display());
        Ok(())
    }

    fn progress_bar(len: u64, unit: &str) -> ProgressBar {
        let progress = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("=>-"));
        progress
    }
}

// Format duration in a human-readable format (HH:MM:SS)
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
