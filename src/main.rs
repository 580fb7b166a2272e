// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use pdfsum::app_config::{self, Config};
use pdfsum::app_controller::{Controller, RunOptions};
use pdfsum::pdf_extractor;
use pdfsum::providers::ollama::Ollama;
use pdfsum::report::group_thousands;
use pdfsum::summarization::{ScoringWeights, SummaryLength};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for SummaryLength to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLength {
    Short,
    Medium,
    Long,
}

impl From<CliLength> for SummaryLength {
    fn from(length: CliLength) -> Self {
        match length {
            CliLength::Short => SummaryLength::Short,
            CliLength::Medium => SummaryLength::Medium,
            CliLength::Long => SummaryLength::Long,
        }
    }
}

/// Sentence scoring presets
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliScoring {
    Standard,
    Detailed,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize PDF or text files (default command)
    #[command(alias = "s")]
    Summarize(SummarizeArgs),

    /// Print page, word, character and sentence counts without summarizing
    Stats {
        /// Input files or directories
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List the models installed on the Ollama server
    Models,

    /// Generate shell completions for pdfsum
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct SummarizeArgs {
    /// Input PDF/text files or directories to process
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Summary length
    #[arg(short, long, value_enum)]
    length: Option<CliLength>,

    /// Ollama model used for neural summarization
    #[arg(short, long)]
    model: Option<String>,

    /// Directory for the report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Summarize each file separately
    #[arg(short, long)]
    per_file: bool,

    /// Never call the neural summarizer; fall back to a plain excerpt instead
    #[arg(long)]
    no_neural: bool,

    /// Sentence scoring preset
    #[arg(long, value_enum)]
    scoring: Option<CliScoring>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// pdfsum - summarize PDF documents
///
/// Extracts the text of PDF files and condenses it either by picking the most
/// important sentences or, for long documents, with a local Ollama model.
#[derive(Parser, Debug)]
#[command(name = "pdfsum")]
#[command(version)]
#[command(about = "Summarize PDF documents by sentence extraction or with a local LLM")]
#[command(long_about = "pdfsum extracts text from PDF files and writes a plain-text summary report.

EXAMPLES:
    pdfsum report.pdf                          # Medium summary of one file
    pdfsum -l short a.pdf b.pdf                # One short summary of both files
    pdfsum -p papers/                          # One summary per file in a folder
    pdfsum -m mistral -l long thesis.pdf       # Use another Ollama model
    pdfsum --no-neural notes.pdf               # Extraction only, never call the model
    pdfsum stats report.pdf                    # Page/word counts only
    pdfsum models                              # Models available on the Ollama server
    pdfsum completions bash > pdfsum.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    summarize: SummarizeArgs,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pdfsum", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Summarize(args)) => run_summarize(args, &cli.config_path, cli.log_level).await,
        Some(Commands::Stats { inputs }) => run_stats(inputs, &cli.config_path, cli.log_level),
        Some(Commands::Models) => run_models(&cli.config_path, cli.log_level).await,
        None => {
            if cli.summarize.inputs.is_empty() {
                return Err(anyhow!("INPUT is required when no subcommand is specified"));
            }
            run_summarize(cli.summarize, &cli.config_path, cli.log_level).await
        }
    }
}

/// Load the configuration and apply the log level from file unless given on the command line
fn load_config(config_path: &str, cli_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_create(config_path)?;

    match cli_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }
    Ok(config)
}

async fn run_summarize(args: SummarizeArgs, config_path: &str, cli_level: Option<CliLogLevel>) -> Result<()> {
    let mut config = load_config(config_path, cli_level)?;

    // Override config with CLI options if provided
    if let Some(model) = &args.model {
        config.summarizer.model = model.clone();
    }
    if let Some(scoring) = args.scoring {
        config.summary.scoring = match scoring {
            CliScoring::Standard => ScoringWeights::standard(),
            CliScoring::Detailed => ScoringWeights::detailed(),
        };
    }

    let length = args.length.map(SummaryLength::from).unwrap_or(config.summary.default_length);
    let controller = Controller::with_config(config)?;

    let mut options = RunOptions::new(args.inputs, length);
    options.output_dir = args.output_dir;
    options.per_file = args.per_file;
    options.force_overwrite = args.force_overwrite;
    options.neural = !args.no_neural;

    let outcome = controller.run(&options).await?;
    for warning in &outcome.warnings {
        warn!("Skipped {}: {}", warning.name, warning.reason);
    }
    println!("{}", outcome.report_path.display());
    Ok(())
}

fn run_stats(inputs: Vec<PathBuf>, config_path: &str, cli_level: Option<CliLogLevel>) -> Result<()> {
    let config = load_config(config_path, cli_level)?;
    let controller = Controller::with_config(config)?;
    let files = controller.collect_inputs(&inputs)?;
    let batch = pdf_extractor::extract_files(&files);

    for document in &batch.documents {
        let stats = document.stats();
        println!(
            "{}: {} pages, {} words, {} characters, {} sentences",
            document.name().unwrap_or("document"),
            document.page_count(),
            group_thousands(stats.word_count),
            group_thousands(stats.char_count),
            group_thousands(stats.sentence_count)
        );
    }
    for warning in &batch.warnings {
        warn!("Skipped {}: {}", warning.name, warning.reason);
    }
    Ok(())
}

async fn run_models(config_path: &str, cli_level: Option<CliLogLevel>) -> Result<()> {
    let config = load_config(config_path, cli_level)?;
    let client = Ollama::from_config(&config.summarizer);
    let models = client.list_models().await?;

    if models.is_empty() {
        warn!("No models installed on {} (try `ollama pull {}`)", client.base_url(), config.summarizer.model);
        return Ok(());
    }

    info!("{} model(s) on {}", models.len(), client.base_url());
    for model in models {
        let marker = if pdfsum::providers::ollama::model_is_available(
            std::slice::from_ref(&model),
            &config.summarizer.model,
        ) {
            "*"
        } else {
            " "
        };
        println!("{} {} ({:.1} GB)", marker, model.name, model.size as f64 / 1e9);
    }
    Ok(())
}
