//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::resolve_documents;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use layoutprep_core::HeadingRules;
use layoutprep_engine::{
    ExecutionMode, OcrSource, Pipeline, PipelineConfig, RunReport, TesseractOcr,
};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Documents: PDFs, page images or directories of page images (supports glob)
    #[arg(short, long, value_name = "FILE/DIR/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output directory [default: output]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Heading rules file
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Sub-tokens per chunk, special tokens included
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Sub-tokens shared by consecutive chunks
    #[arg(long, value_name = "N")]
    pub stride: Option<usize>,

    /// Drop OCR words below this confidence (0-100)
    #[arg(long, value_name = "CONF")]
    pub conf_threshold: Option<f32>,

    /// Skip highlight images
    #[arg(long)]
    pub no_visuals: bool,

    /// Resolution PDF pages are rendered at [default: 200]
    #[arg(long, value_name = "DPI")]
    pub dpi: Option<u32>,

    /// Where OCR output comes from
    #[arg(long, value_enum)]
    pub ocr_mode: Option<OcrMode>,

    /// HuggingFace tokenizer.json to use instead of the built-in tokenizer
    #[cfg(feature = "hf-tokenizers")]
    #[arg(long, value_name = "FILE")]
    pub tokenizer: Option<PathBuf>,

    /// Process documents in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for parallel processing
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// OCR source choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OcrMode {
    /// Sidecar TSV when present, otherwise run tesseract
    Auto,
    /// Only read `<image>.tsv` sidecars
    Sidecar,
    /// Always run tesseract
    Command,
}

impl From<OcrMode> for OcrSource {
    fn from(mode: OcrMode) -> Self {
        match mode {
            OcrMode::Auto => OcrSource::Auto,
            OcrMode::Sidecar => OcrSource::Sidecar,
            OcrMode::Command => OcrSource::Command,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting document processing");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let config = self.pipeline_config(&file_config);
        let rules = self.heading_rules(&file_config)?;
        let ocr = self.ocr(&file_config)?;

        let documents = resolve_documents(&self.input)?;
        log::info!("Found {} documents", documents.len());

        let builder = Pipeline::builder(config).rules(rules).ocr(ocr);
        #[cfg(feature = "hf-tokenizers")]
        let builder = match &self.tokenizer {
            Some(path) => builder.tokenizer(
                layoutprep_engine::HfTokenizer::from_file(path)
                    .with_context(|| format!("Failed to load tokenizer: {}", path.display()))?,
            ),
            None => builder,
        };
        let pipeline = builder.build().context("Invalid pipeline configuration")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(documents.len() as u64);
        let report = pipeline
            .run_with_progress(&documents, |result| progress.document_completed(result))
            .context("Pipeline run failed")?;
        progress.finish();

        self.print_report(&report);

        if report.is_success() {
            Ok(())
        } else {
            Err(CliError::DocumentsFailed {
                failed: report.failures.len(),
                total: documents.len(),
            }
            .into())
        }
    }

    /// Merge the configuration file with command-line flags
    pub fn pipeline_config(&self, file: &CliConfig) -> PipelineConfig {
        let parallel = self.parallel || file.performance.parallel;
        let threads = self.threads.or(match file.performance.worker_threads {
            0 => None,
            n => Some(n),
        });

        if let Some(n) = threads {
            let cpus = num_cpus::get();
            if n > cpus {
                log::warn!("{n} worker threads requested but only {cpus} CPUs available");
            }
        }

        PipelineConfig {
            out_dir: self
                .output
                .clone()
                .unwrap_or_else(|| file.pipeline.out_dir.clone()),
            max_length: self.max_length.unwrap_or(file.pipeline.max_length),
            stride: self.stride.unwrap_or(file.pipeline.stride),
            conf_threshold: self.conf_threshold.unwrap_or(file.pipeline.conf_threshold),
            visuals: file.pipeline.visuals && !self.no_visuals,
            dpi: self.dpi.unwrap_or(file.pipeline.dpi),
            pdftoppm: file.pipeline.pdftoppm.clone(),
            execution_mode: if parallel {
                ExecutionMode::Parallel
            } else {
                ExecutionMode::Sequential
            },
            threads,
        }
    }

    fn heading_rules(&self, file: &CliConfig) -> Result<HeadingRules> {
        match self.rules.as_ref().or(file.labeling.rules.as_ref()) {
            Some(path) => {
                let rules = HeadingRules::from_file(path)
                    .with_context(|| format!("Failed to load heading rules: {}", path.display()))?;
                log::info!("Using heading rules '{}'", rules.name());
                Ok(rules)
            }
            None => Ok(HeadingRules::default()),
        }
    }

    fn ocr(&self, file: &CliConfig) -> Result<TesseractOcr> {
        let source = match self.ocr_mode {
            Some(mode) => OcrSource::from(mode),
            None => file
                .ocr
                .mode
                .parse()
                .map_err(|e| CliError::ConfigError(format!("{e}")))?,
        };
        Ok(TesseractOcr::new(source)
            .with_program(file.ocr.tesseract.clone())
            .with_language(file.ocr.language.clone()))
    }

    fn print_report(&self, report: &RunReport) {
        for failure in &report.failures {
            eprintln!("✗ {} ({}): {}", failure.doc_id, failure.stage, failure.error);
        }
        if self.quiet {
            return;
        }
        for doc in &report.documents {
            println!(
                "✓ {}: {} pages, {} chunks, {} highlights",
                doc.doc_id, doc.pages, doc.chunks, doc.visualizations
            );
        }
        println!(
            "Wrote {} chunks from {} documents ({} pages) to {}",
            report.chunks_written,
            report.documents.len(),
            report.total_pages(),
            report.dataset_path.display()
        );
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when called from tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
