//! Configuration module

use anyhow::{Context, Result};
use layoutprep_core::{DEFAULT_MAX_LENGTH, DEFAULT_STRIDE};
use layoutprep_engine::{DEFAULT_CONF_THRESHOLD, DEFAULT_DPI};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// Labeling configuration
    #[serde(default)]
    pub labeling: LabelingSection,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceSection,

    /// OCR configuration
    #[serde(default)]
    pub ocr: OcrSection,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}

/// Pipeline-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PipelineSection {
    /// Output directory
    pub out_dir: PathBuf,

    /// Sub-tokens per chunk
    pub max_length: usize,

    /// Sub-tokens shared by consecutive chunks
    pub stride: usize,

    /// Minimum OCR confidence
    pub conf_threshold: f32,

    /// Render highlight images
    pub visuals: bool,

    /// Resolution PDF pages are rendered at
    pub dpi: u32,

    /// `pdftoppm` executable
    pub pdftoppm: PathBuf,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("output"),
            max_length: DEFAULT_MAX_LENGTH,
            stride: DEFAULT_STRIDE,
            conf_threshold: DEFAULT_CONF_THRESHOLD,
            visuals: true,
            dpi: DEFAULT_DPI,
            pdftoppm: PathBuf::from("pdftoppm"),
        }
    }
}

/// Labeling-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LabelingSection {
    /// Heading rules file (built-in rules when absent)
    pub rules: Option<PathBuf>,
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PerformanceSection {
    /// Process documents in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

/// OCR-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OcrSection {
    /// Where the TSV comes from: auto, sidecar or command
    pub mode: String,

    /// Tesseract executable
    pub tesseract: PathBuf,

    /// Recognition language
    pub language: String,
}

impl Default for OcrSection {
    fn default() -> Self {
        Self {
            mode: "auto".to_string(),
            tesseract: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}
