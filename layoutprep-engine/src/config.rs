//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::ExecutionMode;
use layoutprep_core::window::{DEFAULT_MAX_LENGTH, DEFAULT_STRIDE};
use std::path::{Path, PathBuf};

/// Default minimum OCR confidence a word needs to be kept
pub const DEFAULT_CONF_THRESHOLD: f32 = 40.0;

/// Default resolution PDF pages are rendered at
pub const DEFAULT_DPI: u32 = 200;

const IMAGES_DIR: &str = "images";
const INTERMEDIATE_DIR: &str = "intermediate";
const VISUALIZATION_DIR: &str = "visualizations";
const DATASET_FILE: &str = "dataset_chunks.jsonl";

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of every artifact the run writes
    pub out_dir: PathBuf,
    /// Sub-tokens per chunk, special tokens included
    pub max_length: usize,
    /// Sub-tokens shared by consecutive chunks
    pub stride: usize,
    /// Words below this OCR confidence are dropped
    pub conf_threshold: f32,
    /// Render highlight images
    pub visuals: bool,
    /// Resolution PDF pages are rendered at
    pub dpi: u32,
    /// `pdftoppm` executable used for PDF documents
    pub pdftoppm: PathBuf,
    /// How documents are scheduled
    pub execution_mode: ExecutionMode,
    /// Worker threads for parallel execution (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("output"),
            max_length: DEFAULT_MAX_LENGTH,
            stride: DEFAULT_STRIDE,
            conf_threshold: DEFAULT_CONF_THRESHOLD,
            visuals: true,
            dpi: DEFAULT_DPI,
            pdftoppm: PathBuf::from("pdftoppm"),
            execution_mode: ExecutionMode::Sequential,
            threads: None,
        }
    }
}

impl PipelineConfig {
    /// Default configuration writing under `out_dir`
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }

    /// Reject window geometry no tokenizer can honour
    ///
    /// Two positions of every window are taken by start and end tokens, so
    /// the stride has to fit in what is left.
    pub fn validate(&self) -> Result<()> {
        if self.max_length < 3 {
            return Err(EngineError::ConfigError(format!(
                "max_length must be at least 3, got {}",
                self.max_length
            )));
        }
        if self.stride >= self.max_length - 2 {
            return Err(EngineError::ConfigError(format!(
                "stride {} must be smaller than max_length - 2 ({})",
                self.stride,
                self.max_length - 2
            )));
        }
        if !(0.0..=100.0).contains(&self.conf_threshold) {
            return Err(EngineError::ConfigError(format!(
                "conf_threshold must be within 0..=100, got {}",
                self.conf_threshold
            )));
        }
        if self.dpi == 0 {
            return Err(EngineError::ConfigError(
                "dpi must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(EngineError::ConfigError(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Page images rendered from PDF documents
    pub fn images_dir(&self) -> PathBuf {
        self.out_dir.join(IMAGES_DIR)
    }

    /// Per-document page records
    pub fn intermediate_dir(&self) -> PathBuf {
        self.out_dir.join(INTERMEDIATE_DIR)
    }

    /// Highlight images
    pub fn visualization_dir(&self) -> PathBuf {
        self.out_dir.join(VISUALIZATION_DIR)
    }

    /// Merged chunk records
    pub fn dataset_path(&self) -> PathBuf {
        self.out_dir.join(DATASET_FILE)
    }

    /// Page records of one document
    pub fn pages_path(&self, doc_id: &str) -> PathBuf {
        self.intermediate_dir().join(format!("{doc_id}_pages.jsonl"))
    }

    /// Highlight image of one page (`page_index` is zero-based, the file name is not)
    pub fn highlight_path(&self, doc_id: &str, page_index: usize) -> PathBuf {
        self.visualization_dir()
            .join(format!("{doc_id}_page_{:03}_highlight.png", page_index + 1))
    }

    /// Out directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_length, 512);
        assert_eq!(config.stride, 128);
        assert_eq!(config.conf_threshold, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_stride_without_room() {
        let config = PipelineConfig {
            max_length: 10,
            stride: 8,
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::ConfigError(_))));

        let config = PipelineConfig {
            max_length: 2,
            stride: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_dpi() {
        let config = PipelineConfig {
            dpi: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_zero_threads() {
        let config = PipelineConfig {
            threads: Some(0),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_layout() {
        let config = PipelineConfig::new("/data/out");
        assert_eq!(
            config.pages_path("paper"),
            PathBuf::from("/data/out/intermediate/paper_pages.jsonl")
        );
        assert_eq!(
            config.highlight_path("paper", 0),
            PathBuf::from("/data/out/visualizations/paper_page_001_highlight.png")
        );
        assert_eq!(
            config.dataset_path(),
            PathBuf::from("/data/out/dataset_chunks.jsonl")
        );
        assert_eq!(config.images_dir(), PathBuf::from("/data/out/images"));
    }
}
