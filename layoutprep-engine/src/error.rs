//! Layered error types
//!
//! [`EngineError`] wraps the deterministic [`CoreError`] and adds everything
//! that touches the outside world. A document that fails is reported as a
//! [`DocumentFailure`] naming the [`Stage`] it failed in, so one bad scan
//! never takes its siblings down.

use layoutprep_core::CoreError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// File system error with the path involved
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Record (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// External collaborator failed (OCR binary, tokenizer, ...)
    #[error("{capability} failed: {message}")]
    External {
        /// Name of the collaborator
        capability: &'static str,
        /// What it reported
        message: String,
    },

    /// Document that yields no page images
    #[error("no page images found for {path}")]
    NoPages {
        /// Document path
        path: PathBuf,
    },

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

impl EngineError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn external(capability: &'static str, message: impl Into<String>) -> Self {
        EngineError::External {
            capability,
            message: message.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Pipeline step a document was in when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Turning the document into page images
    Rasterize,
    /// Running OCR on a page image
    Ocr,
    /// Building the page and normalizing its boxes
    Normalize,
    /// Windowing into chunks
    Chunk,
    /// Writing records
    Persist,
}

impl Stage {
    /// Lower-case stage name
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Rasterize => "rasterize",
            Stage::Ocr => "ocr",
            Stage::Normalize => "normalize",
            Stage::Chunk => "chunk",
            Stage::Persist => "persist",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document that did not make it through the pipeline
#[derive(Error, Debug)]
#[error("document '{doc_id}' failed during {stage}: {error}")]
pub struct DocumentFailure {
    /// Document id
    pub doc_id: String,
    /// Stage that failed
    pub stage: Stage,
    /// Cause
    #[source]
    pub error: EngineError,
}

impl DocumentFailure {
    /// Failure of `doc_id` in `stage`
    pub fn new(doc_id: impl Into<String>, stage: Stage, error: impl Into<EngineError>) -> Self {
        Self {
            doc_id: doc_id.into(),
            stage,
            error: error.into(),
        }
    }
}

/// Tag errors with the stage they happened in
pub(crate) trait StageExt<T> {
    fn at(self, doc_id: &str, stage: Stage) -> std::result::Result<T, DocumentFailure>;
}

impl<T, E: Into<EngineError>> StageExt<T> for std::result::Result<T, E> {
    fn at(self, doc_id: &str, stage: Stage) -> std::result::Result<T, DocumentFailure> {
        self.map_err(|e| DocumentFailure::new(doc_id, stage, e))
    }
}
