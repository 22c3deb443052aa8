//! Pipeline orchestration for document-layout dataset preparation
//!
//! This crate wires the deterministic core to the outside world: page images,
//! OCR output, JSONL records and highlight images. Every external collaborator
//! sits behind a trait so it can be swapped or faked in tests.

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod executor;
#[cfg(feature = "hf-tokenizers")]
pub mod hf;
pub mod ocr;
pub mod pipeline;
pub mod raster;
pub mod records;
pub mod visualize;

// Re-export key types
pub use assembler::PageAssembler;
pub use config::{PipelineConfig, DEFAULT_CONF_THRESHOLD, DEFAULT_DPI};
pub use error::{DocumentFailure, EngineError, Result, Stage};
pub use executor::{ExecutionMode, Executor};
#[cfg(feature = "hf-tokenizers")]
pub use hf::HfTokenizer;
pub use ocr::{OcrEngine, OcrPage, OcrSource, OcrWord, TesseractOcr};
pub use pipeline::{DocumentOutput, DocumentResult, DocumentSummary, Pipeline, PipelineBuilder, RunReport};
pub use raster::{document_id, DocumentRasterizer, ImageDirRasterizer, PdfRasterizer, Rasterizer};
pub use records::{read_jsonl, ChunkRecord, JsonlWriter, PageRecord};
pub use visualize::{render_best_effort, HighlightRenderer, Renderer};

// Re-export from core for convenience
pub use layoutprep_core::{
    Chunk, ChunkWindower, HeadingRules, LabelId, OverflowTokenizer, Page, PieceTokenizer,
    SectionLabeler,
};
